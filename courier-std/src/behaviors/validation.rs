//! Validation behavior: runs every registered validator before the handler.

use courier_core::{
    Behavior, BehaviorFuture, BoxRequest, DynValidator, Next, RequestMeta, SendError,
};
use std::{any::TypeId, collections::HashMap, sync::Arc};

/// Guards the chain with the validators registered for each request type.
///
/// Requests with no registered validators pass through untouched. When
/// validators exist, all of them run and their violation messages are unioned;
/// any violation short-circuits the chain with [`SendError::Validation`]
/// before the handler is reached.
pub struct ValidationBehavior {
    validators: HashMap<TypeId, Vec<Arc<dyn DynValidator>>>,
}

impl ValidationBehavior {
    /// Build the behavior over the frozen validator registry.
    pub fn new(validators: HashMap<TypeId, Vec<Arc<dyn DynValidator>>>) -> Self {
        Self { validators }
    }
}

impl Behavior for ValidationBehavior {
    fn handle<'a>(
        &'a self,
        meta: &'a RequestMeta,
        request: BoxRequest,
        next: Next<'a>,
    ) -> BehaviorFuture<'a> {
        Box::pin(async move {
            let Some(validators) = self.validators.get(&meta.type_id()) else {
                return next.run(request).await;
            };

            let mut messages = Vec::new();
            for validator in validators {
                let verdict = validator.validate_erased(request.as_ref()).await;
                messages.extend(verdict.into_messages());
            }

            if messages.is_empty() {
                next.run(request).await
            } else {
                tracing::debug!(
                    request = meta.name(),
                    violations = messages.len(),
                    "request rejected by validation"
                );
                Err(SendError::Validation { messages })
            }
        })
    }
}
