//! Validation contracts.
//!
//! A [`Validator`] is a pure pass/fail check over a request. Validators for
//! the same request type are independent: none may depend on another's
//! outcome, and the validation behavior runs all of them and unions every
//! violation message rather than stopping at the first.

use crate::request::Request;
use std::{any::Any, future::Future, marker::PhantomData, pin::Pin};

/// The verdict of a validator: pass, or fail with ordered messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The request passed this validator.
    Valid,
    /// The request violated one or more rules.
    Invalid(Vec<String>),
}

impl ValidationOutcome {
    /// A single-message failure verdict.
    pub fn fail(message: impl Into<String>) -> Self {
        ValidationOutcome::Invalid(vec![message.into()])
    }

    /// A failure verdict carrying several messages, in order.
    pub fn invalid(messages: Vec<String>) -> Self {
        ValidationOutcome::Invalid(messages)
    }

    /// Whether the request passed.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    /// The violation messages; empty for `Valid`.
    pub fn messages(&self) -> &[String] {
        match self {
            ValidationOutcome::Valid => &[],
            ValidationOutcome::Invalid(messages) => messages,
        }
    }

    /// Consume the verdict, yielding its messages; empty for `Valid`.
    pub fn into_messages(self) -> Vec<String> {
        match self {
            ValidationOutcome::Valid => Vec::new(),
            ValidationOutcome::Invalid(messages) => messages,
        }
    }
}

/// A pure pass/fail check over a request.
///
/// Validators must not mutate the request and should be fast; suspension is
/// permitted (the contract is async) but I/O inside validators is
/// discouraged.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Validator` for `{R}`",
    label = "missing `Validator<{R}>` implementation",
    note = "Validators implement `validate(&{R}) -> ValidationOutcome`."
)]
pub trait Validator<R: Request>: Send + Sync + 'static {
    /// Check the request, producing a verdict.
    fn validate(&self, request: &R) -> impl Future<Output = ValidationOutcome> + Send;
}

// Blanket impl for plain sync closures, the common case for business rules.
impl<R, F> Validator<R> for F
where
    R: Request,
    F: Fn(&R) -> ValidationOutcome + Send + Sync + 'static,
{
    async fn validate(&self, request: &R) -> ValidationOutcome {
        (self)(request)
    }
}

/// Object-safe, type-erased validator stored in the per-type registry.
pub trait DynValidator: Send + Sync + 'static {
    /// Check an erased request payload.
    fn validate_erased<'a>(
        &'a self,
        request: &'a (dyn Any + Send + Sync),
    ) -> Pin<Box<dyn Future<Output = ValidationOutcome> + Send + 'a>>;
}

/// Adapter that erases a typed [`Validator`] into a [`DynValidator`].
pub struct ValidatorAdapter<R, V> {
    validator: V,
    _request: PhantomData<fn(R)>,
}

impl<R: Request, V: Validator<R>> ValidatorAdapter<R, V> {
    /// Wrap a typed validator for storage in the registry.
    pub fn new(validator: V) -> Self {
        Self {
            validator,
            _request: PhantomData,
        }
    }
}

impl<R: Request, V: Validator<R>> DynValidator for ValidatorAdapter<R, V> {
    fn validate_erased<'a>(
        &'a self,
        request: &'a (dyn Any + Send + Sync),
    ) -> Pin<Box<dyn Future<Output = ValidationOutcome> + Send + 'a>> {
        Box::pin(async move {
            match request.downcast_ref::<R>() {
                Some(request) => self.validator.validate(request).await,
                // The registry is keyed by TypeId, so a mismatch is unreachable
                // in practice; a foreign payload is simply not this rule's concern.
                None => ValidationOutcome::Valid,
            }
        })
    }
}
