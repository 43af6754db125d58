//! The mediator: typed request dispatch through a behavior chain.
//!
//! # Wiring and steady state
//!
//! Registration is confined to an explicit wiring phase: [`MediatorBuilder`]
//! collects handlers, validators, and custom behaviors, and [`build`] freezes
//! them into an immutable [`Mediator`]. The registry is read-only afterwards,
//! so concurrent `send` calls from any number of tasks need no locking.
//!
//! # Dispatch
//!
//! `send`/`try_send` resolve the handler by the request's `TypeId`, fold the
//! behavior chain around it (first registered behavior outermost; the built-in
//! order is logging, then validation, then any custom behaviors), and invoke
//! the outermost continuation. Panics escaping the chain are contained at this
//! boundary and never unwind into the caller.
//!
//! [`build`]: MediatorBuilder::build

use crate::behaviors::{DEFAULT_SLOW_THRESHOLD, LoggingBehavior, ValidationBehavior};
use courier_core::{
    Behavior, DynValidator, ErasedHandler, FromFailure, Handler, HandlerEndpoint, Next, Request,
    RequestMeta, SendError, Validator, ValidatorAdapter,
};
use futures::FutureExt;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    panic::AssertUnwindSafe,
    sync::Arc,
    time::Duration,
};
use tokio_util::sync::CancellationToken;

/// Builder collecting handlers, validators, and behaviors during wiring.
///
/// # Example
///
/// ```rust,ignore
/// let mediator = Mediator::builder()
///     .register_handler::<Ping, _>(EchoHandler)
///     .register_validator::<CreateLocation, _>(name_required)
///     .build();
/// ```
pub struct MediatorBuilder {
    handlers: HashMap<TypeId, Arc<dyn ErasedHandler>>,
    validators: HashMap<TypeId, Vec<Arc<dyn DynValidator>>>,
    behaviors: Vec<Arc<dyn Behavior>>,
    slow_threshold: Duration,
}

impl MediatorBuilder {
    /// Create an empty builder with the default slow-dispatch threshold.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            validators: HashMap::new(),
            behaviors: Vec::new(),
            slow_threshold: DEFAULT_SLOW_THRESHOLD,
        }
    }

    /// Bind a handler to the request type `R`.
    ///
    /// Re-registering a type replaces the previous handler (last write wins)
    /// and emits a warning, so silent shadowing stays observable.
    pub fn register_handler<R, H>(mut self, handler: H) -> Self
    where
        R: Request,
        H: Handler<R>,
    {
        let endpoint: Arc<dyn ErasedHandler> = Arc::new(HandlerEndpoint::new(handler));
        if self.handlers.insert(TypeId::of::<R>(), endpoint).is_some() {
            tracing::warn!(
                request = std::any::type_name::<R>(),
                "handler re-registered; previous handler replaced"
            );
        }
        self
    }

    /// Append a validator for the request type `R`.
    ///
    /// Validators run in registration order and all of them run on every
    /// dispatch of `R`; their violation messages are unioned.
    pub fn register_validator<R, V>(mut self, validator: V) -> Self
    where
        R: Request,
        V: Validator<R>,
    {
        self.validators
            .entry(TypeId::of::<R>())
            .or_default()
            .push(Arc::new(ValidatorAdapter::new(validator)));
        self
    }

    /// Append a custom behavior, placed after the built-in validation and
    /// logging pair.
    pub fn behavior<B: Behavior>(mut self, behavior: B) -> Self {
        self.behaviors.push(Arc::new(behavior));
        self
    }

    /// Override the logging behavior's slow-dispatch threshold.
    pub fn slow_threshold(mut self, threshold: Duration) -> Self {
        self.slow_threshold = threshold;
        self
    }

    /// Freeze the wiring into an immutable [`Mediator`].
    ///
    /// The behavior chain is `[logging, validation, ...custom]`: logging
    /// outermost so every dispatch is timed and observed, including ones
    /// validation rejects; validation next so invalid requests never reach
    /// custom behaviors or the handler.
    pub fn build(self) -> Mediator {
        let mut chain: Vec<Arc<dyn Behavior>> = Vec::with_capacity(self.behaviors.len() + 2);
        chain.push(Arc::new(LoggingBehavior::with_threshold(
            self.slow_threshold,
        )));
        chain.push(Arc::new(ValidationBehavior::new(self.validators)));
        chain.extend(self.behaviors);
        Mediator {
            handlers: self.handlers,
            behaviors: chain,
        }
    }
}

impl Default for MediatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The dispatcher: routes each request to its single handler through the
/// behavior chain.
///
/// Immutable once built; share it via `Arc` across tasks.
pub struct Mediator {
    handlers: HashMap<TypeId, Arc<dyn ErasedHandler>>,
    behaviors: Vec<Arc<dyn Behavior>>,
}

impl Mediator {
    /// Start a wiring-phase builder.
    pub fn builder() -> MediatorBuilder {
        MediatorBuilder::new()
    }

    /// Dispatch a request, surfacing structural errors as [`SendError`].
    pub async fn try_send<R: Request>(&self, request: R) -> Result<R::Response, SendError> {
        self.dispatch(request, None).await
    }

    /// Dispatch a request, racing the chain against a cancellation signal.
    ///
    /// A cancelled token unwinds the in-flight dispatch as
    /// [`SendError::Cancelled`] rather than hanging.
    pub async fn try_send_with<R: Request>(
        &self,
        request: R,
        cancel: &CancellationToken,
    ) -> Result<R::Response, SendError> {
        self.dispatch(request, Some(cancel)).await
    }

    /// Dispatch a request whose response can absorb failures.
    ///
    /// Callers always receive the declared envelope and branch on data:
    /// validation verdicts become `Failure` with every message joined by
    /// `"; "`, and any other dispatch error becomes
    /// `Failure("Mediator error: ...")`.
    pub async fn send<R>(&self, request: R) -> R::Response
    where
        R: Request,
        R::Response: FromFailure,
    {
        match self.try_send(request).await {
            Ok(response) => response,
            Err(SendError::Validation { messages }) => {
                R::Response::from_failure(messages.join("; "))
            }
            Err(err) => R::Response::from_failure(format!("Mediator error: {err}")),
        }
    }

    async fn dispatch<R: Request>(
        &self,
        request: R,
        cancel: Option<&CancellationToken>,
    ) -> Result<R::Response, SendError> {
        let meta = RequestMeta::of::<R>();
        let endpoint = self
            .handlers
            .get(&meta.type_id())
            .ok_or(SendError::HandlerNotFound {
                request: meta.name(),
            })?;

        let next = Next::new(&self.behaviors, endpoint.as_ref(), &meta);
        let chain = AssertUnwindSafe(next.run(Box::new(request))).catch_unwind();

        let outcome = match cancel {
            Some(token) => {
                tokio::select! {
                    _ = token.cancelled() => {
                        return Err(SendError::Cancelled {
                            request: meta.name(),
                        });
                    }
                    outcome = chain => outcome,
                }
            }
            None => chain.await,
        };

        let reply = match outcome {
            Ok(result) => result?,
            Err(panic) => {
                return Err(SendError::Panicked {
                    request: meta.name(),
                    message: panic_message(panic.as_ref()),
                });
            }
        };

        reply
            .into_any()
            .downcast::<R::Response>()
            .map(|boxed| *boxed)
            .map_err(|_| SendError::ResponseTypeMismatch {
                request: meta.name(),
            })
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
