//! # Handler Layer
//!
//! The terminal endpoint of the dispatch chain.
//!
//! Handlers receive a fully owned request and perform the business logic.
//! Expected domain failures are encoded in the response (usually
//! [`Outcome::Failure`]); a handler panics only for genuinely unmapped
//! conditions, which the mediator contains at its boundary.
//!
//! # Usage Patterns
//!
//! 1. **Direct closure**: `|request| async move { ... }`
//! 2. **Struct implementation**: `impl Handler<MyRequest> for MyHandler`
//!
//! [`Outcome::Failure`]: crate::Outcome::Failure

use crate::{
    behavior::{BoxReply, BoxRequest},
    error::SendError,
    request::Request,
};
use std::{future::Future, marker::PhantomData, pin::Pin};

/// The single function bound to a request type.
///
/// # Static vs Dynamic Dispatch
///
/// This trait uses native `async fn` for zero-cost static dispatch. The
/// mediator's registry stores handlers behind [`ErasedHandler`], the
/// object-safe erased form.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle requests of type `{R}`",
    label = "missing `Handler<{R}>` implementation",
    note = "Handlers must implement `handle` for the request type `{R}`."
)]
pub trait Handler<R: Request>: Send + Sync + 'static {
    /// Execute the request and produce its declared response.
    fn handle(&self, request: R) -> impl Future<Output = R::Response> + Send;
}

// Blanket impl for async closures
impl<R, F, Fut> Handler<R> for F
where
    R: Request,
    F: Fn(R) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R::Response> + Send,
{
    fn handle(&self, request: R) -> impl Future<Output = R::Response> + Send {
        (self)(request)
    }
}

/// Object-safe, type-erased handler stored in the mediator's registry.
///
/// The registry maps `TypeId` to `ErasedHandler`, so the erased call is only
/// ever reached with a payload of the matching concrete type; the downcast
/// failure arm exists to keep the contract total.
pub trait ErasedHandler: Send + Sync + 'static {
    /// The static type name of the request this endpoint accepts.
    fn request_name(&self) -> &'static str;

    /// Execute the endpoint with an erased request payload.
    fn call<'a>(
        &'a self,
        request: BoxRequest,
    ) -> Pin<Box<dyn Future<Output = Result<BoxReply, SendError>> + Send + 'a>>;
}

/// Adapter that erases a typed [`Handler`] into an [`ErasedHandler`].
pub struct HandlerEndpoint<R, H> {
    handler: H,
    _request: PhantomData<fn(R)>,
}

impl<R: Request, H: Handler<R>> HandlerEndpoint<R, H> {
    /// Wrap a typed handler for storage in the registry.
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _request: PhantomData,
        }
    }
}

impl<R: Request, H: Handler<R>> ErasedHandler for HandlerEndpoint<R, H> {
    fn request_name(&self) -> &'static str {
        std::any::type_name::<R>()
    }

    fn call<'a>(
        &'a self,
        request: BoxRequest,
    ) -> Pin<Box<dyn Future<Output = Result<BoxReply, SendError>> + Send + 'a>> {
        Box::pin(async move {
            let request = request
                .downcast::<R>()
                .map_err(|_| SendError::RequestTypeMismatch {
                    request: std::any::type_name::<R>(),
                })?;
            let reply = self.handler.handle(*request).await;
            Ok(Box::new(reply) as BoxReply)
        })
    }
}
