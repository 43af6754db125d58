//! # Dispatch Chain Layer (Behavior)
//!
//! Middleware wrapped around every dispatch.
//!
//! A [`Behavior`] receives the request (type-erased), its [`RequestMeta`],
//! and an explicit continuation [`Next`]. It may run logic before and after
//! invoking the continuation, or short-circuit by never invoking it. The
//! chain is an explicit fold: the mediator walks a behavior slice
//! right-to-left over the terminal handler endpoint, so the first registered
//! behavior is outermost.
//!
//! # Ordering
//!
//! For behaviors `[A, B]` around handler `H`, the observed order is
//! `A-pre, B-pre, H, B-post, A-post`. Each behavior fully completes its
//! pre-logic before `next.run` and its post-logic after `next.run` returns.
//!
//! # Use Cases
//!
//! - Validation gatekeeping (short-circuit before the handler)
//! - Timing, correlation, and outcome observation
//! - Custom cross-cutting middleware registered at wiring time

use crate::{error::SendError, handler::ErasedHandler, outcome::AnyReply, request::Request};
use std::{
    any::{Any, TypeId},
    future::Future,
    pin::Pin,
    sync::Arc,
};

/// A type-erased request payload moving through the chain.
pub type BoxRequest = Box<dyn Any + Send + Sync>;

/// A type-erased reply moving back out of the chain.
pub type BoxReply = Box<dyn AnyReply>;

/// The boxed future every chain stage returns.
pub type BehaviorFuture<'a> = Pin<Box<dyn Future<Output = Result<BoxReply, SendError>> + Send + 'a>>;

/// Static metadata about the request being dispatched.
///
/// Carried alongside the erased payload so behaviors can identify the
/// request without downcasting it.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    name: &'static str,
    type_id: TypeId,
}

impl RequestMeta {
    /// Build the metadata for a concrete request type.
    pub fn of<R: Request>() -> Self {
        Self {
            name: std::any::type_name::<R>(),
            type_id: TypeId::of::<R>(),
        }
    }

    /// The request's static type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The request's type identity, as used by the handler registry.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}

/// A middleware unit wrapping the dispatch chain.
///
/// Behaviors are stored as trait objects in the mediator, so the contract is
/// object-safe directly: the erased request is consumed and either forwarded
/// through [`Next::run`] or dropped to short-circuit.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a pipeline Behavior",
    label = "missing `Behavior` implementation",
    note = "Behaviors receive the erased request and a `Next` continuation."
)]
pub trait Behavior: Send + Sync + 'static {
    /// Process the request, optionally delegating to the rest of the chain.
    fn handle<'a>(
        &'a self,
        meta: &'a RequestMeta,
        request: BoxRequest,
        next: Next<'a>,
    ) -> BehaviorFuture<'a>;
}

/// The explicit continuation handed to each behavior.
///
/// Holds the remaining behaviors and the terminal handler endpoint. Calling
/// [`run`] consumes the continuation and advances the chain by one stage;
/// dropping it without calling short-circuits the dispatch.
///
/// [`run`]: Next::run
pub struct Next<'a> {
    behaviors: &'a [Arc<dyn Behavior>],
    endpoint: &'a dyn ErasedHandler,
    meta: &'a RequestMeta,
}

impl<'a> Next<'a> {
    /// Build the outermost continuation for a dispatch.
    pub fn new(
        behaviors: &'a [Arc<dyn Behavior>],
        endpoint: &'a dyn ErasedHandler,
        meta: &'a RequestMeta,
    ) -> Self {
        Self {
            behaviors,
            endpoint,
            meta,
        }
    }

    /// Invoke the next stage: the next behavior if any remain, otherwise the
    /// terminal handler endpoint.
    pub fn run(self, request: BoxRequest) -> BehaviorFuture<'a> {
        match self.behaviors.split_first() {
            Some((head, rest)) => head.handle(
                self.meta,
                request,
                Next {
                    behaviors: rest,
                    endpoint: self.endpoint,
                    meta: self.meta,
                },
            ),
            None => self.endpoint.call(request),
        }
    }
}
