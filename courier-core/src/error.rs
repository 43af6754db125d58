//! Error types for Courier.
//!
//! This module provides the dispatch error taxonomy using `thiserror`:
//!
//! - [`SendError`] - errors surfaced by `try_send` on the dispatch path
//! - [`PublishCancelled`] - cancellation of a bus publish
//!
//! Expected *domain* failures never appear here: those travel as
//! [`Outcome::Failure`] data through the chain. `SendError` covers the
//! structural conditions around the handler: wiring mistakes, aggregated
//! validation verdicts, cancellation, and contained panics.
//!
//! [`Outcome::Failure`]: crate::Outcome::Failure

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the mediator's fallible dispatch entry point.
#[derive(Error, Debug)]
pub enum SendError {
    /// No handler was registered for the request's type. A wiring error,
    /// never silently converted into a default response.
    #[error("no handler registered for request type `{request}`")]
    HandlerNotFound {
        /// The request's static type name.
        request: &'static str,
    },

    /// One or more validators rejected the request; the handler was not
    /// invoked. Messages from every violated rule, in registration order.
    #[error("validation failed: {}", .messages.join("; "))]
    Validation {
        /// Every violation message, not only the first.
        messages: Vec<String>,
    },

    /// The handler (or a behavior) failed with an error value.
    #[error("handler for `{request}` failed: {source}")]
    Handler {
        /// The request's static type name.
        request: &'static str,
        /// The underlying error.
        #[source]
        source: BoxError,
    },

    /// A panic escaped the chain and was contained at the mediator boundary.
    #[error("handler for `{request}` panicked: {message}")]
    Panicked {
        /// The request's static type name.
        request: &'static str,
        /// The panic payload, if it was a string.
        message: String,
    },

    /// The erased payload did not match the endpoint's request type.
    #[error("request payload did not match the endpoint for `{request}`")]
    RequestTypeMismatch {
        /// The request's static type name.
        request: &'static str,
    },

    /// The erased reply did not match the request's declared response type.
    #[error("response type mismatch for `{request}`")]
    ResponseTypeMismatch {
        /// The request's static type name.
        request: &'static str,
    },

    /// The dispatch was cancelled before the chain completed.
    #[error("dispatch of `{request}` was cancelled")]
    Cancelled {
        /// The request's static type name.
        request: &'static str,
    },
}

impl SendError {
    /// Whether this error is an aggregated validation verdict.
    pub fn is_validation(&self) -> bool {
        matches!(self, SendError::Validation { .. })
    }
}

/// A bus publish was cancelled before every subscriber was reached.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("publish was cancelled")]
pub struct PublishCancelled;
