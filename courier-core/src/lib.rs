//! # courier-core
//!
//! Core contracts for the Courier request dispatch and event bus.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! behaviors and integrations that don't need the full `courier-std`
//! implementation.
//!
//! # Three-Layer Architecture
//!
//! Courier is built on three layers, each with a single structural concern:
//!
//! ## Layer 1: Outcome Envelope ([`Outcome`])
//!
//! The universal success/failure envelope. Every expected failure in the
//! system is *data*, never a panic: handlers return `Outcome::Failure` for
//! domain errors and callers branch on the variant exhaustively.
//!
//! - **Uniform**: one envelope shape for every fallible operation
//! - **Probed, not rewritten**: behaviors inspect replies through [`Reply`]
//!   without altering them
//! - **Coercible**: [`FromFailure`] lets the dispatch boundary turn wiring
//!   and validation errors into the caller's declared envelope type
//!
//! ## Layer 2: Request Contracts ([`Request`], [`Handler`], [`Validator`])
//!
//! Data-only request values ([`Command`] mutates, [`Query`] reads) bound to
//! exactly one [`Handler`] by runtime type identity, guarded by zero or more
//! pure [`Validator`]s.
//!
//! ## Layer 3: Dispatch Chain ([`Behavior`], [`Next`])
//!
//! Middleware around every dispatch. A behavior receives the erased request
//! and an explicit continuation ([`Next`]); it may run logic before and after
//! `next.run`, or short-circuit by dropping the continuation. The chain is an
//! explicit fold over a behavior list, not captured closures, so ordering is
//! observable and testable.
//!
//! The event bus contracts ([`Event`], [`EventSubscriber`]) are orthogonal to
//! the chain: events fan out to zero or more independent subscribers instead
//! of resolving to a single handler.
//!
//! # Error Types
//!
//! - [`SendError`] - dispatch-path errors (wiring, validation, handler faults)
//! - [`PublishCancelled`] - cancellation of a bus publish

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod behavior;
mod error;
mod event;
mod handler;
mod outcome;
mod request;
mod validator;

// Re-exports
pub use behavior::{Behavior, BehaviorFuture, BoxReply, BoxRequest, Next, RequestMeta};
pub use error::{BoxError, PublishCancelled, SendError};
pub use event::{DynSubscriber, Event, EventSubscriber, SubscriberAdapter};
pub use handler::{ErasedHandler, Handler, HandlerEndpoint};
pub use outcome::{AnyReply, FromFailure, Outcome, Reply};
pub use request::{Command, Query, Request};
pub use validator::{DynValidator, ValidationOutcome, Validator, ValidatorAdapter};
