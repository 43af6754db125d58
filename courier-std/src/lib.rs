//! # courier-std
//!
//! Standard implementations for the Courier dispatch core.
//!
//! This crate provides:
//! - **Mediator**: [`mediator::Mediator`] and its wiring-phase builder
//! - **Built-in behaviors**: validation and logging/timing middleware
//! - **Event bus**: [`bus::EventBus`] with snapshot publish semantics
//! - **Testing utilities**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core contracts
pub use courier_core;

// Modules
pub mod behaviors;
pub mod bus;
pub mod mediator;
pub mod testing;
