//! # courier - In-Process Request Dispatch
//!
//! `courier` routes typed requests to exactly one handler through a chain of
//! pipeline behaviors, and broadcasts typed events to any number of isolated
//! subscribers. Handlers and callers share only the request types, never each
//! other.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier::prelude::*;
//!
//! struct Ping { n: i32 }
//! impl Request for Ping { type Response = Outcome<i32>; }
//!
//! struct EchoHandler;
//! impl Handler<Ping> for EchoHandler {
//!     async fn handle(&self, request: Ping) -> Outcome<i32> {
//!         Outcome::success(request.n * 2)
//!     }
//! }
//!
//! let mediator = Mediator::builder()
//!     .register_handler::<Ping, _>(EchoHandler)
//!     .build();
//! let response = mediator.send(Ping { n: 5 }).await;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use courier_core::{
    // Reply probing
    AnyReply,
    // Behavior chain
    Behavior,
    BehaviorFuture,
    // Errors
    BoxError,
    BoxReply,
    BoxRequest,
    // Request markers
    Command,
    DynSubscriber,
    DynValidator,
    ErasedHandler,
    // Events
    Event,
    EventSubscriber,
    FromFailure,
    // Handler
    Handler,
    HandlerEndpoint,
    Next,
    // Envelope
    Outcome,
    PublishCancelled,
    Query,
    Reply,
    Request,
    RequestMeta,
    SendError,
    SubscriberAdapter,
    ValidationOutcome,
    // Validation
    Validator,
    ValidatorAdapter,
};

pub use courier_std::{
    bus::EventBus,
    mediator::{Mediator, MediatorBuilder},
};

/// Built-in pipeline behaviors.
pub mod behaviors {
    pub use courier_std::behaviors::{DEFAULT_SLOW_THRESHOLD, LoggingBehavior, ValidationBehavior};
}

/// Testing utilities.
pub mod testing {
    pub use courier_std::testing::{
        CallCounter, FailingSubscriber, OrderRecordingBehavior, PanickingSubscriber,
        PassthroughBehavior, RecordingSubscriber,
    };
}

/// Prelude module - common imports for Courier.
///
/// # Usage
///
/// ```rust,ignore
/// use courier::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        BoxError,
        // Request markers
        Command,
        // Events
        Event,
        EventBus,
        EventSubscriber,
        // Core traits
        Handler,
        // Dispatch
        Mediator,
        MediatorBuilder,
        // Envelope
        Outcome,
        Query,
        Request,
        SendError,
        ValidationOutcome,
        Validator,
    };
}
