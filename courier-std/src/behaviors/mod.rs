//! Built-in pipeline behaviors.
//!
//! The builder installs [`LoggingBehavior`] (outermost, so every dispatch is
//! observed) and [`ValidationBehavior`] on every mediator; custom behaviors
//! registered during wiring run inside them, closer to the handler.

mod logging;
mod validation;

pub use logging::{DEFAULT_SLOW_THRESHOLD, LoggingBehavior};
pub use validation::ValidationBehavior;
