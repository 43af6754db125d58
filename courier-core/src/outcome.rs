//! # Outcome Envelope Layer
//!
//! The universal success/failure envelope for every fallible operation.
//!
//! [`Outcome`] is a two-variant sum type: either a value was produced, or the
//! operation failed with a human-readable message. Expected domain failures
//! travel as `Failure` values through the whole dispatch chain; panics are
//! reserved for genuinely unmapped conditions and are contained separately at
//! the mediator boundary.
//!
//! # Design Philosophy
//!
//! - **Exhaustive**: callers `match` on the variant; there is no nullable
//!   value with a side boolean
//! - **Immutable**: an envelope is never rewritten once constructed
//! - **Observable**: the [`Reply`] probe lets middleware see a failure
//!   without knowing the success type

/// The universal outcome envelope: a produced value or a failure message.
///
/// Exactly one variant is populated. `Failure` never carries a value, and by
/// convention its message is non-empty.
///
/// # Example
///
/// ```rust,ignore
/// let doubled = Outcome::success(21).map(|n| n * 2);
/// assert_eq!(doubled.into_value(), Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation produced a value.
    Success(T),
    /// The operation failed with a message describing why.
    Failure(String),
}

impl<T> Outcome<T> {
    /// Wrap a produced value.
    pub fn success(value: T) -> Self {
        Outcome::Success(value)
    }

    /// Construct a failure from a message.
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        debug_assert!(!message.is_empty(), "failure message must be non-empty");
        Outcome::Failure(message)
    }

    /// Whether this outcome is a `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Whether this outcome is a `Failure`.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Borrow the value, or `None` on `Failure`. Never panics.
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// Consume the envelope, yielding the value, or `None` on `Failure`.
    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    /// Borrow the failure message, or `None` on `Success`.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(message) => Some(message),
        }
    }

    /// Transform the success value, passing failures through unchanged.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(message) => Outcome::Failure(message),
        }
    }

    /// Chain another fallible step onto a success.
    pub fn and_then<U, F: FnOnce(T) -> Outcome<U>>(self, f: F) -> Outcome<U> {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::Failure(message) => Outcome::Failure(message),
        }
    }
}

/// A response type the dispatch chain can carry and probe.
///
/// Every [`Request::Response`] must implement `Reply`. The single method,
/// [`as_failure`], lets observing middleware (the logging behavior) detect a
/// failure envelope without knowing the concrete success type; the default
/// reports "not a failure", which is correct for any plain value.
///
/// `Reply` is implemented explicitly for a list of common response shapes
/// rather than via a blanket impl, so that [`Outcome`] can override the
/// probe.
///
/// [`Request::Response`]: crate::Request::Response
/// [`as_failure`]: Reply::as_failure
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Reply",
    label = "response types must implement `Reply`",
    note = "Implement `Reply` for `{Self}`, or wrap it in `Outcome<{Self}>`."
)]
pub trait Reply: Send + 'static {
    /// The failure message, if this reply represents a failed outcome.
    fn as_failure(&self) -> Option<&str> {
        None
    }
}

impl<T: Send + 'static> Reply for Outcome<T> {
    fn as_failure(&self) -> Option<&str> {
        self.failure_message()
    }
}

// Common plain-value replies
impl Reply for () {}
impl Reply for bool {}
impl Reply for String {}
impl Reply for &'static str {}
impl Reply for i32 {}
impl Reply for i64 {}
impl Reply for u32 {}
impl Reply for u64 {}
impl Reply for usize {}
impl Reply for f64 {}
impl<T: Reply> Reply for Option<T> {}
impl<T: Reply> Reply for Vec<T> {}

/// A reply type that can absorb a dispatch-boundary failure.
///
/// When a request's response implements `FromFailure`, the mediator's `send`
/// entry point can coerce validation and wiring errors into the caller's
/// envelope, so those callers always branch on data and never observe an
/// error value.
pub trait FromFailure: Reply {
    /// Build the failure form of this reply from a message.
    fn from_failure(message: String) -> Self;
}

impl<T: Send + 'static> FromFailure for Outcome<T> {
    fn from_failure(message: String) -> Self {
        Outcome::Failure(message)
    }
}

/// Object-safe reply carried through the erased dispatch chain.
///
/// Blanket-implemented for every [`Reply`]; the boxed form ([`BoxReply`])
/// is what behaviors see, and [`into_any`] is how the typed boundary
/// recovers the concrete response.
///
/// [`BoxReply`]: crate::BoxReply
/// [`into_any`]: AnyReply::into_any
pub trait AnyReply: Send + 'static {
    /// The failure message, if this reply represents a failed outcome.
    fn as_failure(&self) -> Option<&str>;

    /// Unbox into `Any` for downcasting at the typed boundary.
    fn into_any(self: Box<Self>) -> Box<dyn std::any::Any + Send>;
}

impl<T: Reply> AnyReply for T {
    fn as_failure(&self) -> Option<&str> {
        Reply::as_failure(self)
    }

    fn into_any(self: Box<Self>) -> Box<dyn std::any::Any + Send> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_round_trip() {
        let outcome = Outcome::success(5);
        assert!(outcome.is_success());
        assert!(!outcome.is_failure());
        assert_eq!(outcome.value(), Some(&5));
        assert_eq!(outcome.into_value(), Some(5));
    }

    #[test]
    fn failure_carries_no_value() {
        let outcome: Outcome<i32> = Outcome::failure("broken");
        assert!(outcome.is_failure());
        assert!(!outcome.is_success());
        assert_eq!(outcome.value(), None);
        assert_eq!(outcome.failure_message(), Some("broken"));
        assert_eq!(outcome.into_value(), None);
    }

    #[test]
    fn map_skips_failure() {
        let doubled = Outcome::success(21).map(|n| n * 2);
        assert_eq!(doubled, Outcome::Success(42));

        let failed: Outcome<i32> = Outcome::failure("nope");
        assert_eq!(failed.map(|n| n * 2), Outcome::failure("nope"));
    }

    #[test]
    fn and_then_chains() {
        let outcome = Outcome::success(2).and_then(|n| {
            if n > 0 {
                Outcome::success(n * 10)
            } else {
                Outcome::failure("not positive")
            }
        });
        assert_eq!(outcome, Outcome::Success(20));
    }

    #[test]
    fn reply_probe_sees_failure() {
        let failed: Outcome<i32> = Outcome::failure("name required");
        assert_eq!(Reply::as_failure(&failed), Some("name required"));

        let plain = 42_i32;
        assert_eq!(Reply::as_failure(&plain), None);
    }

    #[test]
    fn from_failure_builds_envelope() {
        let outcome = <Outcome<String> as FromFailure>::from_failure("bad wiring".to_string());
        assert_eq!(outcome.failure_message(), Some("bad wiring"));
    }
}
