//! Request marker traits.

use crate::outcome::Reply;

/// A data-only value describing an intended operation.
///
/// A request carries only data, no behavior. Its identity is its runtime
/// type: the mediator keys its handler registry on `TypeId::of::<R>()`, so
/// each request type binds to exactly one handler. Requests are constructed
/// by a caller, passed once through `send`, and discarded.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, Clone)]
/// struct Ping { n: i32 }
///
/// impl Request for Ping {
///     type Response = Outcome<i32>;
/// }
/// impl Command for Ping {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Request",
    label = "must be `Send + Sync + 'static` with a `Reply` response",
    note = "Declare the response type: `impl Request for {Self} {{ type Response = ...; }}`."
)]
pub trait Request: Send + Sync + 'static {
    /// The type the bound handler produces for this request.
    type Response: Reply;
}

/// A request that mutates state.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not marked as a Command",
    label = "missing `Command` implementation",
    note = "Commands are state-mutating requests: `impl Command for {Self} {{}}`."
)]
pub trait Command: Request {}

/// A request that reads state without mutating it.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not marked as a Query",
    label = "missing `Query` implementation",
    note = "Queries are read-only requests: `impl Query for {Self} {{}}`."
)]
pub trait Query: Request {}
