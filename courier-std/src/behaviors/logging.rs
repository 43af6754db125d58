//! Logging behavior: correlation id, timing, and outcome classification.

use courier_core::{Behavior, BehaviorFuture, BoxRequest, Next, RequestMeta};
use futures::FutureExt;
use std::{
    panic::AssertUnwindSafe,
    time::{Duration, Instant},
};
use uuid::Uuid;

/// Dispatches slower than this are logged at warn level unless the builder
/// overrides the threshold.
pub const DEFAULT_SLOW_THRESHOLD: Duration = Duration::from_millis(500);

/// Logs every dispatch with a fresh correlation id and wall-clock timing.
///
/// Each pass emits a start event, then classifies the result: domain failures
/// (a reply whose envelope carries a failure) and validation rejections log
/// at warn, dispatch errors at error, successes at debug. Slow dispatches are
/// additionally flagged. A panic unwinding out of the inner chain is observed
/// here with its elapsed time before the unwind resumes toward the mediator
/// boundary.
pub struct LoggingBehavior {
    slow_threshold: Duration,
}

impl LoggingBehavior {
    /// Build with the default slow-dispatch threshold.
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_SLOW_THRESHOLD)
    }

    /// Build with a custom slow-dispatch threshold.
    pub fn with_threshold(slow_threshold: Duration) -> Self {
        Self { slow_threshold }
    }
}

impl Default for LoggingBehavior {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for LoggingBehavior {
    fn handle<'a>(
        &'a self,
        meta: &'a RequestMeta,
        request: BoxRequest,
        next: Next<'a>,
    ) -> BehaviorFuture<'a> {
        Box::pin(async move {
            let correlation = Uuid::new_v4();
            let started = Instant::now();
            tracing::debug!(
                request = meta.name(),
                %correlation,
                "dispatching request"
            );

            let outcome = AssertUnwindSafe(next.run(request)).catch_unwind().await;
            let elapsed = started.elapsed();

            if elapsed > self.slow_threshold {
                tracing::warn!(
                    request = meta.name(),
                    %correlation,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "slow dispatch"
                );
            }

            let result = match outcome {
                Ok(result) => result,
                Err(panic) => {
                    tracing::error!(
                        request = meta.name(),
                        %correlation,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "request dispatch panicked"
                    );
                    std::panic::resume_unwind(panic);
                }
            };

            match &result {
                Ok(reply) => match reply.as_failure() {
                    Some(message) => tracing::warn!(
                        request = meta.name(),
                        %correlation,
                        elapsed_ms = elapsed.as_millis() as u64,
                        failure = message,
                        "request completed with domain failure"
                    ),
                    None => tracing::debug!(
                        request = meta.name(),
                        %correlation,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "request completed"
                    ),
                },
                Err(err) if err.is_validation() => tracing::warn!(
                    request = meta.name(),
                    %correlation,
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %err,
                    "request rejected by validation"
                ),
                Err(err) => tracing::error!(
                    request = meta.name(),
                    %correlation,
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %err,
                    "request dispatch failed"
                ),
            }

            result
        })
    }
}
