//! Operation timing for structured logs
//!
//! Every public pipeline entry point (parse, segment, rasterize, grow,
//! simplify) opens an [`OperationTimer`]. The timer creates an info span
//! named after the operation without entering it; callers that want
//! nested events inside it use [`OperationTimer::span`]. On drop the span
//! is entered just long enough to log the elapsed time.
//!
//! Enable output with any `tracing` subscriber, e.g. with
//! `RUST_LOG=uvmask_mesh=debug`.

use std::time::Instant;
use tracing::{Span, debug, info};

/// Logs the duration of an operation on drop.
///
/// ```
/// use uvmask_core::OperationTimer;
///
/// fn work() {
///     let _timer = OperationTimer::new("work");
///     // ...
/// }
/// work();
/// ```
pub struct OperationTimer {
    name: &'static str,
    start: Instant,
    span: Span,
}

impl OperationTimer {
    /// Start timing `name`.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!("uvmask_operation", operation = name);
        debug!(target: "uvmask::timing", operation = name, "starting operation");
        Self {
            name,
            start: Instant::now(),
            span,
        }
    }

    /// Start timing `name` for an input of `items` elements.
    pub fn with_items(name: &'static str, items: usize) -> Self {
        let span = tracing::info_span!("uvmask_operation", operation = name, items);
        debug!(target: "uvmask::timing", operation = name, items, "starting operation");
        Self {
            name,
            start: Instant::now(),
            span,
        }
    }

    /// Milliseconds since the timer started.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// The span created for this operation; not entered by the timer.
    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        let _entered = self.span.enter();
        info!(
            target: "uvmask::timing",
            operation = self.name,
            elapsed_ms = format!("{:.2}", self.elapsed_ms()),
            "operation completed"
        );
    }
}
