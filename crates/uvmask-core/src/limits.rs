//! Processing limits, truncation reports and cooperative progress checks
//!
//! Parsing, segmentation and outline rasterization walk every line, face
//! or edge of their input. Callers bound that work with [`ProcessLimits`]:
//! an optional cap on the number of items processed and an interval at
//! which a [`ProgressGate`] polls a progress callback that may cancel.
//!
//! When a cap cuts work short the operation reports a [`Truncation`]
//! alongside its result instead of silently dropping the remainder.
//!
//! # Example
//!
//! ```
//! use uvmask_core::{ProcessLimits, ProgressGate};
//!
//! let limits = ProcessLimits::default().with_max_items(3);
//! let (count, truncation) = limits.cap(10);
//! assert_eq!(count, 3);
//! assert_eq!(truncation.unwrap().total, 10);
//!
//! let mut seen = Vec::new();
//! let mut callback = |p: &uvmask_core::Progress| {
//!     seen.push(p.current);
//!     p.current < 4
//! };
//! let mut gate = ProgressGate::new("demo", 10, &limits.with_check_interval(2), Some(&mut callback));
//! assert!(gate.tick(2));
//! assert!(!gate.tick(4));
//! ```

use std::fmt;
use tracing::debug;

/// Default number of items between progress checks.
pub const DEFAULT_CHECK_INTERVAL: usize = 10_000;

/// Caller-supplied bounds for long-running passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessLimits {
    /// Maximum number of items (lines, faces) to process; `None` = all
    pub max_items: Option<usize>,
    /// Items between progress callback polls; 0 disables polling
    pub check_interval: usize,
}

impl Default for ProcessLimits {
    fn default() -> Self {
        Self {
            max_items: None,
            check_interval: DEFAULT_CHECK_INTERVAL,
        }
    }
}

impl ProcessLimits {
    /// No cap, default polling interval.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Set the item cap
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    /// Set the polling interval
    pub fn with_check_interval(mut self, interval: usize) -> Self {
        self.check_interval = interval;
        self
    }

    /// Number of items to process out of `total`, plus a truncation
    /// report when the cap is smaller than `total`.
    pub fn cap(&self, total: usize) -> (usize, Option<Truncation>) {
        match self.max_items {
            Some(max) if max < total => (
                max,
                Some(Truncation {
                    processed: max,
                    total,
                }),
            ),
            _ => (total, None),
        }
    }
}

/// Report that a cap stopped processing before the end of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    /// Items actually processed
    pub processed: usize,
    /// Items available in the input
    pub total: usize,
}

impl Truncation {
    /// Items left unprocessed.
    pub fn skipped(&self) -> usize {
        self.total.saturating_sub(self.processed)
    }
}

impl fmt::Display for Truncation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed {} of {} items ({} skipped)",
            self.processed,
            self.total,
            self.skipped()
        )
    }
}

/// Progress information passed to callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Name of the running pass
    pub stage: &'static str,
    /// Items processed so far
    pub current: usize,
    /// Items this pass will process
    pub total: usize,
}

impl Progress {
    /// Progress as a fraction (0.0 to 1.0).
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.current as f64 / self.total as f64
        }
    }

    /// Progress as a whole percentage.
    pub fn percent(&self) -> u32 {
        (self.fraction() * 100.0).floor() as u32
    }
}

/// Callback polled between chunks of work.
///
/// Returns `true` to continue, `false` to request cancellation.
pub type ProgressCallback<'a> = &'a mut dyn FnMut(&Progress) -> bool;

/// Polls a progress callback every `check_interval` items.
pub struct ProgressGate<'a> {
    stage: &'static str,
    total: usize,
    interval: usize,
    current: usize,
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressGate<'a> {
    /// Create a gate for a pass over `total` items.
    pub fn new(
        stage: &'static str,
        total: usize,
        limits: &ProcessLimits,
        callback: Option<ProgressCallback<'a>>,
    ) -> Self {
        Self {
            stage,
            total,
            interval: limits.check_interval,
            current: 0,
            callback,
        }
    }

    /// Gate that never polls.
    pub fn disabled(stage: &'static str) -> Self {
        Self {
            stage,
            total: 0,
            interval: 0,
            current: 0,
            callback: None,
        }
    }

    /// Start a new pass over `total` items with the same callback.
    ///
    /// Item counts passed to [`ProgressGate::tick`] restart from 1.
    pub fn next_pass(&mut self, stage: &'static str, total: usize) {
        self.stage = stage;
        self.total = total;
        self.current = 0;
    }

    /// Item count of the most recent [`ProgressGate::tick`] in this pass.
    pub fn last_tick(&self) -> usize {
        self.current
    }

    /// Record that `current` items are done.
    ///
    /// Returns `false` when the callback asked to cancel.
    pub fn tick(&mut self, current: usize) -> bool {
        self.current = current;
        if self.interval == 0 || current == 0 || current % self.interval != 0 {
            return true;
        }
        let progress = Progress {
            stage: self.stage,
            current,
            total: self.total,
        };
        debug!(
            stage = self.stage,
            current,
            total = self.total,
            "progress {}%",
            progress.percent()
        );
        match self.callback.as_mut() {
            Some(cb) => cb(&progress),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_without_limit() {
        let (n, t) = ProcessLimits::unlimited().cap(50);
        assert_eq!(n, 50);
        assert!(t.is_none());
    }

    #[test]
    fn test_cap_at_exact_total_is_not_truncation() {
        let (n, t) = ProcessLimits::default().with_max_items(50).cap(50);
        assert_eq!(n, 50);
        assert!(t.is_none());
    }

    #[test]
    fn test_truncation_display() {
        let t = Truncation {
            processed: 3,
            total: 5,
        };
        assert_eq!(t.skipped(), 2);
        assert_eq!(t.to_string(), "processed 3 of 5 items (2 skipped)");
    }

    #[test]
    fn test_gate_polls_on_interval() {
        let mut calls = 0;
        let mut cb = |_: &Progress| {
            calls += 1;
            true
        };
        let limits = ProcessLimits::default().with_check_interval(5);
        let mut gate = ProgressGate::new("t", 20, &limits, Some(&mut cb));
        for i in 0..=20 {
            assert!(gate.tick(i));
        }
        drop(gate);
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_gate_next_pass_tracks_ticks() {
        let mut seen = Vec::new();
        let mut cb = |p: &Progress| {
            seen.push((p.stage, p.current, p.total));
            p.stage == "first"
        };
        let limits = ProcessLimits::default().with_check_interval(2);
        let mut gate = ProgressGate::new("first", 3, &limits, Some(&mut cb));
        assert!(gate.tick(1) && gate.tick(2) && gate.tick(3));
        assert_eq!(gate.last_tick(), 3);
        gate.next_pass("second", 4);
        assert_eq!(gate.last_tick(), 0);
        assert!(gate.tick(1));
        assert!(!gate.tick(2));
        assert_eq!(gate.last_tick(), 2);
        drop(gate);
        assert_eq!(seen, vec![("first", 2, 3), ("second", 2, 4)]);
    }

    #[test]
    fn test_disabled_gate_never_cancels() {
        let mut gate = ProgressGate::disabled("t");
        assert!(gate.tick(10_000));
    }

    #[test]
    fn test_progress_percent() {
        let p = Progress {
            stage: "t",
            current: 1,
            total: 3,
        };
        assert_eq!(p.percent(), 33);
    }
}
