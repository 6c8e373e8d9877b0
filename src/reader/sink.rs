//! Outcome sinks: where per-line results are delivered
//!
//! Every data line ends in exactly one call to [`OutcomeSink::on_success`] or
//! [`OutcomeSink::on_fail`]. Calls arrive from worker threads concurrently and
//! in no particular order; any serialization a sink needs is its own concern.

use crate::constants::SUCCESS_RATE_THRESHOLD;
use crate::error::ProcessingError;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Receiver of processing outcomes
pub trait OutcomeSink<T>: Sync {
    /// A line was assembled into a record
    fn on_success(&self, record: T);

    /// A line failed, or the file could not be read or bound
    fn on_fail(&self, error: ProcessingError);
}

impl<T, S: OutcomeSink<T> + ?Sized> OutcomeSink<T> for &S {
    fn on_success(&self, record: T) {
        (**self).on_success(record);
    }

    fn on_fail(&self, error: ProcessingError) {
        (**self).on_fail(error);
    }
}

/// Sink built from a pair of closures
pub struct CallbackSink<S, F> {
    on_success: S,
    on_fail: F,
}

impl<S, F> CallbackSink<S, F> {
    pub fn new<T>(on_success: S, on_fail: F) -> Self
    where
        S: Fn(T) + Sync,
        F: Fn(ProcessingError) + Sync,
    {
        Self {
            on_success,
            on_fail,
        }
    }
}

impl<T, S, F> OutcomeSink<T> for CallbackSink<S, F>
where
    S: Fn(T) + Sync,
    F: Fn(ProcessingError) + Sync,
{
    fn on_success(&self, record: T) {
        (self.on_success)(record);
    }

    fn on_fail(&self, error: ProcessingError) {
        (self.on_fail)(error);
    }
}

/// Summary of a completed load
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LoadSummary {
    /// Data lines that reached a terminal outcome
    pub total_lines: usize,

    /// Lines assembled into records
    pub records_loaded: usize,

    /// Lines that failed to assemble
    pub lines_failed: usize,

    /// File-level failures (unreadable file, missing header, schema mismatch)
    pub fatal_errors: usize,
}

impl LoadSummary {
    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            (self.records_loaded as f64 / self.total_lines as f64) * 100.0
        }
    }

    /// Check if loading was mostly successful and the file itself was usable
    pub fn is_successful(&self) -> bool {
        self.fatal_errors == 0 && self.success_rate() > SUCCESS_RATE_THRESHOLD
    }
}

/// Sink wrapper that tallies outcomes before forwarding them
#[derive(Debug, Default)]
pub struct CountingSink<S> {
    inner: S,
    records_loaded: AtomicUsize,
    lines_failed: AtomicUsize,
    fatal_errors: AtomicUsize,
}

impl<S> CountingSink<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            records_loaded: AtomicUsize::new(0),
            lines_failed: AtomicUsize::new(0),
            fatal_errors: AtomicUsize::new(0),
        }
    }

    /// Snapshot of the tallies so far
    pub fn summary(&self) -> LoadSummary {
        let records_loaded = self.records_loaded.load(Ordering::Relaxed);
        let lines_failed = self.lines_failed.load(Ordering::Relaxed);

        LoadSummary {
            total_lines: records_loaded + lines_failed,
            records_loaded,
            lines_failed,
            fatal_errors: self.fatal_errors.load(Ordering::Relaxed),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<T, S: OutcomeSink<T>> OutcomeSink<T> for CountingSink<S> {
    fn on_success(&self, record: T) {
        self.records_loaded.fetch_add(1, Ordering::Relaxed);
        self.inner.on_success(record);
    }

    fn on_fail(&self, error: ProcessingError) {
        if error.is_fatal() {
            self.fatal_errors.fetch_add(1, Ordering::Relaxed);
        } else {
            self.lines_failed.fetch_add(1, Ordering::Relaxed);
        }
        self.inner.on_fail(error);
    }
}

/// Sink that discards every outcome
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl<T> OutcomeSink<T> for DiscardSink {
    fn on_success(&self, _record: T) {}

    fn on_fail(&self, _error: ProcessingError) {}
}
