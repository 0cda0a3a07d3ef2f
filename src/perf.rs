//! Raster operation timing.
//!
//! Segment commits, snapshot encodes and decodes are the only places the
//! surface does real pixel work. This module times them:
//!
//! - **Scoped timers**: RAII-style timing that warns past a threshold
//! - **Operation statistics**: rolling per-operation averages and p95
//! - **Conditional compilation**: `profile_scope!` is zero-cost unless the
//!   `profiling` feature is enabled
//!
//! ```ignore
//! use signature_surface::profile_scope;
//!
//! fn snapshot_encode(&self) {
//!     profile_scope!("snapshot_encode");
//!     // ... encode ...
//! }
//! ```

use std::collections::VecDeque;
use std::time::Instant;
use tracing::warn;

/// Number of samples kept per operation
const STATS_SAMPLE_COUNT: usize = 100;

// ============================================================================
// Profiling Macro (zero-cost when disabled)
// ============================================================================

/// Time the enclosing scope with the given name. Zero-cost when the
/// `profiling` feature is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $crate::constants::SLOW_RASTER_OP_MS);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use crate::profile_scope;

// ============================================================================
// Operation Statistics
// ============================================================================

/// Rolling statistics for one operation kind.
#[derive(Debug, Clone)]
pub struct OperationStats {
    /// Recent timing samples in milliseconds
    samples: VecDeque<f64>,
    /// Total invocation count
    count: u64,
    max_ms: f64,
    /// Running sum of `samples`
    sum_ms: f64,
}

impl Default for OperationStats {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(STATS_SAMPLE_COUNT),
            count: 0,
            max_ms: 0.0,
            sum_ms: 0.0,
        }
    }
}

impl OperationStats {
    /// Record a new timing sample.
    pub fn record(&mut self, ms: f64) {
        if self.samples.len() >= STATS_SAMPLE_COUNT {
            if let Some(old) = self.samples.pop_front() {
                self.sum_ms -= old;
            }
        }
        self.samples.push_back(ms);
        self.sum_ms += ms;
        self.count += 1;
        self.max_ms = self.max_ms.max(ms);
    }

    /// Total number of recorded invocations (not capped by the sample window)
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn max(&self) -> f64 {
        self.max_ms
    }

    /// Average over the recent samples.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum_ms / self.samples.len() as f64
        }
    }

    /// 95th percentile over the recent samples.
    pub fn p95(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let idx = ((sorted.len() as f64) * 0.95).floor() as usize;
        sorted.get(idx.min(sorted.len() - 1)).copied().unwrap_or(0.0)
    }
}

// ============================================================================
// Scoped Timer
// ============================================================================

/// Warns through `tracing` when the guarded scope outlives its threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms > self.threshold_ms {
            warn!(
                operation = self.name,
                elapsed_ms = format!("{:.2}", elapsed_ms),
                threshold_ms = format!("{:.2}", self.threshold_ms),
                "Slow raster operation"
            );
        }
    }
}

// ============================================================================
// Timing Utilities
// ============================================================================

/// Measure execution time of a closure and return both the result and elapsed time.
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    (result, elapsed_ms)
}
