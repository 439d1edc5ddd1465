//! Performance instrumentation for the drag hot paths.
//!
//! Placeholder recomputation runs once per frame for as long as a drag lasts,
//! so its cost must stay well inside a frame. `profile_scope!` times a block
//! and warns when it overruns its budget.
//!
//! ## Usage
//!
//! Enable profiling with the `profiling` feature flag:
//! ```toml
//! [dependencies]
//! laneboard = { features = ["profiling"] }
//! ```
//!
//! ```ignore
//! fn flush() {
//!     profile_scope!("placeholder_flush");        // frame budget
//!     profile_scope!("commit_move", 4.0);         // explicit budget in ms
//! }
//! ```

use crate::constants::FRAME_BUDGET_MS;
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
use tracing::{trace, warn};

/// Global flag to enable/disable profiling at runtime
static PROFILING_ENABLED: AtomicBool = AtomicBool::new(cfg!(feature = "profiling"));

// ============================================================================
// Profiling Macros (zero-cost when disabled)
// ============================================================================

/// Time a scope. Zero-cost unless the `profiling` feature is enabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
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
// Runtime Profiling Control
// ============================================================================

/// Enable or disable profiling at runtime.
/// Only affects code compiled with the `profiling` feature.
pub fn set_profiling_enabled(enabled: bool) {
    PROFILING_ENABLED.store(enabled, Ordering::Relaxed);
}

#[inline]
pub fn is_profiling_enabled() -> bool {
    PROFILING_ENABLED.load(Ordering::Relaxed)
}

// ============================================================================
// Scoped Timer
// ============================================================================

/// Logs how long it lived when dropped; warns past its threshold.
///
/// `std::time::Instant` panics on `wasm32-unknown-unknown`, so there the
/// timer keeps no clock and always reads zero.
pub struct ScopedTimer {
    name: &'static str,
    #[cfg(not(target_arch = "wasm32"))]
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            #[cfg(not(target_arch = "wasm32"))]
            start: Instant::now(),
            threshold_ms,
        }
    }

    /// Timer budgeted at one frame.
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, FRAME_BUDGET_MS)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    #[cfg(target_arch = "wasm32")]
    pub fn elapsed_ms(&self) -> f64 {
        0.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if !is_profiling_enabled() {
            return;
        }
        let ms = self.elapsed_ms();
        if ms > self.threshold_ms {
            warn!(
                operation = self.name,
                elapsed_ms = format!("{:.2}", ms),
                budget_ms = format!("{:.2}", self.threshold_ms),
                "Operation over budget"
            );
        } else {
            trace!(operation = self.name, elapsed_ms = format!("{:.3}", ms), "Operation timed");
        }
    }
}
