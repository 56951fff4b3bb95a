//! Scan options, run statistics, and cancellation.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::walk::IgnoreMode;

/// Knobs for one scan run.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Worker count: `None` = one per CPU core, `Some(1)` = serial path.
    pub threads: Option<usize>,
    /// How ignore entries are compared against paths.
    pub ignore_mode: IgnoreMode,
}

/// Statistics for CLI summary output.
#[derive(Debug, Default, Clone)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub findings: usize,
    pub file_errors: usize,
    pub cancelled: bool,
}

/// Cooperative cancellation signal, checked at file and line granularity.
///
/// Cheap to clone and share across threads. Cancelling stops the scan
/// cleanly: findings already emitted stand, nothing partial is written
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
