//! Static secret-detection engine.
//!
//! Scans a directory tree of text files and flags lines likely to contain
//! leaked credentials. Scoring combines the Shannon entropy of each
//! whitespace token with contextual boosts from nearby keywords and
//! sensitive filenames; qualifying tokens are then tagged against a
//! registry of vendor credential formats.
//!
//! Design points:
//! - The vendor registry and the report sink are explicit values handed to
//!   the scanner, never process-wide globals.
//! - Per-file read failures are isolated and reported; only config,
//!   enumeration, and sink failures abort a run.
//! - The parallel path emits findings in exactly the serial order, so
//!   output is reproducible regardless of thread count.

mod config;
mod context;
mod entropy;
mod error;
mod findings;
mod options;
mod scan;
mod signatures;
mod sink;
mod walk;

pub use config::{ScanConfig, DEFAULT_FILE_NAME_WEIGHT, DEFAULT_KEYWORD_WEIGHT, DEFAULT_THRESHOLD};
pub use entropy::{shannon_entropy, MIN_TOKEN_LEN};
pub use error::ScanError;
pub use findings::Finding;
pub use options::{CancelToken, ScanOptions, ScanStats};
pub use scan::Scanner;
pub use signatures::{SignatureRegistry, VendorSignature};
pub use sink::{ColorSink, ConsoleSink, JsonLinesSink, MemorySink, ReportSink};
pub use walk::{find_all_files, IgnoreMode, DEFAULT_IGNORE};
