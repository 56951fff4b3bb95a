//! Error taxonomy for the scanning pipeline.
use std::path::PathBuf;
use thiserror::Error;

/// Every way a scan can go wrong.
///
/// Fatal variants (`Config`, `Enumeration`, `Sink`) abort the run before or
/// during scanning and are surfaced once to the caller. `FileRead` is
/// file-scoped: it is reported through the sink and the scan moves on to the
/// next file. `SignatureCompile` can only come out of the registry
/// constructor since the vendor table is fixed at build time.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot load config from {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("directory walk failed under {root}")]
    Enumeration {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("cannot read {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("vendor pattern for {vendor} failed to compile")]
    SignatureCompile {
        vendor: String,
        #[source]
        source: regex::Error,
    },

    #[error("report sink failure")]
    Sink(#[from] std::io::Error),
}
