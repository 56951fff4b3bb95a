//! Finding record.
use serde::Serialize;
use std::path::PathBuf;

/// One reported candidate secret occurrence.
///
/// Emitted once per qualifying token, never revised or deduplicated: two
/// identical qualifying tokens on one line produce two findings. `vendors`
/// holds the regex-matched signature tags; `mentions` is the separate
/// informational hint listing vendor names that appear in the line text.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub path: PathBuf,
    /// 1-based line number.
    pub line: u64,
    /// The trimmed line text.
    pub text: String,
    /// seed + Shannon entropy of the qualifying token.
    pub score: f64,
    pub vendors: Vec<String>,
    pub mentions: Vec<String>,
    pub keyword: Option<String>,
}
