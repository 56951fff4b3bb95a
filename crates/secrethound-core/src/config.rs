//! Scan configuration loading (TOML).
use serde::Deserialize;
use std::path::Path;

use crate::error::ScanError;

/// Default qualification threshold: seed + entropy must exceed this for a
/// token to be reported.
pub const DEFAULT_THRESHOLD: f64 = 4.8;
/// Default boost when a configured keyword appears in the line.
pub const DEFAULT_KEYWORD_WEIGHT: f64 = 0.2;
/// Default boost when the file's base name contains a configured substring.
pub const DEFAULT_FILE_NAME_WEIGHT: f64 = 0.2;

/// Top-level config file structure.
///
/// The on-disk schema keeps the original `[tracker]` table and camelCase
/// field names so existing config files keep working.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    tracker: ScanConfig,
}

/// Configuration for one scan run.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanConfig {
    /// Keywords that raise the prior for a line (checked case-insensitively,
    /// in order, first match wins). Lower-cased at load time.
    pub keywords: Vec<String>,
    /// File base-name substrings that raise the prior for a whole file.
    pub file_names: Vec<String>,
    /// Informational only. The scan root is always the directory handed to
    /// the scanner, typically the process working directory.
    pub repo_path: Option<String>,
    /// Parsed but not consulted by any matching logic yet. Intent (suppress
    /// findings? skip paths?) is still undecided, so nothing reads it.
    pub whitelist: Vec<String>,
    /// Findings require seed + entropy strictly above this.
    pub threshold: f64,
    /// Seed added once when a keyword matches the line.
    pub keyword_weight: f64,
    /// Seed added once when the base name matches.
    pub file_name_weight: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            file_names: Vec::new(),
            repo_path: None,
            whitelist: Vec::new(),
            threshold: DEFAULT_THRESHOLD,
            keyword_weight: DEFAULT_KEYWORD_WEIGHT,
            file_name_weight: DEFAULT_FILE_NAME_WEIGHT,
        }
    }
}

impl ScanConfig {
    /// Load from a TOML file. Any I/O or parse failure is fatal.
    pub fn load(path: &Path) -> Result<Self, ScanError> {
        let txt = std::fs::read_to_string(path).map_err(|e| ScanError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let parsed: ConfigFile = toml::from_str(&txt).map_err(|e| ScanError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(parsed.tracker.normalized())
    }

    /// Lower-case keywords once so per-line matching only lower-cases the
    /// line.
    fn normalized(mut self) -> Self {
        for kw in &mut self.keywords {
            *kw = kw.to_lowercase();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_schema_with_defaults() {
        let toml = r#"
            [tracker]
            keywords = ["Secret", "password"]
            fileNames = [".pem", "credentials"]
            repoPath = "/srv/repo"
            whitelist = ["EXAMPLE_KEY"]
        "#;
        let parsed: ConfigFile = toml::from_str(toml).unwrap();
        let cfg = parsed.tracker.normalized();
        assert_eq!(cfg.keywords, vec!["secret", "password"]);
        assert_eq!(cfg.file_names, vec![".pem", "credentials"]);
        assert_eq!(cfg.repo_path.as_deref(), Some("/srv/repo"));
        assert_eq!(cfg.whitelist, vec!["EXAMPLE_KEY"]);
        assert_eq!(cfg.threshold, DEFAULT_THRESHOLD);
        assert_eq!(cfg.keyword_weight, DEFAULT_KEYWORD_WEIGHT);
        assert_eq!(cfg.file_name_weight, DEFAULT_FILE_NAME_WEIGHT);
    }

    #[test]
    fn tunables_can_be_overridden() {
        let toml = r#"
            [tracker]
            threshold = 4.0
            keywordWeight = 0.5
            fileNameWeight = 0.1
        "#;
        let parsed: ConfigFile = toml::from_str(toml).unwrap();
        assert_eq!(parsed.tracker.threshold, 4.0);
        assert_eq!(parsed.tracker.keyword_weight, 0.5);
        assert_eq!(parsed.tracker.file_name_weight, 0.1);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let parsed: ConfigFile = toml::from_str("").unwrap();
        assert!(parsed.tracker.keywords.is_empty());
        assert_eq!(parsed.tracker.threshold, DEFAULT_THRESHOLD);
    }
}
