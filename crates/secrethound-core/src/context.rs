//! Contextual score boost ("seed") from keyword and filename heuristics.
use std::path::Path;

use crate::config::ScanConfig;

/// Compute the seed for one line of one file.
///
/// Two independent boosts, each applied at most once:
/// - `keyword_weight` if the lower-cased line contains any configured
///   keyword, taking the first keyword in config order;
/// - `file_name_weight` if the file's base name contains any configured
///   filename substring.
///
/// Proximity to a word like "secret" or a sensitive filename raises the
/// prior that a nearby high-entropy token is a real credential, effectively
/// lowering the entropy bar for that line. Returns the matched keyword (if
/// any) and the numeric seed.
pub fn seed<'a>(line: &str, path: &Path, config: &'a ScanConfig) -> (Option<&'a str>, f64) {
    let lower = line.to_lowercase();
    let mut seed = 0.0;
    let mut key = None;

    for keyword in &config.keywords {
        if lower.contains(keyword.as_str()) {
            seed += config.keyword_weight;
            key = Some(keyword.as_str());
            break;
        }
    }

    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        for file_name in &config.file_names {
            if name.contains(file_name.as_str()) {
                seed += config.file_name_weight;
                break;
            }
        }
    }

    (key, seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn config() -> ScanConfig {
        ScanConfig {
            keywords: vec!["secret".into(), "password".into(), "token".into()],
            file_names: vec![".pem".into(), "credentials".into()],
            ..ScanConfig::default()
        }
    }

    #[test]
    fn keyword_boost_is_applied_once() {
        let cfg = config();
        let path = Path::new("src/main.rs");
        // Three configured keywords on one line still add exactly 0.2.
        let (key, s) = seed("secret password token = abc", path, &cfg);
        assert_eq!(key, Some("secret"));
        assert_eq!(s, 0.2);
    }

    #[test]
    fn first_keyword_in_config_order_wins() {
        let cfg = config();
        let (key, _) = seed("token before password", Path::new("a.txt"), &cfg);
        assert_eq!(key, Some("password"));
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let cfg = config();
        let (key, s) = seed("export SECRET=xyz", Path::new("a.txt"), &cfg);
        assert_eq!(key, Some("secret"));
        assert_eq!(s, 0.2);
    }

    #[test]
    fn filename_boost_stacks_with_keyword_boost() {
        let cfg = config();
        let path = Path::new("deploy/credentials.txt");
        let (key, s) = seed("password=hunter2", path, &cfg);
        assert_eq!(key, Some("password"));
        assert_eq!(s, 0.4);

        let (key, s) = seed("nothing here", path, &cfg);
        assert_eq!(key, None);
        assert_eq!(s, 0.2);
    }

    #[test]
    fn filename_matching_uses_base_name_only() {
        let cfg = config();
        // Directory named credentials must not trigger the filename boost.
        let (_, s) = seed("plain line", Path::new("credentials/readme.md"), &cfg);
        assert_eq!(s, 0.0);
    }

    #[test]
    fn no_match_means_zero_seed() {
        let cfg = config();
        let (key, s) = seed("let x = 1;", Path::new("src/lib.rs"), &cfg);
        assert_eq!(key, None);
        assert_eq!(s, 0.0);
    }
}
