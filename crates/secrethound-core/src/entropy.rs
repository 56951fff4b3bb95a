//! Shannon entropy over token bytes.

/// Tokens shorter than this carry too little information to tell a secret
/// from noise; they contribute zero entropy (seed-only score).
pub const MIN_TOKEN_LEN: usize = 10;

/// Combined score for one token: `seed` plus the Shannon entropy of the
/// token's byte-value histogram.
///
/// For each byte value present, with p its frequency within the token, the
/// entropy term accumulates `-p * log2(p)`. The term is always >= 0, so the
/// result never drops below the seed. Empty and short tokens return the
/// seed unchanged.
pub fn shannon_entropy(token: &str, seed: f64) -> f64 {
    if token.len() < MIN_TOKEN_LEN {
        return seed;
    }

    let bytes = token.as_bytes();
    let mut counts = [0usize; 256];
    for &b in bytes {
        counts[b as usize] += 1;
    }

    let len = bytes.len() as f64;
    let mut entropy = seed;
    for &c in counts.iter() {
        if c > 0 {
            let p = c as f64 / len;
            entropy -= p * p.log2();
        }
    }
    entropy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_THRESHOLD;

    #[test]
    fn short_token_scores_seed_only() {
        assert_eq!(shannon_entropy("", 0.3), 0.3);
        assert_eq!(shannon_entropy("abcdefghi", 0.4), 0.4); // 9 chars
        assert_eq!(shannon_entropy("x", 0.0), 0.0);
    }

    #[test]
    fn repeated_byte_has_zero_entropy() {
        for len in [10, 17, 64, 500] {
            let token = "a".repeat(len);
            assert_eq!(shannon_entropy(&token, 0.0), 0.0);
            assert_eq!(shannon_entropy(&token, 0.2), 0.2);
        }
    }

    #[test]
    fn ten_a_token_is_below_threshold() {
        let score = shannon_entropy("aaaaaaaaaa", 0.0);
        assert_eq!(score, 0.0);
        assert!(score <= DEFAULT_THRESHOLD);
    }

    #[test]
    fn twenty_distinct_bytes_score_log2_of_20() {
        let token = "abcdefghijklmnopqrst"; // 20 distinct chars, once each
        let score = shannon_entropy(token, 0.0);
        let expected = (20.0f64).log2();
        assert!((score - expected).abs() < 1e-9);
        assert!(score < DEFAULT_THRESHOLD);
    }

    #[test]
    fn seed_shifts_a_near_threshold_token_over() {
        // 28 distinct bytes: log2(28) ~ 4.807 > 4.8 on its own.
        let token: String = ('a'..='z').chain(['0', '1']).collect();
        assert_eq!(token.len(), 28);
        assert!(shannon_entropy(&token, 0.0) > DEFAULT_THRESHOLD);

        // 26 distinct bytes: log2(26) ~ 4.70, qualifies only with the seed.
        let token: String = ('a'..='z').collect();
        assert!(shannon_entropy(&token, 0.0) < DEFAULT_THRESHOLD);
        assert!(shannon_entropy(&token, 0.2) > DEFAULT_THRESHOLD);
    }
}
