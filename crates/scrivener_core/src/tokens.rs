//! Heuristic token estimation.

/// Estimate the token count of `text` as `ceil(chars / 4)`.
///
/// This is the only estimator in the workspace: stored `tokens_used` values
/// and the in-session total both come from here.
///
/// # Examples
///
/// ```
/// use scrivener_core::estimate_tokens;
///
/// assert_eq!(estimate_tokens(""), 0);
/// assert_eq!(estimate_tokens("abcd"), 1);
/// assert_eq!(estimate_tokens("abcde"), 2);
/// ```
pub fn estimate_tokens(text: &str) -> u32 {
    let chars = text.chars().count();
    chars.div_ceil(4) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_boundaries() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("a"), 1);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        assert_eq!(estimate_tokens("abcdefgh"), 2);
        assert_eq!(estimate_tokens("abcdefghi"), 3);
    }

    #[test]
    fn test_estimate_counts_characters_not_bytes() {
        // Four two-byte characters
        assert_eq!(estimate_tokens("éééé"), 1);
        assert_eq!(estimate_tokens("日本語です!"), 2);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let text = "The quick brown fox jumps over the lazy dog";
        assert_eq!(estimate_tokens(text), estimate_tokens(text));
        assert_eq!(estimate_tokens(text), 11);
    }
}
