//! Output statistics shown beneath a generation.

use derive_getters::Getters;
use serde::Serialize;

/// Character, word and token counts for a piece of generated text.
///
/// # Examples
///
/// ```
/// use scrivener_core::OutputStats;
///
/// let stats = OutputStats::of("  Hello,   world!\n");
/// assert_eq!(*stats.words(), 2);
/// assert_eq!(*stats.characters(), 18);
/// assert_eq!(*stats.tokens(), 5);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Getters, derive_more::Display,
)]
#[display("{} characters, {} words, ~{} tokens", characters, words, tokens)]
pub struct OutputStats {
    /// Number of characters
    characters: usize,
    /// Number of whitespace-separated words
    words: usize,
    /// Heuristic token estimate
    tokens: u32,
}

impl OutputStats {
    /// Compute statistics for `text`.
    pub fn of(text: &str) -> Self {
        Self {
            characters: text.chars().count(),
            words: text.split_whitespace().count(),
            tokens: crate::estimate_tokens(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_no_words() {
        let stats = OutputStats::of("");
        assert_eq!(stats, OutputStats::default());

        let blank = OutputStats::of(" \n\t ");
        assert_eq!(*blank.words(), 0);
        assert_eq!(*blank.characters(), 4);
    }

    #[test]
    fn test_display_format() {
        let stats = OutputStats::of("one two three");
        assert_eq!(stats.to_string(), "13 characters, 3 words, ~4 tokens");
    }
}
