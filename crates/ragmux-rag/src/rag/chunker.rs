//! Word-window text chunker.

use crate::{Error, Result};

/// Splits text into bounded word-count windows before ingestion.
///
/// The split partitions whitespace-delimited words left to right with no
/// overlap and no dropped words; only the last chunk may be short. The
/// output is whitespace-normalized: rejoining the chunks with single
/// spaces reproduces the normalized input.
#[derive(Debug, Clone)]
pub struct Chunker {
    word_limit: usize,
}

impl Chunker {
    /// Creates a new chunker.
    ///
    /// Fails with [`Error::InvalidInput`] when `word_limit` is zero.
    pub fn new(word_limit: usize) -> Result<Self> {
        if word_limit == 0 {
            return Err(Error::invalid_input("word limit must be positive"));
        }
        Ok(Self { word_limit })
    }

    /// Returns the configured word limit.
    pub fn word_limit(&self) -> usize {
        self.word_limit
    }

    /// Splits `text` into chunks of at most `word_limit` words.
    ///
    /// Empty or whitespace-only text yields no chunks; rejecting such
    /// input is the caller's concern.
    pub fn split(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        words
            .chunks(self.word_limit)
            .map(|window| window.join(" "))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_word_limit() {
        assert!(matches!(Chunker::new(0), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn splits_into_word_windows() {
        let chunker = Chunker::new(2).unwrap();
        assert_eq!(chunker.split("a b c d e"), ["a b", "c d", "e"]);
    }

    #[test]
    fn short_text_yields_a_single_chunk() {
        let chunker = Chunker::new(100).unwrap();
        assert_eq!(chunker.split("just a few words"), ["just a few words"]);
    }

    #[test]
    fn whitespace_is_normalized_without_dropping_words() {
        let chunker = Chunker::new(3).unwrap();
        let chunks = chunker.split("  one \t two\nthree   four five  ");

        assert_eq!(chunks, ["one two three", "four five"]);
        assert!(chunks.iter().all(|c| c.split_whitespace().count() <= 3));
        assert_eq!(chunks.join(" "), "one two three four five");
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let chunker = Chunker::new(5).unwrap();
        assert!(chunker.split("").is_empty());
        assert!(chunker.split("   \n ").is_empty());
    }

    #[test]
    fn rejoining_reproduces_normalized_text() {
        let chunker = Chunker::new(4).unwrap();
        let text = "the quick brown fox jumps over the lazy dog";

        let chunks = chunker.split(text);
        assert_eq!(chunks.join(" "), text);
    }
}
