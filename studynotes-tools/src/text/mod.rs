//! Text helpers shared by extraction, prompting and rendering.

mod ascii;

pub use ascii::{fold_char, to_ascii};

/// Convert `\r\n` and lone `\r` line endings to `\n`
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Split `text` into consecutive pieces of at most `max_chars` characters.
///
/// Counts characters, not bytes, so multi-byte text never splits inside a
/// code point. Empty input yields no chunks. A `max_chars` of zero returns the
/// whole text as a single chunk.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    if max_chars == 0 {
        return vec![text.to_string()];
    }

    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_text_splits_on_character_count() {
        let chunks = chunk_text("abcdefghij", 4);
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_chunk_text_handles_multibyte() {
        let chunks = chunk_text("ééééé", 2);
        assert_eq!(chunks, vec!["éé", "éé", "é"]);
    }

    #[test]
    fn test_chunk_text_empty_and_zero() {
        assert!(chunk_text("", 500).is_empty());
        assert_eq!(chunk_text("abc", 0), vec!["abc"]);
        assert_eq!(chunk_text("abc", 500), vec!["abc"]);
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }
}
