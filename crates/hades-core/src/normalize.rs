//! Mapping raw document bytes to the representation the scorer compares

use crate::config::LineBreakPolicy;
use crate::error::{HadesError, Result};

/// Turns raw document content into comparable text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    line_breaks: LineBreakPolicy,
}

impl Normalizer {
    pub fn new(line_breaks: LineBreakPolicy) -> Self {
        Normalizer { line_breaks }
    }

    pub fn line_breaks(&self) -> LineBreakPolicy {
        self.line_breaks
    }

    /// Decode raw bytes as UTF-8 text.
    ///
    /// `id` names the document in the error when decoding fails.
    pub fn decode(&self, id: &str, bytes: Vec<u8>) -> Result<String> {
        String::from_utf8(bytes).map_err(|_| HadesError::Decode { id: id.to_string() })
    }

    /// Normalize decoded text into the character sequence used for scoring
    pub fn normalize(&self, text: &str) -> Vec<char> {
        match self.line_breaks {
            LineBreakPolicy::Strip => text.chars().filter(|c| !is_line_break(*c)).collect(),
            LineBreakPolicy::Keep => text.chars().collect(),
        }
    }
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_removes_all_line_breaks() {
        let normalizer = Normalizer::default();
        let normalized: String = normalizer.normalize("ab\ncd\r\nef\r").into_iter().collect();
        assert_eq!(normalized, "abcdef");
    }

    #[test]
    fn test_strip_joins_lines_into_contiguous_text() {
        let normalizer = Normalizer::new(LineBreakPolicy::Strip);
        let normalized: String = normalizer.normalize("foo\nbar").into_iter().collect();
        assert_eq!(normalized, "foobar");
    }

    #[test]
    fn test_keep_leaves_content_alone() {
        let normalizer = Normalizer::new(LineBreakPolicy::Keep);
        let normalized: String = normalizer.normalize("a\nb\r\n").into_iter().collect();
        assert_eq!(normalized, "a\nb\r\n");
    }

    #[test]
    fn test_normalize_counts_scalar_values() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.normalize("héllo\n"), vec!['h', 'é', 'l', 'l', 'o']);
    }

    #[test]
    fn test_decode_error_names_document() {
        let normalizer = Normalizer::default();
        let err = normalizer
            .decode("corpus/bad.bin", vec![0xff, 0xfe, 0x00])
            .unwrap_err();
        assert!(matches!(err, HadesError::Decode { ref id } if id == "corpus/bad.bin"));
    }
}
