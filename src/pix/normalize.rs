//! Text normalization for payload values
//!
//! Field lengths are counted in bytes by readers, so every free-text value is
//! reduced to plain ASCII before its length is taken.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Strip diacritics and drop anything that is not ASCII
///
/// ```
/// use wedding::pix::strip_diacritics;
///
/// assert_eq!(strip_diacritics("São João"), "Sao Joao");
/// ```
pub fn strip_diacritics(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(char::is_ascii)
        .collect()
}

/// Longest prefix of `input` holding at most `max` characters
pub fn truncate_chars(input: &str, max: usize) -> &str {
    match input.char_indices().nth(max) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_accents() {
        assert_eq!(strip_diacritics("José"), "Jose");
        assert_eq!(strip_diacritics("Cafeteira Elétrica"), "Cafeteira Eletrica");
        assert_eq!(strip_diacritics("Conceição"), "Conceicao");
    }

    #[test]
    fn test_precomposed_and_decomposed_agree() {
        let precomposed = "\u{00E9}";
        let decomposed = "e\u{0301}";
        assert_eq!(strip_diacritics(precomposed), "e");
        assert_eq!(strip_diacritics(decomposed), "e");
    }

    #[test]
    fn test_non_latin_dropped() {
        assert_eq!(strip_diacritics("Kit 🎁 Churrasco"), "Kit  Churrasco");
    }

    #[test]
    fn test_ascii_untouched() {
        assert_eq!(strip_diacritics("Jogo de Panelas"), "Jogo de Panelas");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        assert_eq!(truncate_chars("ção", 2), "çã");
    }
}
