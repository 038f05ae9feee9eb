//! Text utilities shared by both alignment paths
//!
//! Canonical words are only ever compared through [`normalize_key`]; the
//! display text itself is never altered.

use std::sync::OnceLock;

use regex::Regex;

/// Comparison key for a token: lowercased with every non-alphanumeric
/// character removed. Returns `None` when nothing comparable remains
/// (e.g. a dash or an ellipsis).
pub fn normalize_key(token: &str) -> Option<String> {
    let normalized: String = token
        .chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Splits display text on runs of whitespace, keeping punctuation attached.
pub fn split_into_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Splits text into sentence units after `.`, `!` or `?` followed by
/// whitespace. Empty sentences are dropped.
pub fn split_into_sentences(text: &str) -> Vec<&str> {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    let boundary =
        BOUNDARY.get_or_init(|| Regex::new(r"[.!?]\s+").expect("sentence boundary regex"));

    let text = text.trim();
    let mut sentences = Vec::new();
    let mut last = 0;
    for found in boundary.find_iter(text) {
        // punctuation is a single ASCII byte and stays with its sentence
        let end = found.start() + 1;
        push_sentence(&mut sentences, &text[last..end]);
        last = found.end();
    }
    push_sentence(&mut sentences, &text[last..]);
    sentences
}

fn push_sentence<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_case_and_punctuation() {
        assert_eq!(normalize_key("U.K.").as_deref(), Some("uk"));
        assert_eq!(normalize_key("'Are").as_deref(), Some("are"));
        assert_eq!(normalize_key("month-on-month?").as_deref(), Some("monthonmonth"));
        assert_eq!(normalize_key("#1042").as_deref(), Some("1042"));
    }

    #[test]
    fn normalize_keeps_non_ascii_letters() {
        assert_eq!(normalize_key("Café,").as_deref(), Some("café"));
    }

    #[test]
    fn normalize_rejects_pure_punctuation() {
        assert_eq!(normalize_key("—"), None);
        assert_eq!(normalize_key("..."), None);
    }

    #[test]
    fn words_split_on_any_whitespace() {
        let words = split_into_words("  Not vibes.\tNot 'it feels\nbusy'. ");
        assert_eq!(words, vec!["Not", "vibes.", "Not", "'it", "feels", "busy'."]);
    }

    #[test]
    fn sentences_split_after_terminal_punctuation() {
        let sentences =
            split_into_sentences("Who owes us money? Stage 1 is done! Then 3.5 more. Finally");
        assert_eq!(
            sentences,
            vec!["Who owes us money?", "Stage 1 is done!", "Then 3.5 more.", "Finally"]
        );
    }

    #[test]
    fn sentences_ignore_blank_input() {
        assert!(split_into_sentences("   ").is_empty());
        assert_eq!(split_into_sentences("One."), vec!["One."]);
    }
}
