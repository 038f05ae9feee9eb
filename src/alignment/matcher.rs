//! Windowed fuzzy matching of recognized words onto canonical words
//!
//! A forward-only cursor walks the recognized stream. Each canonical word
//! looks at most `window_size` unconsumed recognized words ahead and takes
//! the first one whose normalized key equals, contains, or is contained in
//! its own. Recognized words skipped over by a match are consumed. A
//! canonical word without a match inherits the previous emitted start (or
//! 0.0) and leaves the cursor where it was.

use tracing::debug;

use crate::text::normalize_key;
use crate::types::{AlignmentResult, RecognizedWord, TimedWord};

/// Align a time-ordered recognized word stream to the canonical words.
///
/// The result always has one entry per canonical word, in canonical order,
/// carrying the canonical text.
pub fn align_recognized_words<S: AsRef<str>>(
    canonical: &[S],
    recognized: &[RecognizedWord],
    window_size: usize,
) -> AlignmentResult {
    let recognized_keys: Vec<Option<String>> = recognized
        .iter()
        .map(|word| normalize_key(&word.text))
        .collect();

    let mut aligned = Vec::with_capacity(canonical.len());
    let mut cursor = 0usize;
    let mut fallbacks = 0usize;

    for (idx, word) in canonical.iter().enumerate() {
        let word = word.as_ref();
        let window_end = cursor.saturating_add(window_size).min(recognized.len());
        let hit = normalize_key(word).and_then(|key| {
            (cursor..window_end).find(|&i| {
                recognized_keys[i]
                    .as_deref()
                    .is_some_and(|candidate| keys_match(&key, candidate))
            })
        });

        match hit {
            Some(i) => {
                aligned.push(TimedWord::new(word, recognized[i].start_time));
                cursor = i + 1;
            }
            None => {
                let start = aligned.last().map(|prev: &TimedWord| prev.start).unwrap_or(0.0);
                debug!(index = idx, word, cursor, start, "no recognized match in window");
                aligned.push(TimedWord::new(word, start));
                fallbacks += 1;
            }
        }
    }

    debug!(
        canonical = canonical.len(),
        recognized = recognized.len(),
        fallbacks,
        "recognized words aligned"
    );
    aligned
}

fn keys_match(canonical: &str, candidate: &str) -> bool {
    canonical == candidate || candidate.contains(canonical) || canonical.contains(candidate)
}
