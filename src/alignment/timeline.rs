use crate::types::{AlignmentResult, TimedWord};

use super::AlignmentConfig;

/// Running section timeline.
///
/// Sentence results arrive with starts relative to their own sentence; the
/// accumulator shifts them by the offset in effect when the sentence began,
/// then advances past the sentence and its trailing silence. One accumulator
/// belongs to one section.
#[derive(Debug, Clone)]
pub struct TimelineAccumulator {
    offset: f64,
    sentence_gap: f64,
    segment_gap: f64,
    words: AlignmentResult,
}

impl TimelineAccumulator {
    pub fn new(config: &AlignmentConfig) -> Self {
        Self {
            offset: 0.0,
            sentence_gap: config.sentence_gap,
            segment_gap: config.segment_gap,
            words: Vec::new(),
        }
    }

    /// Offset the next sentence will start at, in seconds.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Place a sentence's words and advance past its duration and gap.
    /// Returns the offset the sentence was placed at.
    pub fn place_sentence<I>(&mut self, local_words: I, duration: f64) -> f64
    where
        I: IntoIterator<Item = TimedWord>,
    {
        let start = self.offset;
        self.words.extend(
            local_words
                .into_iter()
                .map(|word| TimedWord::new(word.word, start + word.start)),
        );
        self.offset += duration.max(0.0) + self.sentence_gap;
        start
    }

    /// Sentence that produced no audio: its words all sit at the current
    /// offset and only the sentence gap is added.
    pub fn place_unrendered<S: AsRef<str>>(&mut self, words: &[S]) -> f64 {
        let local = words.iter().map(|word| TimedWord::new(word.as_ref(), 0.0));
        self.place_sentence(local, 0.0)
    }

    /// Close a title, subtitle or body segment, even an empty one.
    pub fn end_segment(&mut self) {
        self.offset += self.segment_gap;
    }

    pub fn finish(self) -> AlignmentResult {
        self.words
    }
}
