//! Word timing alignment engine
//!
//! Two independent strategies produce the same output shape, one
//! [`TimedWord`](crate::types::TimedWord) per canonical word in canonical
//! order:
//! - [`matcher`] aligns a recognizer's word stream against the canonical words.
//! - [`weighting`] estimates word offsets inside a synthesized sentence.
//!
//! [`timeline`] stitches per-sentence results into one section timeline.

pub mod matcher;
pub mod timeline;
pub mod weighting;

use anyhow::{ensure, Result};
use serde::Deserialize;

pub use matcher::align_recognized_words;
pub use timeline::TimelineAccumulator;
pub use weighting::{estimate_sentence_timing, trimmed_length, SentenceTiming};

/// Policy constants for both alignment paths
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Lookahead of unconsumed recognized words tried per canonical word
    pub window_size: usize,
    /// Silence after every sentence, in seconds
    pub sentence_gap: f64,
    /// Extra silence after every title/subtitle/body segment, in seconds
    pub segment_gap: f64,
    /// Trim threshold in dB below the isolated render's peak
    pub trim_top_db: f32,
    /// Weight given per character when an isolated word cannot be measured
    pub fallback_samples_per_char: usize,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            window_size: 10,
            sentence_gap: 0.3,
            segment_gap: 0.2,
            trim_top_db: 30.0,
            fallback_samples_per_char: 1_000,
        }
    }
}

impl AlignmentConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.window_size > 0, "window_size must be greater than zero");
        ensure!(
            self.sentence_gap.is_finite() && self.sentence_gap >= 0.0,
            "sentence_gap must be a non-negative number of seconds"
        );
        ensure!(
            self.segment_gap.is_finite() && self.segment_gap >= 0.0,
            "segment_gap must be a non-negative number of seconds"
        );
        ensure!(
            self.trim_top_db.is_finite() && self.trim_top_db > 0.0,
            "trim_top_db must be positive"
        );
        ensure!(
            self.fallback_samples_per_char > 0,
            "fallback_samples_per_char must be greater than zero"
        );
        Ok(())
    }
}
