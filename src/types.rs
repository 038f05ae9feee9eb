//! Core types shared by the alignment engine and its collaborators

use serde::{Deserialize, Serialize};

/// Raw audio data representation (mono, f32 samples)
#[derive(Debug, Clone, Default)]
pub struct AudioData {
    /// Audio samples, normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz (e.g., 24000)
    pub sample_rate: u32,
}

impl AudioData {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Rendered length in seconds.
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// A piece of audio placed on a section timeline
#[derive(Debug, Clone)]
pub struct AudioChunk {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub start_time: f64, // position within the section
    pub end_time: f64,
}

/// A word emitted by a speech recognizer with its start time
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedWord {
    pub text: String,
    pub start_time: f64, // seconds
}

impl RecognizedWord {
    pub fn new(text: impl Into<String>, start_time: f64) -> Self {
        Self {
            text: text.into(),
            start_time,
        }
    }
}

/// One canonical word with the time its highlight should begin.
///
/// `start` is kept at full precision; rounding to milliseconds happens when
/// the result is serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedWord {
    pub word: String,
    #[serde(serialize_with = "serialize_millis")]
    pub start: f64,
}

impl TimedWord {
    pub fn new(word: impl Into<String>, start: f64) -> Self {
        Self {
            word: word.into(),
            start,
        }
    }
}

/// Ordered timing for one section, index-aligned with its canonical words
pub type AlignmentResult = Vec<TimedWord>;

/// Round seconds to millisecond precision.
pub fn round_millis(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}

fn serialize_millis<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(round_millis(*value))
}

/// Higher-level block of a section read as its own run of sentences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Title,
    Subtitle,
    Body,
}

/// Independently timed content unit
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub content: String,
}

impl Section {
    /// Segments in reading order; the subtitle only appears when present.
    pub fn segments(&self) -> Vec<(SegmentKind, &str)> {
        let mut segments = vec![(SegmentKind::Title, self.title.as_str())];
        if let Some(subtitle) = self.subtitle.as_deref().filter(|s| !s.trim().is_empty()) {
            segments.push((SegmentKind::Subtitle, subtitle));
        }
        segments.push((SegmentKind::Body, self.content.as_str()));
        segments
    }

    /// Display-exact word list the UI highlights, title through body.
    pub fn canonical_words(&self) -> Vec<String> {
        self.segments()
            .into_iter()
            .flat_map(|(_, text)| crate::text::split_into_words(text))
            .collect()
    }
}
