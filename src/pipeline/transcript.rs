//! Recognition path: time an existing narration by transcribing it

use anyhow::{Context, Result};
use tracing::debug;

use crate::alignment::{align_recognized_words, AlignmentConfig, TimelineAccumulator};
use crate::audio::resample::for_recognizer;
use crate::transcription::Recognizer;
use crate::types::{AlignmentResult, AudioData, Section};

/// Align a section's canonical words to its recorded narration.
///
/// The whole recording is one segment of the section timeline, so
/// recognized timestamps are already section-global.
pub fn align_section_audio<R>(
    section: &Section,
    audio: &AudioData,
    recognizer: &mut R,
    config: &AlignmentConfig,
) -> Result<AlignmentResult>
where
    R: Recognizer + ?Sized,
{
    let canonical = section.canonical_words();
    let prepared = for_recognizer(audio).context("Failed to prepare audio for recognition")?;
    let recognized = recognizer
        .recognize(&prepared)
        .with_context(|| format!("Speech recognition failed for section {}", section.id))?;
    debug!(
        section = %section.id,
        canonical = canonical.len(),
        recognized = recognized.len(),
        "aligning recognized words"
    );

    let aligned = align_recognized_words(&canonical, &recognized, config.window_size);
    let mut timeline = TimelineAccumulator::new(config);
    timeline.place_sentence(aligned, audio.duration());
    Ok(timeline.finish())
}
