//! Section batches for both alignment paths
//!
//! Sections are independent alignment problems: each gets its own timeline
//! and its own output file. A section that cannot be processed is logged and
//! recorded as skipped; the rest of the batch carries on.

pub mod narration;
pub mod transcript;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use tracing::{info, warn};

use crate::alignment::AlignmentConfig;
use crate::audio::{decode_audio, encode_audio, find_section_audio};
use crate::output::write_timing;
use crate::synthesis::Synthesizer;
use crate::transcription::Recognizer;
use crate::types::Section;

pub use narration::{narrate_section, SectionNarration};
pub use transcript::align_section_audio;

/// Outcome of one batch
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Timing files written, in processing order
    pub written: Vec<PathBuf>,
    /// Section ids that produced no output, with the reason
    pub skipped: Vec<(String, String)>,
}

impl BatchReport {
    fn record(&mut self, id: &str, outcome: Result<PathBuf>) {
        match outcome {
            Ok(path) => {
                info!(section = id, path = %path.display(), "timing written");
                self.written.push(path);
            }
            Err(err) => self.skip(id, format!("{err:#}")),
        }
    }

    /// Record a section that produced no output.
    pub fn skip(&mut self, id: &str, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(section = id, reason = %reason, "skipping section");
        self.skipped.push((id.to_string(), reason));
    }
}

/// Time existing narration files with a speech recognizer.
///
/// Audio is looked up as `<audio_dir>/<id>.<ext>`; timing goes to
/// `<out_dir>/<id>.json`.
pub fn run_transcript_batch<R>(
    sections: &[&Section],
    audio_dir: &Path,
    out_dir: &Path,
    recognizer: &mut R,
    config: &AlignmentConfig,
) -> BatchReport
where
    R: Recognizer + ?Sized,
{
    let mut report = BatchReport::default();
    for section in sections {
        let outcome = transcribe_one(section, audio_dir, out_dir, recognizer, config);
        report.record(&section.id, outcome);
    }
    report
}

/// Narrate sections with a synthesizer, writing `<id>.wav` and `<id>.json`.
pub fn run_narration_batch<T>(
    sections: &[&Section],
    out_dir: &Path,
    synthesizer: &mut T,
    config: &AlignmentConfig,
) -> BatchReport
where
    T: Synthesizer + ?Sized,
{
    let mut report = BatchReport::default();
    for section in sections {
        let outcome = narrate_one(section, out_dir, synthesizer, config);
        report.record(&section.id, outcome);
    }
    report
}

fn transcribe_one<R>(
    section: &Section,
    audio_dir: &Path,
    out_dir: &Path,
    recognizer: &mut R,
    config: &AlignmentConfig,
) -> Result<PathBuf>
where
    R: Recognizer + ?Sized,
{
    ensure_words(section)?;
    let audio_path = find_section_audio(audio_dir, &section.id)
        .ok_or_else(|| anyhow!("no audio for section {} in {:?}", section.id, audio_dir))?;
    let audio = decode_audio(&audio_path)?;
    let timing = align_section_audio(section, &audio, recognizer, config)?;
    write_timing(out_dir, &section.id, &timing)
}

fn narrate_one<T>(
    section: &Section,
    out_dir: &Path,
    synthesizer: &mut T,
    config: &AlignmentConfig,
) -> Result<PathBuf>
where
    T: Synthesizer + ?Sized,
{
    ensure_words(section)?;
    let narration = narrate_section(section, synthesizer, config);
    let audio = narration
        .audio
        .ok_or_else(|| anyhow!("no sentence of section {} could be synthesized", section.id))?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {:?}", out_dir))?;
    let wav_path = out_dir.join(format!("{}.wav", section.id));
    encode_audio(&audio, &wav_path)?;
    write_timing(out_dir, &section.id, &narration.timing)
}

fn ensure_words(section: &Section) -> Result<()> {
    if section.canonical_words().is_empty() {
        bail!("section {} has no words to align", section.id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AudioData, RecognizedWord};
    use tempfile::tempdir;

    struct Echo;

    impl Recognizer for Echo {
        fn recognize(&mut self, _audio: &AudioData) -> Result<Vec<RecognizedWord>> {
            Ok(vec![RecognizedWord::new("hello", 0.1)])
        }
    }

    /// Alternates between two output rates on every call.
    struct Flaky {
        calls: usize,
    }

    impl Synthesizer for Flaky {
        fn synthesize(&mut self, _text: &str) -> Result<AudioData> {
            self.calls += 1;
            let rate = if self.calls % 2 == 0 { 22_050 } else { 24_000 };
            Ok(AudioData::new(vec![0.4; rate as usize / 2], rate))
        }
    }

    fn section(id: &str, title: &str) -> Section {
        Section {
            id: id.to_string(),
            title: title.to_string(),
            subtitle: None,
            content: String::new(),
        }
    }

    #[test]
    fn missing_audio_skips_only_that_section() {
        let dir = tempdir().unwrap();
        let audio_dir = dir.path().join("audio");
        std::fs::create_dir_all(&audio_dir).unwrap();
        encode_audio(
            &AudioData::new(vec![0.0; 1_600], 16_000),
            audio_dir.join("present.wav"),
        )
        .unwrap();

        let present = section("present", "Hello");
        let absent = section("absent", "Hello");
        let report = run_transcript_batch(
            &[&absent, &present],
            &audio_dir,
            dir.path(),
            &mut Echo,
            &AlignmentConfig::default(),
        );

        assert_eq!(report.written, vec![dir.path().join("present.json")]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, "absent");
    }

    #[test]
    fn empty_section_is_skipped() {
        let dir = tempdir().unwrap();
        let blank = section("blank", "   ");
        let report = run_transcript_batch(
            &[&blank],
            dir.path(),
            dir.path(),
            &mut Echo,
            &AlignmentConfig::default(),
        );
        assert!(report.written.is_empty());
        assert!(report.skipped[0].1.contains("no words"));
    }

    #[test]
    fn mixed_rate_narration_still_writes_timing() {
        let dir = tempdir().unwrap();
        let mut narrated = section("x", "First one.");
        narrated.content = "Second one.".to_string();
        let report = run_narration_batch(
            &[&narrated],
            dir.path(),
            &mut Flaky { calls: 0 },
            &AlignmentConfig::default(),
        );
        assert!(report.skipped.is_empty(), "{:?}", report.skipped);
        assert_eq!(report.written, vec![dir.path().join("x.json")]);
        assert!(dir.path().join("x.wav").is_file());
    }
}
