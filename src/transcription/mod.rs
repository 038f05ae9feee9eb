//! Speech recognition with word-level timing
//!
//! The alignment engine only needs a time-ordered stream of recognized words.
//! [`Recognizer`] is that contract; [`WhisperRecognizer`] fulfils it with
//! whisper-rs, configured so each output segment holds a single word.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio::resample::RECOGNIZER_SAMPLE_RATE;
use crate::types::{AudioData, RecognizedWord};

/// Default location of the ggml model when none is configured.
pub const DEFAULT_MODEL_PATH: &str = "./models/ggml-base.en.bin";

/// Anything that can turn audio into time-ordered words
pub trait Recognizer {
    fn recognize(&mut self, audio: &AudioData) -> Result<Vec<RecognizedWord>>;
}

/// Resolve the model path: explicit setting, then `WHISPER_MODEL_PATH`,
/// then the bundled default.
pub fn resolve_model_path(configured: Option<&Path>) -> PathBuf {
    configured
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os("WHISPER_MODEL_PATH").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH))
}

pub struct WhisperRecognizer {
    ctx: WhisperContext,
    language: String,
}

impl WhisperRecognizer {
    pub fn load(model_path: &Path, language: impl Into<String>) -> Result<Self> {
        let model = model_path
            .to_str()
            .with_context(|| format!("Model path is not valid UTF-8: {:?}", model_path))?;
        let ctx = WhisperContext::new_with_params(model, WhisperContextParameters::default())
            .with_context(|| {
                format!(
                    "Failed to load Whisper model at {:?}. Download with: wget https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.en.bin -P ./models/",
                    model_path
                )
            })?;
        info!(model = %model_path.display(), "whisper model loaded");
        Ok(Self {
            ctx,
            language: language.into(),
        })
    }
}

impl Recognizer for WhisperRecognizer {
    fn recognize(&mut self, audio: &AudioData) -> Result<Vec<RecognizedWord>> {
        anyhow::ensure!(
            audio.sample_rate == RECOGNIZER_SAMPLE_RATE,
            "Whisper expects {} Hz audio, got {} Hz",
            RECOGNIZER_SAMPLE_RATE,
            audio.sample_rate
        );

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some(self.language.as_str()));
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        // one word per segment
        params.set_token_timestamps(true);
        params.set_split_on_word(true);
        params.set_max_len(1);

        let mut state = self
            .ctx
            .create_state()
            .context("Failed to create Whisper state")?;
        state
            .full(params, &audio.samples)
            .context("Failed to transcribe audio")?;

        let mut words = Vec::new();
        for segment in state.as_iter() {
            let text = segment.to_str().context("Failed to get segment text")?;
            // timestamps are in centiseconds
            let start_time = segment.start_timestamp() as f64 / 100.0;
            let end_time = segment.end_timestamp() as f64 / 100.0;
            words.extend(words_from_segment(text, start_time, end_time));
        }

        debug!(words = words.len(), "whisper recognized words");
        Ok(words)
    }
}

/// Turn one recognizer segment into words.
///
/// A segment normally carries one word. When it carries several, their
/// starts are spread evenly across the segment span.
pub fn words_from_segment(text: &str, start_time: f64, end_time: f64) -> Vec<RecognizedWord> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return Vec::new();
    }
    let step = (end_time - start_time).max(0.0) / tokens.len() as f64;
    tokens
        .into_iter()
        .enumerate()
        .map(|(idx, token)| RecognizedWord::new(token, start_time + step * idx as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_segment_keeps_start() {
        let words = words_from_segment(" Hello", 0.42, 0.8);
        assert_eq!(words, vec![RecognizedWord::new("Hello", 0.42)]);
    }

    #[test]
    fn multi_word_segment_spreads_starts() {
        let words = words_from_segment(" right now?", 1.0, 2.0);
        assert_eq!(
            words,
            vec![
                RecognizedWord::new("right", 1.0),
                RecognizedWord::new("now?", 1.5)
            ]
        );
    }

    #[test]
    fn blank_segment_yields_nothing() {
        assert!(words_from_segment("  ", 0.0, 1.0).is_empty());
    }

    #[test]
    fn explicit_model_path_wins() {
        let path = resolve_model_path(Some(Path::new("/models/custom.bin")));
        assert_eq!(path, PathBuf::from("/models/custom.bin"));
    }

    #[test]
    #[ignore] // Requires model file to be downloaded
    fn transcribes_tone_without_error() {
        // Run: wget https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-base.en.bin -P ./models/
        let mut recognizer =
            WhisperRecognizer::load(&resolve_model_path(None), "en").expect("model present");
        let samples = (0..RECOGNIZER_SAMPLE_RATE)
            .map(|i| {
                let t = i as f32 / RECOGNIZER_SAMPLE_RATE as f32;
                (t * 2.0 * std::f32::consts::PI * 440.0).sin() * 0.1
            })
            .collect();
        let audio = AudioData::new(samples, RECOGNIZER_SAMPLE_RATE);
        assert!(recognizer.recognize(&audio).is_ok());
    }
}
