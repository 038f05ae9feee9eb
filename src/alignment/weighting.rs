//! Duration weighting for synthesized sentences
//!
//! Speech synthesis gives us the sentence's true rendered length but no word
//! boundaries. Each word is rendered again on its own, trimmed of leading and
//! trailing near-silence, and its content length becomes its share of the
//! true sentence duration.

use anyhow::Result;
use tracing::{debug, warn};

use super::AlignmentConfig;
use crate::types::{AudioData, TimedWord};

/// Timing estimated for one synthesized sentence
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceTiming {
    /// One entry per sentence word, starting at the offset the sentence began
    pub words: Vec<TimedWord>,
    /// Share of the sentence duration assigned to each word, in seconds
    pub durations: Vec<f64>,
    /// Rendered duration of the full sentence, in seconds
    pub duration: f64,
}

/// Estimate word start offsets inside one synthesized sentence.
///
/// `sentence` is the full-sentence render; `render_word` synthesizes a single
/// word with the same voice settings. A word whose isolated render fails or
/// is silent gets a weight proportional to its character count.
pub fn estimate_sentence_timing<S, F>(
    words: &[S],
    sentence: &AudioData,
    start_offset: f64,
    config: &AlignmentConfig,
    mut render_word: F,
) -> SentenceTiming
where
    S: AsRef<str>,
    F: FnMut(&str) -> Result<AudioData>,
{
    let weights: Vec<f64> = words
        .iter()
        .map(|word| {
            let word = word.as_ref();
            measure_word(word, config, &mut render_word) as f64
        })
        .collect();

    let duration = sentence.duration();
    let durations = distribute_duration(&weights, duration);

    let mut cursor = start_offset;
    let timed = words
        .iter()
        .zip(&durations)
        .map(|(word, share)| {
            let timed = TimedWord::new(word.as_ref(), cursor);
            cursor += share;
            timed
        })
        .collect();

    debug!(
        words = words.len(),
        duration,
        start_offset,
        "sentence durations distributed"
    );

    SentenceTiming {
        words: timed,
        durations,
        duration,
    }
}

/// Split `total` seconds across words proportionally to `weights`.
///
/// Falls back to an even split when every weight is zero.
pub fn distribute_duration(weights: &[f64], total: f64) -> Vec<f64> {
    if weights.is_empty() {
        return Vec::new();
    }
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        let even = total / weights.len() as f64;
        return vec![even; weights.len()];
    }
    weights.iter().map(|weight| weight / sum * total).collect()
}

/// Number of samples between the first and last sample whose amplitude is
/// within `top_db` of the peak. Silent buffers have no content.
pub fn trimmed_length(samples: &[f32], top_db: f32) -> usize {
    let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
    if peak <= 0.0 {
        return 0;
    }
    let threshold = peak * 10f32.powf(-top_db / 20.0);
    let first = samples.iter().position(|s| s.abs() >= threshold);
    let last = samples.iter().rposition(|s| s.abs() >= threshold);
    match (first, last) {
        (Some(first), Some(last)) => last - first + 1,
        _ => 0,
    }
}

fn measure_word<F>(word: &str, config: &AlignmentConfig, render_word: &mut F) -> usize
where
    F: FnMut(&str) -> Result<AudioData>,
{
    match render_word(word) {
        Ok(render) => {
            let length = trimmed_length(&render.samples, config.trim_top_db);
            if length > 0 {
                return length;
            }
            warn!(word, "isolated render was silent; using character weight");
        }
        Err(err) => {
            warn!(word, error = %err, "isolated word synthesis failed; using character weight");
        }
    }
    fallback_length(word, config)
}

fn fallback_length(word: &str, config: &AlignmentConfig) -> usize {
    word.chars().count().max(1) * config.fallback_samples_per_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use approx::assert_abs_diff_eq;

    const RATE: u32 = 1_000;

    /// Isolated render with `content` loud samples padded by silence.
    fn padded_render(content: usize) -> AudioData {
        let mut samples = vec![0.0; 50];
        samples.extend(vec![0.5; content]);
        samples.extend(vec![0.0; 80]);
        AudioData::new(samples, RATE)
    }

    fn lengths(word: &str) -> Result<AudioData> {
        match word {
            "a" => Ok(padded_render(100)),
            "elephant" => Ok(padded_render(300)),
            other => bail!("no render for {other}"),
        }
    }

    #[test]
    fn weights_follow_trimmed_lengths() {
        let sentence = AudioData::new(vec![0.1; RATE as usize], RATE);
        let timing = estimate_sentence_timing(
            &["a", "elephant"],
            &sentence,
            0.0,
            &AlignmentConfig::default(),
            lengths,
        );

        assert_eq!(timing.words[0], TimedWord::new("a", 0.0));
        assert_eq!(timing.words[1].word, "elephant");
        assert_abs_diff_eq!(timing.words[1].start, 0.25, epsilon = 1e-9);
        assert_abs_diff_eq!(timing.durations[0], 0.25, epsilon = 1e-9);
        assert_abs_diff_eq!(timing.durations[1], 0.75, epsilon = 1e-9);
        assert_abs_diff_eq!(timing.duration, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn starts_are_offset_by_sentence_start() {
        let sentence = AudioData::new(vec![0.1; 2 * RATE as usize], RATE);
        let timing = estimate_sentence_timing(
            &["a", "elephant"],
            &sentence,
            3.5,
            &AlignmentConfig::default(),
            lengths,
        );
        assert_abs_diff_eq!(timing.words[0].start, 3.5, epsilon = 1e-9);
        assert_abs_diff_eq!(timing.words[1].start, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn failed_render_uses_character_weight() {
        let config = AlignmentConfig {
            fallback_samples_per_char: 100,
            ..AlignmentConfig::default()
        };
        let sentence = AudioData::new(vec![0.1; 800], RATE);
        // "a" measures 100 samples, "xyz" falls back to 3 * 100
        let timing = estimate_sentence_timing(&["a", "xyz"], &sentence, 0.0, &config, lengths);
        assert_eq!(timing.words.len(), 2);
        assert_abs_diff_eq!(timing.durations[0], 0.2, epsilon = 1e-9);
        assert_abs_diff_eq!(timing.durations[1], 0.6, epsilon = 1e-9);
    }

    #[test]
    fn silent_render_uses_character_weight() {
        let config = AlignmentConfig {
            fallback_samples_per_char: 100,
            ..AlignmentConfig::default()
        };
        let sentence = AudioData::new(vec![0.1; 400], RATE);
        let timing = estimate_sentence_timing(&["ab", "cd"], &sentence, 0.0, &config, |_| {
            Ok(AudioData::new(vec![0.0; 500], RATE))
        });
        assert_abs_diff_eq!(timing.durations[0], 0.2, epsilon = 1e-9);
        assert_abs_diff_eq!(timing.durations[1], 0.2, epsilon = 1e-9);
    }

    #[test]
    fn durations_sum_to_sentence_length_for_skewed_weights() {
        let weights = [1.0, 1e6, 3.0, 0.5, 42.0];
        let durations = distribute_duration(&weights, 2.345);
        let sum: f64 = durations.iter().sum();
        assert_abs_diff_eq!(sum, 2.345, epsilon = 1e-6);
    }

    #[test]
    fn zero_weights_split_evenly() {
        assert_eq!(distribute_duration(&[0.0, 0.0], 1.0), vec![0.5, 0.5]);
        assert!(distribute_duration(&[], 1.0).is_empty());
    }

    #[test]
    fn trimming_ignores_quiet_edges() {
        let mut samples = vec![0.001; 20];
        samples.extend([0.2, -0.8, 0.4]);
        samples.extend(vec![0.001; 20]);
        assert_eq!(trimmed_length(&samples, 30.0), 3);
        // at 60 dB the 0.001 floor counts as content
        assert_eq!(trimmed_length(&samples, 60.0), samples.len());
        assert_eq!(trimmed_length(&[0.0; 10], 30.0), 0);
        assert_eq!(trimmed_length(&[], 30.0), 0);
    }
}
