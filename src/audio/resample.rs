use anyhow::{ensure, Result};

use crate::types::AudioData;

/// Sample rate Whisper models expect.
pub const RECOGNIZER_SAMPLE_RATE: u32 = 16_000;

/// Linearly resample `samples` from `source_rate` to `target_rate`.
pub fn linear_resample(samples: &[f32], source_rate: u32, target_rate: u32) -> Result<Vec<f32>> {
    ensure!(source_rate > 0, "source sample rate must be positive");
    ensure!(target_rate > 0, "target sample rate must be positive");
    if samples.is_empty() || source_rate == target_rate {
        return Ok(samples.to_vec());
    }
    let step = source_rate as f64 / target_rate as f64;
    let output_len = ((samples.len() as f64) / step).ceil().max(1.0) as usize;
    let last_index = samples.len() - 1;
    let output = (0..output_len)
        .map(|i| {
            let position = i as f64 * step;
            let left = (position.floor() as usize).min(last_index);
            let right = (left + 1).min(last_index);
            let t = (position - left as f64) as f32;
            samples[left] * (1.0 - t) + samples[right] * t
        })
        .collect();
    Ok(output)
}

/// Resample decoded narration to the recognizer's rate.
pub fn for_recognizer(audio: &AudioData) -> Result<AudioData> {
    let samples = linear_resample(&audio.samples, audio.sample_rate, RECOGNIZER_SAMPLE_RATE)?;
    Ok(AudioData::new(samples, RECOGNIZER_SAMPLE_RATE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_constant_signal_after_resample() {
        let input = vec![0.5; 480];
        let resampled = linear_resample(&input, 48_000, 16_000).unwrap();
        assert_eq!(resampled.len(), 160);
        assert!(resampled.iter().all(|&sample| (sample - 0.5).abs() < 1e-6));
    }

    #[test]
    fn recognizer_copy_keeps_duration() {
        let audio = AudioData::new(vec![0.1; 24_000], 24_000);
        let converted = for_recognizer(&audio).unwrap();
        assert_eq!(converted.sample_rate, RECOGNIZER_SAMPLE_RATE);
        assert!((converted.duration() - audio.duration()).abs() < 1e-3);
    }

    #[test]
    fn rejects_zero_rates() {
        assert!(linear_resample(&[0.0], 0, 16_000).is_err());
        assert!(linear_resample(&[0.0], 16_000, 0).is_err());
    }
}
