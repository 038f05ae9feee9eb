//! Zero-filled gaps placed between sentences and segments

use crate::types::AudioChunk;

/// Silent chunk of `duration` seconds placed at `start_time`.
///
/// The sample count is rounded so that repeated gaps do not drift from the
/// timeline offsets they stand for.
pub fn silence_chunk(start_time: f64, duration: f64, sample_rate: u32) -> AudioChunk {
    let duration = duration.max(0.0);
    let num_samples = (duration * sample_rate as f64).round() as usize;

    AudioChunk {
        samples: vec![0.0; num_samples],
        sample_rate,
        start_time,
        end_time: start_time + duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentence_gap_at_kokoro_rate() {
        let silence = silence_chunk(1.0, 0.3, 24_000);
        assert_eq!(silence.samples.len(), 7_200);
        assert!(silence.samples.iter().all(|&s| s == 0.0));
        assert!((silence.end_time - 1.3).abs() < 1e-12);
    }

    #[test]
    fn zero_and_negative_durations_are_empty() {
        assert!(silence_chunk(0.0, 0.0, 44_100).samples.is_empty());
        assert!(silence_chunk(0.0, -1.0, 44_100).samples.is_empty());
    }

    #[test]
    fn rounds_instead_of_truncating() {
        // 1.764 samples
        assert_eq!(silence_chunk(0.0, 0.000_04, 44_100).samples.len(), 2);
    }
}
