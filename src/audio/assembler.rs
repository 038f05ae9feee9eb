use crate::types::{AudioChunk, AudioData};

/// Concatenate timeline chunks into one continuous buffer.
///
/// Chunks are laid end to end with no overlap so that every chunk's samples
/// begin exactly at its `start_time`. Returns `None` for an empty list or
/// mixed sample rates.
pub fn assemble_audio(chunks: &[AudioChunk]) -> Option<AudioData> {
    let sample_rate = chunks.first()?.sample_rate;
    if chunks.iter().any(|c| c.sample_rate != sample_rate) {
        return None;
    }

    let total_samples: usize = chunks.iter().map(|c| c.samples.len()).sum();
    let mut assembled = Vec::with_capacity(total_samples);
    for chunk in chunks {
        assembled.extend_from_slice(&chunk.samples);
    }

    Some(AudioData {
        samples: assembled,
        sample_rate,
    })
}
