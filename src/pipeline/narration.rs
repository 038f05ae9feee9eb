//! Synthesis path: render a section sentence by sentence and time its words

use tracing::{debug, warn};

use crate::alignment::{estimate_sentence_timing, AlignmentConfig, TimelineAccumulator};
use crate::audio::resample::linear_resample;
use crate::audio::{assemble_audio, silence_chunk};
use crate::synthesis::Synthesizer;
use crate::text::{split_into_sentences, split_into_words};
use crate::types::{AlignmentResult, AudioChunk, AudioData, Section};

/// Narration produced for one section
#[derive(Debug, Clone)]
pub struct SectionNarration {
    pub timing: AlignmentResult,
    /// Sentence renders joined by the configured silences; `None` when no
    /// sentence could be rendered.
    pub audio: Option<AudioData>,
}

enum Piece {
    Speech(AudioData),
    Silence(f64),
}

/// Synthesize every sentence of a section and estimate its word timing.
///
/// A sentence whose render fails is logged and skipped; its words still get
/// the current offset so the timing stays index-aligned with the section's
/// canonical words.
pub fn narrate_section<T>(
    section: &Section,
    synthesizer: &mut T,
    config: &AlignmentConfig,
) -> SectionNarration
where
    T: Synthesizer + ?Sized,
{
    let mut timeline = TimelineAccumulator::new(config);
    let mut pieces = Vec::new();
    let mut sample_rate = None;

    for (kind, text) in section.segments() {
        for sentence in split_into_sentences(text) {
            let words = split_into_words(sentence);
            match synthesizer.synthesize(sentence) {
                Ok(render) => {
                    let timing = estimate_sentence_timing(&words, &render, 0.0, config, |word| {
                        synthesizer.synthesize(word)
                    });
                    let start = timeline.place_sentence(timing.words, timing.duration);
                    debug!(
                        section = %section.id,
                        segment = ?kind,
                        start,
                        seconds = timing.duration,
                        "sentence narrated"
                    );
                    let rate = *sample_rate.get_or_insert(render.sample_rate);
                    pieces.push(conform_rate(&section.id, render, rate));
                }
                Err(err) => {
                    warn!(
                        section = %section.id,
                        sentence,
                        error = %err,
                        "sentence synthesis failed; skipping its audio"
                    );
                    timeline.place_unrendered(&words);
                }
            }
            pieces.push(Piece::Silence(config.sentence_gap));
        }
        timeline.end_segment();
        pieces.push(Piece::Silence(config.segment_gap));
    }

    SectionNarration {
        timing: timeline.finish(),
        audio: join_pieces(&section.id, pieces),
    }
}

/// Bring a render to the section's sample rate; the first render sets it.
fn conform_rate(section_id: &str, render: AudioData, rate: u32) -> Piece {
    if render.sample_rate == rate {
        return Piece::Speech(render);
    }
    match linear_resample(&render.samples, render.sample_rate, rate) {
        Ok(samples) => Piece::Speech(AudioData::new(samples, rate)),
        Err(err) => {
            warn!(section = section_id, error = %err, "cannot resample sentence render");
            Piece::Silence(render.duration())
        }
    }
}

fn join_pieces(section_id: &str, pieces: Vec<Piece>) -> Option<AudioData> {
    let sample_rate = pieces.iter().find_map(|piece| match piece {
        Piece::Speech(render) => Some(render.sample_rate),
        Piece::Silence(_) => None,
    })?;

    let mut chunks = Vec::with_capacity(pieces.len());
    let mut cursor = 0.0;
    for piece in pieces {
        let chunk = match piece {
            Piece::Speech(render) => {
                let duration = render.duration();
                AudioChunk {
                    samples: render.samples,
                    sample_rate: render.sample_rate,
                    start_time: cursor,
                    end_time: cursor + duration,
                }
            }
            Piece::Silence(duration) => silence_chunk(cursor, duration, sample_rate),
        };
        cursor = chunk.end_time;
        chunks.push(chunk);
    }

    let audio = assemble_audio(&chunks);
    if audio.is_none() {
        warn!(section = section_id, "sentence renders disagree on sample rate");
    }
    audio
}
