//! wordsync - per-word start timestamps for narrated text
//!
//! Given the display text of a section and its narration, produce one
//! `{word, start}` entry per displayed word so a player can highlight words
//! in sync with playback. Narration either already exists and is timed by
//! speech recognition, or is synthesized here and timed by duration
//! weighting.

pub mod alignment;
pub mod audio;
pub mod cli;
pub mod config;
pub mod output;
pub mod pipeline;
pub mod sections;
pub mod synthesis;
pub mod text;
pub mod transcription;
pub mod types;
