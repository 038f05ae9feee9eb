use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(
    name = "wordsync",
    version,
    about = "Per-word start timestamps for narrated sections"
)]
pub struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Time existing narration by transcribing it with Whisper.
    Align(AlignArgs),
    /// Narrate sections with a TTS engine and estimate word timing.
    Synthesize(SynthesizeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SectionArgs {
    /// Sections manifest (JSON array, or a TypeScript data module)
    #[arg(long, value_name = "PATH")]
    pub sections: PathBuf,
    /// Directory receiving `<id>.json` (and `<id>.wav` when synthesizing)
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: PathBuf,
    /// Only process the section with this id
    #[arg(long, value_name = "ID")]
    pub section: Option<String>,
    /// JSON config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Silence after each sentence, in seconds
    #[arg(long = "sentence-gap")]
    pub sentence_gap: Option<f64>,
    /// Extra silence after each title/subtitle/body segment, in seconds
    #[arg(long = "segment-gap")]
    pub segment_gap: Option<f64>,
}

#[derive(Args, Debug, Clone)]
pub struct AlignArgs {
    #[command(flatten)]
    pub common: SectionArgs,
    /// Directory holding `<id>.mp3` (or wav/flac/ogg) narration files
    #[arg(long = "audio-dir", value_name = "DIR")]
    pub audio_dir: PathBuf,
    /// Whisper ggml model file
    #[arg(long, value_name = "PATH")]
    pub model: Option<PathBuf>,
    /// Recognizer language code
    #[arg(long)]
    pub language: Option<String>,
    /// Recognized words searched per canonical word
    #[arg(long)]
    pub window: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct SynthesizeArgs {
    #[command(flatten)]
    pub common: SectionArgs,
    /// TTS executable; receives text on stdin unless an argument holds `{text}`
    #[arg(long = "tts-command", value_name = "PROGRAM")]
    pub tts_command: Option<String>,
    /// Argument passed to the TTS executable (repeatable)
    #[arg(long = "tts-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub tts_args: Vec<String>,
}

impl SectionArgs {
    /// Load the config file and layer command-line overrides on top.
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::from_override(self.config.as_deref())?;
        if let Some(gap) = self.sentence_gap {
            config.alignment.sentence_gap = gap;
        }
        if let Some(gap) = self.segment_gap {
            config.alignment.segment_gap = gap;
        }
        config.validate()?;
        Ok(config)
    }
}

impl AlignArgs {
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = self.common.load_config()?;
        if let Some(model) = &self.model {
            config.whisper_model = Some(model.clone());
        }
        if let Some(language) = &self.language {
            config.language = language.clone();
        }
        if let Some(window) = self.window {
            config.alignment.window_size = window;
        }
        config.validate()?;
        Ok(config)
    }
}

impl SynthesizeArgs {
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = self.common.load_config()?;
        if let Some(command) = &self.tts_command {
            config.tts_command = Some(command.clone());
            config.tts_args = self.tts_args.clone();
        }
        ensure!(
            config.tts_command.is_some(),
            "Provide a TTS engine via --tts-command or tts_command in the config file"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_align_with_overrides() {
        let cli = Cli::try_parse_from([
            "wordsync",
            "align",
            "--sections",
            "sections.ts",
            "--out-dir",
            "out",
            "--audio-dir",
            "audio",
            "--window",
            "4",
            "--sentence-gap",
            "0.5",
        ])
        .unwrap();
        let Command::Align(args) = cli.command else {
            panic!("expected align");
        };
        let config = args.load_config().unwrap();
        assert_eq!(config.alignment.window_size, 4);
        assert_eq!(config.alignment.sentence_gap, 0.5);
        assert_eq!(config.alignment.segment_gap, 0.2);
    }

    #[test]
    fn rejects_zero_window() {
        let cli = Cli::try_parse_from([
            "wordsync",
            "align",
            "--sections",
            "s.json",
            "--out-dir",
            "out",
            "--audio-dir",
            "audio",
            "--window",
            "0",
        ])
        .unwrap();
        let Command::Align(args) = cli.command else {
            panic!("expected align");
        };
        assert!(args.load_config().is_err());
    }

    #[test]
    fn synthesize_requires_tts_command() {
        let cli =
            Cli::try_parse_from(["wordsync", "synthesize", "--sections", "s.json", "--out-dir", "o"])
                .unwrap();
        let Command::Synthesize(args) = cli.command else {
            panic!("expected synthesize");
        };
        assert!(args.load_config().is_err());
    }

    #[test]
    fn collects_repeated_tts_args() {
        let cli = Cli::try_parse_from([
            "wordsync",
            "synthesize",
            "--sections",
            "s.json",
            "--out-dir",
            "o",
            "--tts-command",
            "piper",
            "--tts-arg",
            "--model",
            "--tts-arg",
            "lewis.onnx",
        ])
        .unwrap();
        let Command::Synthesize(args) = cli.command else {
            panic!("expected synthesize");
        };
        let config = args.load_config().unwrap();
        assert_eq!(config.tts_command.as_deref(), Some("piper"));
        assert_eq!(config.tts_args, vec!["--model", "lewis.onnx"]);
    }
}
