use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::alignment::AlignmentConfig;

/// Settings shared by both subcommands, read from an optional JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub alignment: AlignmentConfig,
    /// ggml Whisper model; falls back to `WHISPER_MODEL_PATH`
    pub whisper_model: Option<PathBuf>,
    pub language: String,
    /// External TTS executable and its arguments
    pub tts_command: Option<String>,
    pub tts_args: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            alignment: AlignmentConfig::default(),
            whisper_model: None,
            language: "en".to_string(),
            tts_command: None,
            tts_args: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load the given config file, or defaults when none is given.
    pub fn from_override(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(custom) => load_file(custom)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.alignment
            .validate()
            .context("Invalid alignment settings")?;
        ensure!(!self.language.trim().is_empty(), "language must not be empty");
        Ok(())
    }
}

fn load_file(path: &Path) -> Result<AppConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse config file {:?}", path))
}
