//! Text-to-speech collaborators
//!
//! The estimator needs two things from a voice: a render of the full
//! sentence and renders of single words under the same settings. Both go
//! through [`Synthesizer`].

use std::io::{ErrorKind, Write};
use std::process::{Command, Output, Stdio};
use std::thread;

use anyhow::{bail, ensure, Context, Result};
use tracing::debug;

use crate::audio::decoder::decode_audio;
use crate::types::AudioData;

/// Placeholder replaced by the text to speak.
pub const TEXT_PLACEHOLDER: &str = "{text}";
/// Placeholder replaced by the WAV path the engine must write.
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

/// A voice that renders text to mono audio
pub trait Synthesizer {
    fn synthesize(&mut self, text: &str) -> Result<AudioData>;
}

/// Runs an external TTS executable once per utterance.
///
/// Arguments may contain `{text}` and `{output}`. Without `{text}` the text
/// is written to the process's stdin. Without `{output}` the output path is
/// appended as the last argument.
#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    program: String,
    args: Vec<String>,
}

impl CommandSynthesizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Result<Self> {
        let program = program.into();
        ensure!(!program.trim().is_empty(), "TTS command must not be empty");
        Ok(Self { program, args })
    }

    fn build_args(&self, text: &str, output: &str) -> (Vec<String>, bool) {
        let mut text_in_args = false;
        let mut output_in_args = false;
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                text_in_args |= arg.contains(TEXT_PLACEHOLDER);
                output_in_args |= arg.contains(OUTPUT_PLACEHOLDER);
                arg.replace(TEXT_PLACEHOLDER, text)
                    .replace(OUTPUT_PLACEHOLDER, output)
            })
            .collect();
        if !output_in_args {
            args.push(output.to_string());
        }
        (args, !text_in_args)
    }
}

impl Synthesizer for CommandSynthesizer {
    fn synthesize(&mut self, text: &str) -> Result<AudioData> {
        let workdir = tempfile::tempdir().context("Failed to create TTS scratch directory")?;
        let output = workdir.path().join("utterance.wav");
        let output_arg = output
            .to_str()
            .context("Scratch path is not valid UTF-8")?
            .to_string();
        let (args, use_stdin) = self.build_args(text, &output_arg);

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(if use_stdin { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start TTS command {:?}", self.program))?;

        // feed stdin while stderr is drained so neither pipe can fill up
        let stdin = child.stdin.take();
        let result = thread::scope(|scope| -> Result<Output> {
            let feeder =
                stdin.map(|mut stdin| scope.spawn(move || stdin.write_all(text.as_bytes())));
            let finished = child
                .wait_with_output()
                .context("Failed to wait for TTS command")?;
            if let Some(feeder) = feeder {
                match feeder.join() {
                    Ok(Err(err)) if err.kind() != ErrorKind::BrokenPipe => {
                        return Err(err).context("Failed to send text to TTS command");
                    }
                    Ok(_) => {}
                    Err(_) => bail!("TTS stdin writer panicked"),
                }
            }
            Ok(finished)
        })?;
        if !result.status.success() {
            bail!(
                "TTS command exited with {}: {}",
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            );
        }

        let audio = decode_audio(&output)
            .with_context(|| format!("TTS command produced no readable audio for {:?}", text))?;
        debug!(chars = text.len(), seconds = audio.duration(), "utterance synthesized");
        Ok(audio)
    }
}
