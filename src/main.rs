use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wordsync::cli::{AlignArgs, Cli, Command, SectionArgs, SynthesizeArgs};
use wordsync::pipeline::{run_narration_batch, run_transcript_batch, BatchReport};
use wordsync::sections::{load_sections, select_sections};
use wordsync::synthesis::CommandSynthesizer;
use wordsync::transcription::{resolve_model_path, WhisperRecognizer};
use wordsync::types::Section;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Align(args) => handle_align(&args),
        Command::Synthesize(args) => handle_synthesize(&args),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn handle_align(args: &AlignArgs) -> Result<()> {
    let config = args.load_config().context("Invalid configuration")?;
    let sections = load_sections(&args.common.sections)?;
    let Some(selected) = pick_sections(&sections, &args.common) else {
        return finish(unknown_section(&args.common));
    };

    println!("wordsync - aligning narration with Whisper");
    println!("Sections: {} selected", selected.len());
    println!("Audio dir: {:?}", args.audio_dir);

    let model = resolve_model_path(config.whisper_model.as_deref());
    let mut recognizer = WhisperRecognizer::load(&model, config.language.clone())?;
    let report = run_transcript_batch(
        &selected,
        &args.audio_dir,
        &args.common.out_dir,
        &mut recognizer,
        &config.alignment,
    );
    finish(report)
}

fn handle_synthesize(args: &SynthesizeArgs) -> Result<()> {
    let config = args.load_config().context("Invalid configuration")?;
    let sections = load_sections(&args.common.sections)?;
    let Some(selected) = pick_sections(&sections, &args.common) else {
        return finish(unknown_section(&args.common));
    };

    let program = config
        .tts_command
        .clone()
        .context("No TTS command configured")?;
    println!("wordsync - narrating sections with {program}");
    println!("Sections: {} selected", selected.len());

    let mut synthesizer = CommandSynthesizer::new(program, config.tts_args.clone())?;
    let report = run_narration_batch(
        &selected,
        &args.common.out_dir,
        &mut synthesizer,
        &config.alignment,
    );
    finish(report)
}

/// Sections to process; `None` when `--section` names no known section.
fn pick_sections<'a>(sections: &'a [Section], args: &SectionArgs) -> Option<Vec<&'a Section>> {
    let selected = select_sections(sections, args.section.as_deref());
    if selected.is_empty() && args.section.is_some() {
        return None;
    }
    Some(selected)
}

fn unknown_section(args: &SectionArgs) -> BatchReport {
    let mut report = BatchReport::default();
    if let Some(id) = &args.section {
        report.skip(id, format!("no section with this id in {:?}", args.sections));
    }
    report
}

fn finish(report: BatchReport) -> Result<()> {
    for path in &report.written {
        println!("   Wrote {:?}", path);
    }
    for (id, reason) in &report.skipped {
        eprintln!("   Skipped {id}: {reason}");
    }
    println!(
        "\nDone: {} written, {} skipped",
        report.written.len(),
        report.skipped.len()
    );
    Ok(())
}
