// ============================================================================
// audex-cli/src/commands/extract.rs
// ============================================================================
//
// EXTRACT COMMAND: Run One Audio Extraction
//
// WORKFLOW:
// 1. Set up the diagnostic log next to the destination (or in --log-dir)
// 2. Translate the arguments into an ExtractConfig
// 3. Run the extraction on a worker thread with a spinner as progress sink
// 4. Print the outcome as styled text or JSON
//
// Failures of the extraction itself are outcomes, not errors: only problems
// around it (logging setup, JSON encoding) make this function return Err.

use crate::cli::ExtractArgs;
use crate::error::CliResult;
use crate::logging::{default_log_dir, init_logging};
use crate::progress::SpinnerSink;
use crate::terminal;

use audex_core::utils::{format_bytes, format_elapsed};
use audex_core::{
    CoreError, ExtractConfig, ExtractConfigBuilder, ExtractionOutcome, ExtractionRequest, Extractor,
};
use log::info;
use std::time::Duration;

/// Builds the core configuration from the command-line arguments.
pub fn build_config(args: &ExtractArgs) -> ExtractConfig {
    let mut builder = ExtractConfigBuilder::new()
        .tick_interval(Duration::from_millis(args.tick_ms))
        .overwrite(args.overwrite)
        .refuse_existing_destination(args.refuse_existing)
        .strict_exit_status(args.strict)
        .locale(args.locale);
    if let Some(ffmpeg) = &args.ffmpeg {
        builder = builder.ffmpeg_path(ffmpeg);
    }
    builder.build()
}

/// Runs the extraction and prints its outcome.
pub fn run_extract(args: &ExtractArgs, verbose: bool) -> CliResult<ExtractionOutcome> {
    let source = args.input.clone().unwrap_or_default();
    let destination = args.output.clone().unwrap_or_default();

    let log_dir = args
        .log_dir
        .clone()
        .unwrap_or_else(|| default_log_dir(&destination));
    let log_file = init_logging(&log_dir, verbose)?;

    let extractor = Extractor::new(build_config(args));
    let config = extractor.config();
    info!("audex {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: ffmpeg={}, tick={:?}, overwrite={}, refuse_existing={}, strict={}, locale={}",
        config.ffmpeg_display_name(),
        config.tick_interval,
        config.overwrite,
        config.refuse_existing_destination,
        config.strict_exit_status,
        config.locale
    );

    if !args.json {
        terminal::print_section("Audio extraction");
        terminal::print_status("Source", &source.display().to_string(), false);
        terminal::print_status("Destination", &destination.display().to_string(), false);
        terminal::print_status("Log file", &log_file.display().to_string(), false);
        println!();
    }

    let spinner = SpinnerSink::new(!args.json);
    let job = extractor.spawn(ExtractionRequest::new(source, destination), spinner.clone());
    let outcome = job.wait();
    spinner.finish();

    if args.json {
        print_json(&outcome)?;
    } else {
        print_outcome(&outcome);
    }
    Ok(outcome)
}

fn print_json(outcome: &ExtractionOutcome) -> CliResult<()> {
    let json = serde_json::to_string_pretty(outcome)
        .map_err(|e| CoreError::OperationFailed(format!("Failed to encode outcome as JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

fn print_outcome(outcome: &ExtractionOutcome) {
    match outcome {
        ExtractionOutcome::Success {
            elapsed,
            destination,
            exit,
        } => {
            terminal::print_success("Extraction complete");
            terminal::print_status("Output", &destination.display().to_string(), true);
            if let Ok(metadata) = std::fs::metadata(destination) {
                terminal::print_status("Size", &format_bytes(metadata.len()), false);
            }
            terminal::print_status("Time", &format_elapsed(*elapsed), false);
            if !exit.success() {
                terminal::print_warning(&format!("ffmpeg finished with {exit}; check the log file"));
            }
        }
        ExtractionOutcome::Failure { kind, message } => {
            terminal::print_error(&kind.to_string(), message);
        }
        ExtractionOutcome::Cancelled { elapsed } => {
            terminal::print_warning(&format!(
                "Extraction cancelled after {}",
                format_elapsed(*elapsed)
            ));
        }
    }
}
