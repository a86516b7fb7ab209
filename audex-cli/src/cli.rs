// audex-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use audex_core::ProgressLocale;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Audex: extract the audio track of a video file",
    long_about = "Extracts the audio track of a video into MP3, AAC or WAV using ffmpeg via the audex-core library."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Mirror the diagnostic log to stderr and log at debug level.
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extracts the audio track of a video file
    Extract(ExtractArgs),
    /// Checks that ffmpeg can be executed
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Source video file
    #[arg(short = 'i', long = "input", value_name = "SOURCE")]
    pub input: Option<PathBuf>,

    /// Destination audio file; the extension (.mp3, .aac, .wav) selects the encoder
    #[arg(short = 'o', long = "output", value_name = "DEST")]
    pub output: Option<PathBuf>,

    /// Optional: Directory for log files (defaults to the destination's directory + /logs)
    #[arg(short, long, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Replace the destination if it already exists
    #[arg(long)]
    pub overwrite: bool,

    /// Fail instead of running ffmpeg when the destination already exists
    #[arg(long, conflicts_with = "overwrite")]
    pub refuse_existing: bool,

    /// Report a non-zero ffmpeg exit status as a failure
    #[arg(long)]
    pub strict: bool,

    /// Language of the progress text (en, zh)
    #[arg(long, value_name = "LANG", default_value = "en")]
    pub locale: ProgressLocale,

    /// Milliseconds between progress updates (1-5000)
    #[arg(long, value_name = "MS", default_value_t = 1000,
          value_parser = clap::value_parser!(u64).range(1..=5000))]
    pub tick_ms: u64,

    /// Optional: ffmpeg binary to use instead of the one on PATH.
    /// Can also be set via the AUDEX_FFMPEG environment variable.
    #[arg(long, value_name = "PATH", env = "AUDEX_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Print the outcome as JSON on stdout instead of styled text
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Optional: ffmpeg binary to check instead of the one on PATH.
    #[arg(long, value_name = "PATH", env = "AUDEX_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_defaults() {
        let cli = Cli::try_parse_from(["audex", "extract", "-i", "in.mp4", "-o", "out.mp3"]).unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Extract(args) => {
                assert_eq!(args.input, Some(PathBuf::from("in.mp4")));
                assert_eq!(args.output, Some(PathBuf::from("out.mp3")));
                assert_eq!(args.tick_ms, 1000);
                assert_eq!(args.locale, ProgressLocale::English);
                assert!(!args.overwrite && !args.refuse_existing && !args.strict && !args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_extract_flags() {
        let cli = Cli::try_parse_from([
            "audex", "extract", "--input", "in.mp4", "--output", "out.wav", "--locale", "zh",
            "--tick-ms", "250", "--overwrite", "--strict", "--json", "--verbose",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.locale, ProgressLocale::Chinese);
        assert_eq!(args.tick_ms, 250);
        assert!(args.overwrite && args.strict && args.json);
    }

    #[test]
    fn test_refuse_existing_conflicts_with_overwrite() {
        let cli = Cli::try_parse_from(["audex", "extract", "--refuse-existing"]).unwrap();
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert!(args.refuse_existing);

        assert!(
            Cli::try_parse_from(["audex", "extract", "--refuse-existing", "--overwrite"]).is_err()
        );
    }

    #[test]
    fn test_tick_range_enforced() {
        assert!(Cli::try_parse_from(["audex", "extract", "--tick-ms", "0"]).is_err());
        assert!(Cli::try_parse_from(["audex", "extract", "--tick-ms", "5001"]).is_err());
    }

    #[test]
    fn test_unknown_locale_rejected() {
        assert!(Cli::try_parse_from(["audex", "extract", "--locale", "fr"]).is_err());
    }

    #[test]
    fn test_paths_are_optional_at_parse_time() {
        let cli = Cli::try_parse_from(["audex", "extract"]).unwrap();
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert!(args.input.is_none() && args.output.is_none());
    }
}
