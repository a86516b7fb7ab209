// audex-cli/src/main.rs
//
// Entry point of the `audex` binary.
//
// Responsibilities:
// - Parsing the command line (`Cli`).
// - Dispatching to the `extract` or `check` command.
// - Printing errors that prevented a command from running.
// - Mapping the extraction outcome to the process exit code.

use audex_cli::error::{EXIT_FAILURE, EXIT_SUCCESS};
use audex_cli::{Cli, Commands, exit_code, run_check, run_extract, terminal};
use clap::Parser;
use std::process;

fn main() {
    let cli = Cli::parse();

    let code = match &cli.command {
        Commands::Extract(args) => match run_extract(args, cli.verbose) {
            Ok(outcome) => exit_code(&outcome),
            Err(e) => {
                terminal::print_error("Error", &e.to_string());
                EXIT_FAILURE
            }
        },
        Commands::Check(args) => match run_check(args) {
            Ok(_) => EXIT_SUCCESS,
            Err(e) => {
                terminal::print_error("Dependency check failed", &e.to_string());
                EXIT_FAILURE
            }
        },
    };

    process::exit(code);
}
