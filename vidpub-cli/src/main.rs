// vidpub-cli/src/main.rs
//
// Entry point for the vidpub command-line tool.
//
// Responsibilities:
// - Parsing arguments (`Cli`).
// - Initializing logging before any command runs.
// - Dispatching to the command implementations in `vidpub_cli::commands`.
// - Printing errors to stderr and exiting with status 1 on failure.

use clap::Parser;
use vidpub_cli::logging::init_logging;
use vidpub_cli::{Cli, Commands, run_auth, run_resume, run_status, run_stop, run_template, run_upload};

use console::style;
use std::process;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Upload(args) => run_upload(args),
        Commands::Status => run_status(),
        Commands::Auth(args) => run_auth(args),
        Commands::Stop => run_stop(),
        Commands::Resume => run_resume(),
        Commands::Template => run_template(),
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        process::exit(1);
    }
}
