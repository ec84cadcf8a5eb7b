//! Implementation of the 'stop' and 'resume' subcommands.

use crate::error::{CliErrorContext, CliResult};

use vidpub_core::{EmergencyStopSource, FileEmergencyStop, PublisherConfig};

use console::style;

fn stop_source() -> CliResult<FileEmergencyStop> {
    let config = PublisherConfig::from_env();
    config.validate()?;
    Ok(FileEmergencyStop::from_config(&config))
}

/// Creates the sentinel file.
pub fn run_stop() -> CliResult<()> {
    let stop = stop_source()?;
    stop.trigger().cli_context("Failed to trigger emergency stop")?;
    println!(
        "  {} Emergency stop triggered ({})",
        style("■").red().bold(),
        stop.stop_file().display()
    );
    Ok(())
}

/// Removes the sentinel file. The environment override, if set, still
/// applies afterwards.
pub fn run_resume() -> CliResult<()> {
    let stop = stop_source()?;
    stop.reset().cli_context("Failed to reset emergency stop")?;

    if stop.is_triggered() {
        println!(
            "  {} Sentinel removed, but uploads are still stopped by the environment override",
            style("!").yellow().bold()
        );
    } else {
        println!("  {} Uploads resumed", style("✓").green().bold());
    }
    Ok(())
}
