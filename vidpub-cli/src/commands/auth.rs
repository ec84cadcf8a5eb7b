//! Implementation of the 'auth' subcommand.

use crate::cli::AuthArgs;
use crate::commands::parse_platform;
use crate::error::{CliErrorContext, CliResult};
use crate::uploaders::{registry_from_env, uploader_env_var};

use console::style;
use log::info;

/// Authenticates one platform through its configured uploader.
pub fn run_auth(args: &AuthArgs) -> CliResult<()> {
    let platform = parse_platform(&args.platform)?;
    let mut registry = registry_from_env();

    let uploader = registry.get_mut(platform).cli_context(format!(
        "No uploader configured for {} (set {})",
        platform,
        uploader_env_var(platform)
    ))?;

    if uploader.is_authenticated() {
        info!("{} already has a valid session", platform);
    } else {
        uploader.authenticate()?;
    }

    println!("  {} {} authenticated", style("✓").green().bold(), platform);
    Ok(())
}
