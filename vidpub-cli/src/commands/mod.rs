//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// The `upload` command: publishes videos through the engine.
pub mod upload;

/// The `status` command.
pub mod status;

/// The `auth` command.
pub mod auth;

/// The `stop` and `resume` commands.
pub mod emergency;

/// The `template` command.
pub mod template;

use crate::error::CliResult;
use vidpub_core::{CoreError, Platform};

/// Parses one platform name from the command line.
pub fn parse_platform(name: &str) -> CliResult<Platform> {
    name.parse::<Platform>()
}

/// Parses a platform list. `all` expands to YouTube, TikTok and Instagram;
/// repeated names are kept once, in first-seen order.
pub fn parse_platforms(names: &[String]) -> CliResult<Vec<Platform>> {
    let mut platforms = Vec::new();
    for name in names {
        let expanded = if name.trim().eq_ignore_ascii_case("all") {
            vec![Platform::YouTube, Platform::TikTok, Platform::Instagram]
        } else {
            vec![parse_platform(name)?]
        };
        for platform in expanded {
            if !platforms.contains(&platform) {
                platforms.push(platform);
            }
        }
    }
    if platforms.is_empty() {
        return Err(CoreError::UnknownPlatform(String::new()));
    }
    Ok(platforms)
}
