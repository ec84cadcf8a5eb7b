//! Implementation of the 'status' subcommand.

use crate::error::CliResult;
use crate::output::{format_flag, print_key_value, print_section};
use crate::uploaders::{registry_from_env, uploader_env_var};

use console::style;
use vidpub_core::{EmergencyStopSource, FileEmergencyStop, Platform, PublisherConfig, RateLimiter};

/// Prints the emergency stop state and today's quota per platform.
pub fn run_status() -> CliResult<()> {
    let config = PublisherConfig::from_env();
    config.validate()?;

    let stop = FileEmergencyStop::from_config(&config);
    let limiter = RateLimiter::from_config(&config);
    let registry = registry_from_env();

    print_section("Emergency Stop");
    print_key_value("State", &format_flag(!stop.is_triggered(), "clear", "ACTIVE"));
    print_key_value("Sentinel file", &stop.stop_file().display().to_string());
    if stop.env_override_active() {
        print_key_value("Env override", &format!("{}=true", config.stop_env_var));
    }

    print_section("Daily Quota");
    print_key_value("Store", &limiter.storage_path().display().to_string());
    if config.dry_run {
        print_key_value("Dry-run", "enabled");
    }
    println!();
    for platform in Platform::ALL {
        let uploader = if registry.contains(platform) {
            style("uploader configured").green().to_string()
        } else {
            style(format!("no uploader ({} unset)", uploader_env_var(platform))).yellow().to_string()
        };
        println!(
            "  {:<16} {}/{} used, {} remaining, {}",
            platform.as_str(),
            limiter.count_today(platform),
            limiter.limit_for(platform),
            limiter.get_remaining(platform),
            uploader
        );
    }
    Ok(())
}
