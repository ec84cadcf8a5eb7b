//! Configuration structures and constants for the vidpub-core library.
//!
//! This module provides the configuration for the orchestration engine and
//! its safety subsystems: where persisted state lives, how the emergency stop
//! is observed, the per-platform daily ceilings and the retry backoff.

mod builder;

use crate::error::{CoreError, CoreResult};
use crate::models::Platform;
use crate::retry::RetryPolicies;

use log::{debug, warn};

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub use builder::PublisherConfigBuilder;

// Default constants

/// Default location of the persisted rate-limit counters.
pub const DEFAULT_RATE_LIMIT_FILE: &str = "data/safety/rate_limits.json";

/// Default emergency-stop sentinel file. Its existence halts new uploads.
pub const DEFAULT_STOP_FILE: &str = "STOP_ALL_UPLOADS";

/// Default environment variable that halts new uploads when set to `true`.
pub const DEFAULT_STOP_ENV_VAR: &str = "STOP_UPLOADS";

/// Ceiling used for platforms missing from the limits table.
pub const FALLBACK_DAILY_LIMIT: u32 = 5;

/// Wait between retry attempts for platforms that retry.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(10);

// Environment variables read by `PublisherConfig::from_env`.
pub const ENV_RATE_LIMIT_FILE: &str = "VIDPUB_RATE_LIMIT_FILE";
pub const ENV_STOP_FILE: &str = "VIDPUB_STOP_FILE";
pub const ENV_RETRY_BACKOFF_SECS: &str = "VIDPUB_RETRY_BACKOFF_SECS";
pub const ENV_DRY_RUN: &str = "DRY_RUN";
pub const ENV_TEST_MODE: &str = "TEST_MODE";

/// Default uploads-per-day ceilings.
///
/// YouTube stays conservative for the free API quota, TikTok and Instagram
/// stay low to avoid spam detection and action blocks.
pub fn default_daily_limits() -> HashMap<Platform, u32> {
    HashMap::from([
        (Platform::YouTube, 6),
        (Platform::YouTubeShorts, 6),
        (Platform::TikTok, 4),
        (Platform::Instagram, 4),
    ])
}

/// Main configuration structure for the vidpub-core library.
///
/// Typically created by the CLI through [`PublisherConfig::from_env`] or the
/// builder, then handed to [`crate::Publisher::from_config`].
///
/// # Examples
///
/// ```rust
/// use vidpub_core::config::PublisherConfigBuilder;
/// use vidpub_core::Platform;
/// use std::time::Duration;
///
/// let config = PublisherConfigBuilder::new()
///     .rate_limit_file("/tmp/vidpub/rate_limits.json")
///     .stop_file("/tmp/vidpub/STOP")
///     .daily_limit(Platform::TikTok, 2)
///     .retry_backoff(Duration::from_secs(1))
///     .dry_run(true)
///     .build();
///
/// assert_eq!(config.daily_limit(Platform::TikTok), 2);
/// assert!(config.dry_run);
/// ```
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// JSON document holding per-day, per-platform upload counts
    pub rate_limit_file: PathBuf,

    /// Sentinel file checked by the emergency stop
    pub stop_file: PathBuf,

    /// Environment variable checked by the emergency stop
    pub stop_env_var: String,

    /// Uploads allowed per platform per calendar day
    pub daily_limits: HashMap<Platform, u32>,

    /// Exercise the whole flow without publishing or counting uploads
    pub dry_run: bool,

    /// Wait between attempts for platforms with a retrying policy
    pub retry_backoff: Duration,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            rate_limit_file: PathBuf::from(DEFAULT_RATE_LIMIT_FILE),
            stop_file: PathBuf::from(DEFAULT_STOP_FILE),
            stop_env_var: DEFAULT_STOP_ENV_VAR.to_string(),
            daily_limits: default_daily_limits(),
            dry_run: false,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

impl PublisherConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`PublisherConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_RATE_LIMIT_FILE).filter(|v| !v.is_empty()) {
            debug!("Rate limit file overridden by {}: {}", ENV_RATE_LIMIT_FILE, path);
            config.rate_limit_file = PathBuf::from(path);
        }

        if let Some(path) = lookup(ENV_STOP_FILE).filter(|v| !v.is_empty()) {
            debug!("Stop file overridden by {}: {}", ENV_STOP_FILE, path);
            config.stop_file = PathBuf::from(path);
        }

        if let Some(raw) = lookup(ENV_RETRY_BACKOFF_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.retry_backoff = Duration::from_secs(secs),
                Err(_) => warn!(
                    "Ignoring {}='{}': expected a whole number of seconds",
                    ENV_RETRY_BACKOFF_SECS, raw
                ),
            }
        }

        config.dry_run = [ENV_DRY_RUN, ENV_TEST_MODE]
            .iter()
            .any(|key| lookup(key).is_some_and(|v| is_truthy(&v)));

        config
    }

    /// Daily ceiling for `platform`, falling back to [`FALLBACK_DAILY_LIMIT`].
    pub fn daily_limit(&self, platform: Platform) -> u32 {
        self.daily_limits
            .get(&platform)
            .copied()
            .unwrap_or(FALLBACK_DAILY_LIMIT)
    }

    /// The standard retry table using this configuration's backoff.
    pub fn retry_policies(&self) -> RetryPolicies {
        RetryPolicies::standard(self.retry_backoff)
    }

    /// Rejects configurations the engine cannot run with.
    ///
    /// A ceiling of zero is allowed and disables the platform.
    pub fn validate(&self) -> CoreResult<()> {
        if self.rate_limit_file.as_os_str().is_empty() {
            return Err(CoreError::Config("rate limit file path is empty".to_string()));
        }
        if self.stop_file.as_os_str().is_empty() {
            return Err(CoreError::Config("emergency stop file path is empty".to_string()));
        }
        if self.stop_env_var.trim().is_empty() {
            return Err(CoreError::Config(
                "emergency stop environment variable name is empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// `true` in any letter case enables a flag.
pub(crate) fn is_truthy(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}
