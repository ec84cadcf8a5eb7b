// ============================================================================
// vidpub-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for PublisherConfig
//
// This module implements the builder pattern for PublisherConfig, providing a
// fluent API for creating configurations with sensible defaults. The CLI uses
// it to layer command-line flags over environment-derived settings.
//
// AI-ASSISTANT-INFO: Builder pattern implementation for PublisherConfig

// ---- Standard library imports ----
use std::path::PathBuf;
use std::time::Duration;

// ---- Internal crate imports ----
use super::PublisherConfig;
use crate::models::Platform;

/// Builder for creating PublisherConfig instances.
///
/// Starts from [`PublisherConfig::default`] or from an existing
/// configuration via [`PublisherConfigBuilder::from_config`].
#[derive(Debug, Clone, Default)]
pub struct PublisherConfigBuilder {
    config: PublisherConfig,
}

impl PublisherConfigBuilder {
    /// Creates a builder holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder that starts from `config`.
    pub fn from_config(config: PublisherConfig) -> Self {
        Self { config }
    }

    /// Sets the rate-limit store location.
    pub fn rate_limit_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.rate_limit_file = path.into();
        self
    }

    /// Sets the emergency-stop sentinel file.
    pub fn stop_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.stop_file = path.into();
        self
    }

    /// Sets the environment variable observed by the emergency stop.
    pub fn stop_env_var(mut self, name: impl Into<String>) -> Self {
        self.config.stop_env_var = name.into();
        self
    }

    /// Overrides the daily ceiling for one platform.
    pub fn daily_limit(mut self, platform: Platform, limit: u32) -> Self {
        self.config.daily_limits.insert(platform, limit);
        self
    }

    /// Enables or disables dry-run mode.
    ///
    /// # Arguments
    ///
    /// * `dry_run` - When true, rate-limit denial is bypassed, uploads are not
    ///   counted and uploaders are asked to skip the final publish step
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    /// Sets the wait between retry attempts.
    pub fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.config.retry_backoff = backoff;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> PublisherConfig {
        self.config
    }
}
