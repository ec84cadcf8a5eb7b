//! Process-wide kill switch for new uploads.
//!
//! The switch is an abstraction so tests and other deployments can supply
//! their own flag. [`FileEmergencyStop`] is the production source: it is
//! triggered when a sentinel file exists or when an environment variable is
//! set to `true`. Nothing is cached; every check re-reads both.

use crate::config::{PublisherConfig, is_truthy};
use crate::error::{CoreError, CoreResult};

use log::{info, warn};

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A durable, externally settable stop flag.
pub trait EmergencyStopSource {
    /// Re-evaluates the flag.
    fn is_triggered(&self) -> bool;

    /// Sets the flag.
    fn trigger(&self) -> CoreResult<()>;

    /// Clears the flag this source controls.
    fn reset(&self) -> CoreResult<()>;
}

/// Sentinel file plus environment variable override.
#[derive(Debug, Clone)]
pub struct FileEmergencyStop {
    stop_file: PathBuf,
    env_var: String,
}

impl FileEmergencyStop {
    pub fn new(stop_file: impl Into<PathBuf>, env_var: impl Into<String>) -> Self {
        Self {
            stop_file: stop_file.into(),
            env_var: env_var.into(),
        }
    }

    pub fn from_config(config: &PublisherConfig) -> Self {
        Self::new(config.stop_file.clone(), config.stop_env_var.clone())
    }

    pub fn stop_file(&self) -> &Path {
        &self.stop_file
    }

    /// True when the environment override alone is active. `reset` cannot
    /// clear it.
    pub fn env_override_active(&self) -> bool {
        env::var(&self.env_var).is_ok_and(|v| is_truthy(&v))
    }
}

impl EmergencyStopSource for FileEmergencyStop {
    fn is_triggered(&self) -> bool {
        self.stop_file.exists() || self.env_override_active()
    }

    fn trigger(&self) -> CoreResult<()> {
        if let Some(parent) = self.stop_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.stop_file)
            .map_err(|e| {
                CoreError::PathError(format!(
                    "cannot create stop file '{}': {}",
                    self.stop_file.display(),
                    e
                ))
            })?;
        warn!("Emergency stop triggered via {}", self.stop_file.display());
        Ok(())
    }

    fn reset(&self) -> CoreResult<()> {
        match fs::remove_file(&self.stop_file) {
            Ok(()) => info!("Emergency stop reset: removed {}", self.stop_file.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        if self.env_override_active() {
            warn!(
                "{} is still set to true; uploads remain stopped until it is cleared",
                self.env_var
            );
        }
        Ok(())
    }
}
