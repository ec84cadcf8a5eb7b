// ============================================================================
// vidpub-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the vidpub-core Library
//
// This module defines the error types used throughout the vidpub-core library.
// Two layers exist:
//
// - CoreError: genuine faults (I/O, unreadable video, broken configuration,
//   rate-limit store write failures). These propagate as `Err`.
// - FailureReason: pipeline outcomes that are reported to callers as failed
//   `UploadResult`s rather than raised (emergency stop, risk block, quota
//   exhaustion, missing uploader, failed upload attempt).
//
// AI-ASSISTANT-INFO: Error types and result alias for vidpub-core

// ---- External crate imports ----
use thiserror::Error;

// ---- Standard library imports ----
use std::fmt;
use std::io;

// ============================================================================
// CORE ERROR TYPE
// ============================================================================

/// Errors that can be raised by the vidpub-core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The analyzer could not read technical metadata from the video.
    #[error("Failed to analyze video: {0}")]
    AnalysisError(String),

    /// A platform uploader could not authenticate.
    #[error("Authentication failed for {platform}: {message}")]
    AuthError { platform: String, message: String },

    /// The rate-limit store could not be written.
    #[error("Rate limit store error: {0}")]
    RateLimitStore(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown platform: '{0}'")]
    UnknownPlatform(String),

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, io::Error),

    #[error("Command '{0}' failed: {1}")]
    CommandFailed(String, String),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result alias used across the library.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

// ============================================================================
// PIPELINE FAILURE REASONS
// ============================================================================

/// Why a platform did not receive a successful upload.
///
/// The `Display` output is exactly the error string stored in the
/// corresponding failed [`crate::UploadResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The emergency stop was active when the call started.
    EmergencyStopActive,

    /// The risk detector hard-blocked the metadata. Carries the warning that
    /// caused the block.
    RiskBlocked(String),

    /// The platform's daily ceiling has been reached.
    RateLimitExceeded,

    /// No uploader is registered for the platform.
    PlatformNotImplemented,

    /// The uploader reported a failure on its final attempt.
    UploadAttemptFailed(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmergencyStopActive => write!(f, "Emergency Stop Triggered"),
            Self::RiskBlocked(warning) => write!(f, "Risk check failed: {}", warning),
            Self::RateLimitExceeded => write!(f, "Daily rate limit exceeded"),
            Self::PlatformNotImplemented => write!(f, "Platform not yet implemented"),
            Self::UploadAttemptFailed(message) => write!(f, "{}", message),
        }
    }
}

// ============================================================================
// ERROR CONSTRUCTION HELPERS
// ============================================================================

/// Builds a [`CoreError::CommandStart`] for a program that could not be spawned.
pub fn command_start_error(program: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(program.into(), err)
}

/// Builds a [`CoreError::CommandFailed`] from a non-zero exit and its stderr.
pub fn command_failed_error(program: impl Into<String>, code: Option<i32>, stderr: &str) -> CoreError {
    let detail = match code {
        Some(code) => format!("exit code {}: {}", code, stderr.trim()),
        None => format!("terminated by signal: {}", stderr.trim()),
    };
    CoreError::CommandFailed(program.into(), detail)
}
