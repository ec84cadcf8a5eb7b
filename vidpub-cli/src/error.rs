// ============================================================================
// vidpub-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: context for errors on their way to main()
//
// The CLI reuses CoreError. Commands prefix failures with what they were
// doing; a failure that already carries CLI context is extended in place
// instead of being wrapped in a second "Operation failed:" layer.
//
// AI-ASSISTANT-INFO: CLI error handling utilities

// ---- Internal crate imports ----
use vidpub_core::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::fmt;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Prefixes a failure (or a missing value) with what the command was doing.
pub trait CliErrorContext<T> {
    fn cli_context(self, context: impl fmt::Display) -> CliResult<T>;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_context(self, context: impl fmt::Display) -> CliResult<T> {
        self.map_err(|e| with_context(context, e.into()))
    }
}

impl<T> CliErrorContext<T> for Option<T> {
    fn cli_context(self, context: impl fmt::Display) -> CliResult<T> {
        self.ok_or_else(|| CoreError::OperationFailed(context.to_string()))
    }
}

fn with_context(context: impl fmt::Display, error: CoreError) -> CoreError {
    match error {
        CoreError::OperationFailed(message) => {
            CoreError::OperationFailed(format!("{}: {}", context, message))
        }
        other => CoreError::OperationFailed(format!("{}: {}", context, other)),
    }
}
