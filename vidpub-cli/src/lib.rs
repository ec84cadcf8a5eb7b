// vidpub-cli/src/lib.rs
//
// Library portion of the vidpub CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod uploaders;

// Re-export items needed by the binary or integration tests
pub use cli::{AuthArgs, Cli, Commands, UploadArgs};
pub use commands::auth::run_auth;
pub use commands::emergency::{run_resume, run_stop};
pub use commands::status::run_status;
pub use commands::template::run_template;
pub use commands::upload::run_upload;
pub use error::{CliErrorContext, CliResult};
