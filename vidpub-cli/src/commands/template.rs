//! Implementation of the 'template' subcommand.

use crate::error::CliResult;

use vidpub_core::UploadMetadata;

/// Prints the default metadata document, ready to be saved and edited.
pub fn run_template() -> CliResult<()> {
    println!("{}", UploadMetadata::template().to_json_string()?);
    Ok(())
}
