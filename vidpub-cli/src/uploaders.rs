// vidpub-cli/src/uploaders.rs
//
// Builds the uploader registry from the environment. Each platform whose
// VIDPUB_UPLOADER_<PLATFORM> variable names a program gets a CommandUploader;
// the rest stay unregistered.

use vidpub_core::{CommandUploader, Platform, UploaderRegistry};

use log::debug;

use std::env;

/// Prefix of the per-platform uploader program variables.
pub const UPLOADER_ENV_PREFIX: &str = "VIDPUB_UPLOADER_";

/// `VIDPUB_UPLOADER_YOUTUBE`, `VIDPUB_UPLOADER_YOUTUBE_SHORTS`, ...
pub fn uploader_env_var(platform: Platform) -> String {
    format!("{}{}", UPLOADER_ENV_PREFIX, platform.as_str().to_ascii_uppercase())
}

/// Registry built from the process environment.
pub fn registry_from_env() -> UploaderRegistry {
    registry_from_lookup(|key| env::var(key).ok())
}

/// Registry built from an arbitrary variable lookup. Blank values are ignored.
pub fn registry_from_lookup<F>(lookup: F) -> UploaderRegistry
where
    F: Fn(&str) -> Option<String>,
{
    let mut registry = UploaderRegistry::new();
    for platform in Platform::ALL {
        let var = uploader_env_var(platform);
        match lookup(&var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            Some(program) => {
                debug!("{} uploader: {}", platform, program);
                registry.register(Box::new(CommandUploader::new(platform, program)));
            }
            None => debug!("{} has no uploader ({} unset)", platform, var),
        }
    }
    registry
}
