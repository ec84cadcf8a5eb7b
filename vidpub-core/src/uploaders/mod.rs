// ============================================================================
// vidpub-core/src/uploaders/mod.rs
// ============================================================================
//
// PLATFORM UPLOADERS: Uploader Contract and Registry
//
// Each platform has one uploader that owns whatever session state publishing
// needs (API tokens, a browser instance, cookies). The engine never shares or
// interleaves uploaders, so implementations may hold exclusive handles.
//
// KEY COMPONENTS:
// - PlatformUploader: the contract every platform implements
// - DispatchOptions: per-attempt options forwarded by the engine
// - UploaderRegistry: explicit Platform -> uploader map built by the caller
// - CommandUploader: adapter delegating to an external program
//
// AI-ASSISTANT-INFO: Uploader trait, dispatch options and registry

// ---- Internal crate imports ----
use crate::error::CoreResult;
use crate::models::{Platform, UploadMetadata, UploadResult};

// ---- Standard library imports ----
use std::collections::HashMap;
use std::path::Path;

pub mod command;

pub use command::CommandUploader;

// ============================================================================
// UPLOADER CONTRACT
// ============================================================================

/// Options the engine passes with every upload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Skip the final, irreversible publish step
    pub dry_run: bool,
    /// 1-based attempt number within the platform's retry policy
    pub attempt: u32,
}

/// Publishing capability for one platform.
pub trait PlatformUploader: Send {
    /// The platform this uploader publishes to.
    fn platform(&self) -> Platform;

    /// Establishes a session. Fails with [`crate::CoreError::AuthError`].
    fn authenticate(&mut self) -> CoreResult<()>;

    fn is_authenticated(&self) -> bool;

    /// Publishes one video.
    ///
    /// Never fails: problems are reported through the returned result's
    /// `success` and `error` fields.
    fn upload(
        &mut self,
        video_path: &Path,
        metadata: &UploadMetadata,
        options: &DispatchOptions,
    ) -> UploadResult;

    /// Best-effort reset to a known state (e.g. navigate home) before a retry.
    fn recover(&mut self) {}
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Uploaders keyed by platform, built once by the composition root and
/// reused across videos so authenticated sessions survive between uploads.
#[derive(Default)]
pub struct UploaderRegistry {
    uploaders: HashMap<Platform, Box<dyn PlatformUploader>>,
}

impl UploaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `uploader` under its own platform, replacing any previous one.
    pub fn register(&mut self, uploader: Box<dyn PlatformUploader>) {
        let platform = uploader.platform();
        if self.uploaders.insert(platform, uploader).is_some() {
            log::debug!("Replaced uploader for {}", platform);
        }
    }

    /// Builder-style [`UploaderRegistry::register`].
    pub fn with(mut self, uploader: Box<dyn PlatformUploader>) -> Self {
        self.register(uploader);
        self
    }

    pub fn contains(&self, platform: Platform) -> bool {
        self.uploaders.contains_key(&platform)
    }

    pub fn get_mut(&mut self, platform: Platform) -> Option<&mut (dyn PlatformUploader + 'static)> {
        self.uploaders.get_mut(&platform).map(|uploader| uploader.as_mut())
    }

    /// Registered platforms in declaration order.
    pub fn platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.uploaders.contains_key(p))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.uploaders.is_empty()
    }
}
