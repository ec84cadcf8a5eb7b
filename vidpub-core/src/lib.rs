//! Core library for publishing one video to several social platforms.
//!
//! This crate analyzes a video, routes it to platforms by orientation, screens
//! its metadata for ban-risk patterns, enforces per-platform daily quotas and
//! an emergency stop, and dispatches to injected platform uploaders with
//! per-platform retry policies.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidpub_core::{Platform, Publisher, PublisherConfig, UploadMetadata};
//! use vidpub_core::analyzer::FfprobeAnalyzer;
//! use vidpub_core::uploaders::{CommandUploader, UploaderRegistry};
//! use std::path::Path;
//!
//! let config = PublisherConfig::from_env();
//! config.validate().unwrap();
//!
//! let uploaders = UploaderRegistry::new()
//!     .with(Box::new(CommandUploader::new(Platform::TikTok, "/opt/uploaders/tiktok")))
//!     .with(Box::new(CommandUploader::new(Platform::Instagram, "/opt/uploaders/instagram")));
//!
//! let mut publisher = Publisher::from_config(&config, FfprobeAnalyzer::new(), uploaders).unwrap();
//! let metadata = UploadMetadata::from_json_file(Path::new("clip.json")).unwrap();
//!
//! let results = publisher.upload(Path::new("clip.mp4"), None, Some(&metadata)).unwrap();
//! ```

pub mod analyzer;
pub mod config;
pub mod engine;
pub mod error;
pub mod metadata;
pub mod models;
pub mod retry;
pub mod routing;
pub mod safety;
pub mod uploaders;

#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// Re-exports for public API
pub use analyzer::{FfprobeAnalyzer, VideoAnalyzer};
pub use config::{PublisherConfig, PublisherConfigBuilder};
pub use engine::Publisher;
pub use error::{CoreError, CoreResult, FailureReason};
pub use metadata::MetadataOverrides;
pub use models::{Platform, PrivacyStatus, Scheduling, UploadMetadata, UploadResult, VideoTechnicalMetadata};
pub use retry::{RetryPolicies, RetryPolicy};
pub use routing::PlatformRouter;
pub use safety::{EmergencyStopSource, FileEmergencyStop, RateLimiter, RiskCheckResult, RiskDetector};
pub use uploaders::{CommandUploader, DispatchOptions, PlatformUploader, UploaderRegistry};
