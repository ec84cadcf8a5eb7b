// ============================================================================
// vidpub-core/src/models.rs
// ============================================================================
//
// DATA MODEL: Platforms, Video Metadata and Upload Results
//
// KEY COMPONENTS:
// - Platform: closed set of publishing destinations, used as a map key
// - VideoTechnicalMetadata: probed properties of a video (read-only)
// - UploadMetadata: caller-supplied publishing metadata
// - UploadResult: per-platform outcome returned by the engine
//
// AI-ASSISTANT-INFO: Core data model shared by every vidpub component

// ---- Internal crate imports ----
use crate::error::{CoreError, FailureReason};

// ---- External crate imports ----
use serde::{Deserialize, Serialize};

// ---- Standard library imports ----
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ============================================================================
// PLATFORM
// ============================================================================

/// A destination service a video can be published to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[serde(rename = "youtube")]
    YouTube,
    #[serde(rename = "youtube_shorts")]
    YouTubeShorts,
    #[serde(rename = "tiktok")]
    TikTok,
    Instagram,
}

impl Platform {
    /// Every platform, in declaration order.
    pub const ALL: [Platform; 4] = [
        Platform::YouTube,
        Platform::YouTubeShorts,
        Platform::TikTok,
        Platform::Instagram,
    ];

    /// Stable identifier used in persisted state and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::YouTube => "youtube",
            Platform::YouTubeShorts => "youtube_shorts",
            Platform::TikTok => "tiktok",
            Platform::Instagram => "instagram",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "youtube" => Ok(Platform::YouTube),
            "youtube_shorts" | "youtube-shorts" | "shorts" => Ok(Platform::YouTubeShorts),
            "tiktok" => Ok(Platform::TikTok),
            "instagram" => Ok(Platform::Instagram),
            other => Err(CoreError::UnknownPlatform(other.to_string())),
        }
    }
}

// ============================================================================
// VIDEO TECHNICAL METADATA
// ============================================================================

/// Technical properties of a video file, produced once per upload call by a
/// [`crate::analyzer::VideoAnalyzer`].
#[derive(Debug, Clone, PartialEq)]
pub struct VideoTechnicalMetadata {
    pub path: PathBuf,
    /// Duration in seconds
    pub duration: f64,
    pub width: u32,
    pub height: u32,
    /// `width / height`
    pub aspect_ratio: f64,
}

impl VideoTechnicalMetadata {
    /// Creates metadata and derives the aspect ratio from the dimensions.
    pub fn new(path: impl Into<PathBuf>, duration: f64, width: u32, height: u32) -> Self {
        let aspect_ratio = if height == 0 {
            0.0
        } else {
            f64::from(width) / f64::from(height)
        };
        Self {
            path: path.into(),
            duration,
            width,
            height,
            aspect_ratio,
        }
    }

    /// True when the frame is taller than it is wide. Square video is not vertical.
    pub fn is_vertical(&self) -> bool {
        self.height > self.width
    }
}

// ============================================================================
// UPLOAD METADATA
// ============================================================================

/// Visibility of a published video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyStatus {
    #[default]
    Public,
    Private,
    Unlisted,
}

/// When the video should go live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scheduling {
    #[serde(default = "default_publish_now")]
    pub publish_now: bool,
    /// ISO-8601 / RFC 3339 timestamp, used when `publish_now` is false
    #[serde(default)]
    pub scheduled_time: Option<String>,
}

fn default_publish_now() -> bool {
    true
}

impl Default for Scheduling {
    fn default() -> Self {
        Self {
            publish_now: true,
            scheduled_time: None,
        }
    }
}

/// Caller-supplied publishing metadata, forwarded unmodified to every uploader.
///
/// Deserializes from the JSON metadata file format; every field is optional
/// and unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct UploadMetadata {
    pub title: String,
    pub description: String,
    /// Ordered, duplicates allowed
    pub tags: Vec<String>,
    pub privacy_status: PrivacyStatus,
    pub category_id: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<String>,
    pub scheduling: Scheduling,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata_generated_at: Option<String>,
}

/// Default YouTube category ("People & Blogs").
pub const DEFAULT_CATEGORY_ID: &str = "22";

/// Default metadata language (ISO 639-1).
pub const DEFAULT_LANGUAGE: &str = "en";

impl Default for UploadMetadata {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            tags: Vec::new(),
            privacy_status: PrivacyStatus::Public,
            category_id: DEFAULT_CATEGORY_ID.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            thumbnail: None,
            playlist_id: None,
            scheduling: Scheduling::default(),
            metadata_generated_at: None,
        }
    }
}

// ============================================================================
// UPLOAD RESULT
// ============================================================================

/// Outcome of publishing one video to one platform.
///
/// Build through [`UploadResult::success`] or [`UploadResult::failure`] so
/// that `url` is present exactly when `success` is true and `error` exactly
/// when it is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub platform: Platform,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadResult {
    pub fn success(platform: Platform, url: impl Into<String>) -> Self {
        Self {
            platform,
            success: true,
            url: Some(url.into()),
            error: None,
        }
    }

    pub fn failure(platform: Platform, error: impl Into<String>) -> Self {
        Self {
            platform,
            success: false,
            url: None,
            error: Some(error.into()),
        }
    }

    /// A failed result whose message is the pipeline reason's display text.
    pub fn from_reason(platform: Platform, reason: &FailureReason) -> Self {
        Self::failure(platform, reason.to_string())
    }
}

/// Convenience used by log lines and the CLI.
pub fn display_path(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
