//! Default platform selection based on video orientation.

use crate::models::{Platform, VideoTechnicalMetadata};

/// Chooses target platforms when the caller does not name any.
///
/// Vertical video goes to the short-form platforms; everything else,
/// including square video, goes to regular YouTube.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformRouter;

impl PlatformRouter {
    pub fn new() -> Self {
        Self
    }

    pub fn route(&self, metadata: &VideoTechnicalMetadata) -> Vec<Platform> {
        if metadata.is_vertical() {
            vec![Platform::TikTok, Platform::Instagram, Platform::YouTubeShorts]
        } else {
            vec![Platform::YouTube]
        }
    }
}
