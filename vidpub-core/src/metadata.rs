//! Loading, merging and validating publishing metadata files.
//!
//! Metadata files are JSON documents matching [`UploadMetadata`]. Validation
//! covers structural limits only; content risk is the job of
//! [`crate::safety::RiskDetector`].

use crate::error::{CoreError, CoreResult};
use crate::models::UploadMetadata;

use chrono::DateTime;
use log::debug;

use std::fs;
use std::path::Path;

/// Maximum description length accepted by [`UploadMetadata::validate`].
pub const MAX_DESCRIPTION_CHARS: usize = 5000;

/// Maximum number of tags accepted by [`UploadMetadata::validate`].
pub const MAX_TAGS: usize = 50;

/// Values supplied on the command line that take precedence over a file.
#[derive(Debug, Clone, Default)]
pub struct MetadataOverrides {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl UploadMetadata {
    /// The starting point written out for users to fill in.
    pub fn template() -> Self {
        Self::default()
    }

    /// Reads and validates a metadata file.
    pub fn from_json_file(path: &Path) -> CoreResult<Self> {
        debug!("Loading metadata from {}", path.display());
        let raw = fs::read_to_string(path).map_err(|e| {
            CoreError::InvalidMetadata(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let metadata: UploadMetadata = serde_json::from_str(&raw).map_err(|e| {
            CoreError::InvalidMetadata(format!("'{}' is not valid metadata: {}", path.display(), e))
        })?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Writes the metadata as pretty-printed JSON.
    pub fn to_json_string(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Overlays the non-empty overrides onto this metadata.
    pub fn merge(mut self, overrides: MetadataOverrides) -> Self {
        if let Some(title) = overrides.title {
            self.title = title;
        }
        if let Some(description) = overrides.description {
            self.description = description;
        }
        if let Some(tags) = overrides.tags {
            self.tags = tags;
        }
        self
    }

    /// Checks structural limits and the scheduling block.
    ///
    /// Title length is not enforced here: an over-long title is
    /// a risk warning, not invalid metadata.
    pub fn validate(&self) -> CoreResult<()> {
        let description_len = self.description.chars().count();
        if description_len > MAX_DESCRIPTION_CHARS {
            return Err(CoreError::InvalidMetadata(format!(
                "description has {} characters (max {})",
                description_len, MAX_DESCRIPTION_CHARS
            )));
        }

        if self.tags.len() > MAX_TAGS {
            return Err(CoreError::InvalidMetadata(format!(
                "{} tags supplied (max {})",
                self.tags.len(),
                MAX_TAGS
            )));
        }

        if let Some(time) = &self.scheduling.scheduled_time {
            DateTime::parse_from_rfc3339(time).map_err(|e| {
                CoreError::InvalidMetadata(format!("scheduled_time '{}' is not RFC 3339: {}", time, e))
            })?;
        } else if !self.scheduling.publish_now {
            return Err(CoreError::InvalidMetadata(
                "scheduling.publish_now is false but no scheduled_time was given".to_string(),
            ));
        }

        Ok(())
    }
}
