// ============================================================================
// vidpub-core/src/analyzer.rs
// ============================================================================
//
// VIDEO ANALYSIS: Technical Metadata Extraction
//
// The engine only needs duration and frame size to route a video. Extraction
// sits behind the VideoAnalyzer trait so the engine can be driven by a fake
// in tests; FfprobeAnalyzer is the production implementation built on the
// ffprobe crate.
//
// AI-ASSISTANT-INFO: Analyzer trait and ffprobe-backed implementation

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};
use crate::models::VideoTechnicalMetadata;

// ---- External crate imports ----
use ffprobe::{FfProbeError, ffprobe};

// ---- Standard library imports ----
use std::path::Path;

/// Produces technical metadata for a video file.
pub trait VideoAnalyzer {
    /// Fails with [`CoreError::AnalysisError`] on unreadable or corrupt input.
    fn analyze(&self, path: &Path) -> CoreResult<VideoTechnicalMetadata>;
}

/// Analyzer that shells out to `ffprobe` through the ffprobe crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfprobeAnalyzer;

impl FfprobeAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl VideoAnalyzer for FfprobeAnalyzer {
    fn analyze(&self, path: &Path) -> CoreResult<VideoTechnicalMetadata> {
        log::debug!("Running ffprobe (via crate) on: {}", path.display());

        if !path.is_file() {
            return Err(CoreError::AnalysisError(format!(
                "'{}' does not exist or is not a file",
                path.display()
            )));
        }

        let probe = ffprobe(path).map_err(|err| {
            log::error!("ffprobe failed for {}: {:?}", path.display(), err);
            map_ffprobe_error(err, path)
        })?;

        let video_stream = probe
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
            .ok_or_else(|| {
                CoreError::AnalysisError(format!("No video stream found in {}", path.display()))
            })?;

        let (width, height) = match (video_stream.width, video_stream.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
            (w, h) => {
                return Err(CoreError::AnalysisError(format!(
                    "Invalid dimensions in {}: width={:?}, height={:?}",
                    path.display(),
                    w,
                    h
                )));
            }
        };

        let duration = probe
            .format
            .duration
            .as_deref()
            .and_then(|d| d.parse::<f64>().ok())
            .ok_or_else(|| {
                CoreError::AnalysisError(format!(
                    "Failed to parse duration from format for {}",
                    path.display()
                ))
            })?;

        let width = u32::try_from(width)
            .map_err(|_| CoreError::AnalysisError(format!("Width {} out of range", width)))?;
        let height = u32::try_from(height)
            .map_err(|_| CoreError::AnalysisError(format!("Height {} out of range", height)))?;

        let metadata = VideoTechnicalMetadata::new(path, duration, width, height);
        log::debug!(
            "Analyzed {}: {}x{}, {:.1}s, vertical={}",
            path.display(),
            width,
            height,
            duration,
            metadata.is_vertical()
        );
        Ok(metadata)
    }
}

fn map_ffprobe_error(err: FfProbeError, path: &Path) -> CoreError {
    let detail = match err {
        FfProbeError::Io(e) => format!("could not run ffprobe: {}", e),
        FfProbeError::Status(output) => format!(
            "ffprobe exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ),
        FfProbeError::Deserialize(e) => format!("unreadable ffprobe output: {}", e),
        other => format!("{:?}", other),
    };
    CoreError::AnalysisError(format!("{}: {}", path.display(), detail))
}
