// vidpub-core/src/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for unit tests, and for integration tests and downstream crates
// through the "test-mocks" feature.

use crate::analyzer::VideoAnalyzer;
use crate::error::{CoreError, CoreResult};
use crate::models::{Platform, UploadMetadata, UploadResult, VideoTechnicalMetadata};
use crate::safety::{Clock, EmergencyStopSource};
use crate::uploaders::{DispatchOptions, PlatformUploader};

use chrono::NaiveDate;

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Analyzer returning fixed dimensions and recording every call.
#[derive(Clone)]
pub struct MockAnalyzer {
    dimensions: Option<(u32, u32)>,
    duration: f64,
    calls: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockAnalyzer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            dimensions: Some((width, height)),
            duration: 30.0,
            calls: Arc::default(),
        }
    }

    /// 1920x1080
    pub fn horizontal() -> Self {
        Self::new(1920, 1080)
    }

    /// 1080x1920
    pub fn vertical() -> Self {
        Self::new(1080, 1920)
    }

    /// Every call fails with an analysis error.
    pub fn failing() -> Self {
        Self {
            dimensions: None,
            duration: 0.0,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl VideoAnalyzer for MockAnalyzer {
    fn analyze(&self, path: &Path) -> CoreResult<VideoTechnicalMetadata> {
        log::info!("MockAnalyzer::analyze called for: {}", path.display());
        self.calls.lock().unwrap().push(path.to_path_buf());
        match self.dimensions {
            Some((width, height)) => Ok(VideoTechnicalMetadata::new(path, self.duration, width, height)),
            None => Err(CoreError::AnalysisError(format!(
                "MockAnalyzer: cannot read {}",
                path.display()
            ))),
        }
    }
}

#[derive(Default)]
struct UploaderState {
    /// Outcomes to play back; the last one repeats once the queue drains
    script: VecDeque<bool>,
    last_outcome: bool,
    upload_calls: usize,
    recover_calls: usize,
    options: Vec<DispatchOptions>,
    metadata: Vec<UploadMetadata>,
    authenticated: bool,
}

/// Uploader playing back a scripted sequence of successes and failures.
///
/// Clones share state, so a test can keep a handle while the engine owns the
/// boxed uploader.
#[derive(Clone)]
pub struct MockUploader {
    platform: Platform,
    failure_message: String,
    state: Arc<Mutex<UploaderState>>,
}

impl MockUploader {
    /// Plays back `outcomes` (true = success), repeating the last one.
    pub fn scripted(platform: Platform, outcomes: impl IntoIterator<Item = bool>) -> Self {
        let script: VecDeque<bool> = outcomes.into_iter().collect();
        let last_outcome = script.back().copied().unwrap_or(true);
        Self {
            platform,
            failure_message: format!("{} upload failed", platform),
            state: Arc::new(Mutex::new(UploaderState {
                script,
                last_outcome,
                authenticated: true,
                ..Default::default()
            })),
        }
    }

    pub fn succeeding(platform: Platform) -> Self {
        Self::scripted(platform, [true])
    }

    pub fn failing(platform: Platform, message: &str) -> Self {
        let mut uploader = Self::scripted(platform, [false]);
        uploader.failure_message = message.to_string();
        uploader
    }

    pub fn upload_calls(&self) -> usize {
        self.state.lock().unwrap().upload_calls
    }

    pub fn recover_calls(&self) -> usize {
        self.state.lock().unwrap().recover_calls
    }

    /// Options received by each upload call, in order.
    pub fn received_options(&self) -> Vec<DispatchOptions> {
        self.state.lock().unwrap().options.clone()
    }

    /// Metadata received by each upload call, in order.
    pub fn received_metadata(&self) -> Vec<UploadMetadata> {
        self.state.lock().unwrap().metadata.clone()
    }
}

impl PlatformUploader for MockUploader {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn authenticate(&mut self) -> CoreResult<()> {
        self.state.lock().unwrap().authenticated = true;
        Ok(())
    }

    fn is_authenticated(&self) -> bool {
        self.state.lock().unwrap().authenticated
    }

    fn upload(
        &mut self,
        video_path: &Path,
        metadata: &UploadMetadata,
        options: &DispatchOptions,
    ) -> UploadResult {
        let mut state = self.state.lock().unwrap();
        state.upload_calls += 1;
        state.options.push(*options);
        state.metadata.push(metadata.clone());

        let succeeded = match state.script.pop_front() {
            Some(outcome) => outcome,
            None => state.last_outcome,
        };
        log::info!(
            "MockUploader({}) attempt {} for {}: {}",
            self.platform,
            options.attempt,
            video_path.display(),
            if succeeded { "success" } else { "failure" }
        );

        if succeeded {
            UploadResult::success(
                self.platform,
                format!("https://{}.example/videos/{}", self.platform, state.upload_calls),
            )
        } else {
            UploadResult::failure(self.platform, self.failure_message.clone())
        }
    }

    fn recover(&mut self) {
        self.state.lock().unwrap().recover_calls += 1;
    }
}

/// In-memory emergency stop. Clones share the flag.
#[derive(Clone, Default)]
pub struct MockEmergencyStop {
    triggered: Arc<AtomicBool>,
}

impl MockEmergencyStop {
    pub fn new(triggered: bool) -> Self {
        Self {
            triggered: Arc::new(AtomicBool::new(triggered)),
        }
    }
}

impl EmergencyStopSource for MockEmergencyStop {
    fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    fn trigger(&self) -> CoreResult<()> {
        self.triggered.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn reset(&self) -> CoreResult<()> {
        self.triggered.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// Settable calendar day. Clones share the date.
#[derive(Clone)]
pub struct FixedClock {
    date: Arc<Mutex<NaiveDate>>,
}

impl FixedClock {
    /// Panics on an invalid date.
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            date: Arc::new(Mutex::new(date(year, month, day))),
        }
    }

    pub fn set(&self, year: i32, month: u32, day: u32) {
        *self.date.lock().unwrap() = date(year, month, day);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.date.lock().unwrap()
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("FixedClock: invalid date")
}
