// ============================================================================
// vidpub-core/src/engine.rs
// ============================================================================
//
// UPLOAD ORCHESTRATION: Main Publishing Workflow
//
// This module houses the orchestration engine. One call to
// `Publisher::upload` publishes one video to every target platform and
// returns exactly one result per platform.
//
// WORKFLOW:
// 1. Gate on the emergency stop (checked once, at entry)
// 2. Analyze the video once
// 3. Run the risk detector; a hard block aborts every platform
// 4. Resolve targets: the caller's list verbatim, or the router
// 5. For each platform, in order and one at a time:
//    a. Rate limiter admission (bypassed in dry-run)
//    b. Registered uploader lookup
//    c. Dispatch under the platform's retry policy
//    d. Count the upload on success (skipped in dry-run)
// 6. Return the per-platform results in target order
//
// Dispatch is sequential. Uploaders may hold exclusive browser sessions that
// must not be interleaved. Batch callers should invoke
// `upload` once per video on one long-lived Publisher so the emergency stop
// is re-checked between videos and sessions are reused.
//
// AI-ASSISTANT-INFO: Upload orchestration engine

// ---- Internal crate imports ----
use crate::analyzer::VideoAnalyzer;
use crate::config::{DEFAULT_RETRY_BACKOFF, PublisherConfig};
use crate::error::{CoreResult, FailureReason};
use crate::models::{Platform, UploadMetadata, UploadResult, display_path};
use crate::retry::{RetryPolicies, RetryPolicy};
use crate::routing::PlatformRouter;
use crate::safety::{EmergencyStopSource, FileEmergencyStop, RateLimiter, RiskDetector};
use crate::uploaders::{DispatchOptions, PlatformUploader, UploaderRegistry};

// ---- External crate imports ----
use log::{debug, error, info, warn};

// ---- Standard library imports ----
use std::path::Path;
use std::thread;

/// The upload orchestration engine.
///
/// Generic over the analyzer and the emergency stop source so both can be
/// replaced in tests. Uploaders are injected through an [`UploaderRegistry`].
///
/// # Examples
///
/// ```rust,no_run
/// use vidpub_core::{Platform, Publisher, PublisherConfig, UploadMetadata};
/// use vidpub_core::analyzer::FfprobeAnalyzer;
/// use vidpub_core::uploaders::{CommandUploader, UploaderRegistry};
/// use std::path::Path;
///
/// let config = PublisherConfig::from_env();
/// let uploaders = UploaderRegistry::new()
///     .with(Box::new(CommandUploader::new(Platform::YouTube, "/usr/local/bin/yt-upload")));
/// let mut publisher = Publisher::from_config(&config, FfprobeAnalyzer::new(), uploaders).unwrap();
///
/// let metadata = UploadMetadata { title: "Sunset".to_string(), ..Default::default() };
/// let results = publisher.upload(Path::new("sunset.mp4"), None, Some(&metadata)).unwrap();
/// for result in results {
///     println!("{}: {:?}", result.platform, result.url.or(result.error));
/// }
/// ```
pub struct Publisher<A: VideoAnalyzer, E: EmergencyStopSource> {
    analyzer: A,
    emergency_stop: E,
    rate_limiter: RateLimiter,
    risk_detector: RiskDetector,
    router: PlatformRouter,
    uploaders: UploaderRegistry,
    retry_policies: RetryPolicies,
    dry_run: bool,
}

impl<A: VideoAnalyzer> Publisher<A, FileEmergencyStop> {
    /// Builds an engine whose rate limiter, emergency stop and retry table
    /// come from `config`.
    pub fn from_config(config: &PublisherConfig, analyzer: A, uploaders: UploaderRegistry) -> CoreResult<Self> {
        config.validate()?;
        Ok(Publisher::new(
            analyzer,
            FileEmergencyStop::from_config(config),
            RateLimiter::from_config(config),
            uploaders,
        )
        .with_retry_policies(config.retry_policies())
        .with_dry_run(config.dry_run))
    }
}

impl<A: VideoAnalyzer, E: EmergencyStopSource> Publisher<A, E> {
    /// Creates an engine with the default risk detector, the router and the
    /// standard retry table.
    pub fn new(analyzer: A, emergency_stop: E, rate_limiter: RateLimiter, uploaders: UploaderRegistry) -> Self {
        Self {
            analyzer,
            emergency_stop,
            rate_limiter,
            risk_detector: RiskDetector::new(),
            router: PlatformRouter::new(),
            uploaders,
            retry_policies: RetryPolicies::standard(DEFAULT_RETRY_BACKOFF),
            dry_run: false,
        }
    }

    pub fn with_retry_policies(mut self, policies: RetryPolicies) -> Self {
        self.retry_policies = policies;
        self
    }

    pub fn with_risk_detector(mut self, detector: RiskDetector) -> Self {
        self.risk_detector = detector;
        self
    }

    /// Dry-run bypasses rate-limit denial, skips counting uploads and is
    /// forwarded to uploaders so they skip the final publish step.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    pub fn emergency_stop(&self) -> &E {
        &self.emergency_stop
    }

    pub fn uploaders(&self) -> &UploaderRegistry {
        &self.uploaders
    }

    pub fn uploaders_mut(&mut self) -> &mut UploaderRegistry {
        &mut self.uploaders
    }

    /// Publishes one video.
    ///
    /// # Arguments
    ///
    /// * `video_path` - The video to publish
    /// * `platforms` - Explicit targets, used verbatim. `None` or an empty
    ///   list lets the router decide from the video's orientation
    /// * `metadata` - Publishing metadata; `None` uses the defaults
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<UploadResult>)` - One entry per target platform, in target
    ///   order. Emergency stop, risk blocks, quota exhaustion, missing
    ///   uploaders and failed uploads are all reported here
    /// * `Err(CoreError::AnalysisError)` - The video could not be analyzed
    /// * `Err(CoreError::RateLimitStore)` - A successful upload could not be
    ///   counted
    pub fn upload(
        &mut self,
        video_path: &Path,
        platforms: Option<&[Platform]>,
        metadata: Option<&UploadMetadata>,
    ) -> CoreResult<Vec<UploadResult>> {
        let explicit = platforms.filter(|list| !list.is_empty());

        // ====================================================================
        // STEP 1: EMERGENCY STOP
        // ====================================================================
        if self.emergency_stop.is_triggered() {
            warn!("Emergency stop active, refusing to publish {}", display_path(video_path));
            return Ok(fail_all(explicit.unwrap_or_default(), &FailureReason::EmergencyStopActive));
        }

        // ====================================================================
        // STEP 2: ANALYZE
        // ====================================================================
        info!("Analyzing video: {}", video_path.display());
        let video = self.analyzer.analyze(video_path)?;
        debug!("Technical metadata: {:?}", video);

        // ====================================================================
        // STEP 3: RISK CHECK
        // ====================================================================
        let default_metadata;
        let metadata = match metadata {
            Some(metadata) => metadata,
            None => {
                default_metadata = UploadMetadata::default();
                &default_metadata
            }
        };

        let risk = self.risk_detector.check(metadata);
        for warning in &risk.warnings {
            warn!("Risk warning: {}", warning);
        }

        // ====================================================================
        // STEP 4: RESOLVE TARGETS
        // ====================================================================
        let targets: Vec<Platform> = match explicit {
            Some(list) => list.to_vec(),
            None => self.router.route(&video),
        };
        info!(
            "Target platforms: {}",
            targets.iter().map(Platform::as_str).collect::<Vec<_>>().join(", ")
        );

        if !risk.is_safe {
            let reason = risk.warnings.into_iter().next().unwrap_or_default();
            error!("Upload blocked by risk check: {}", reason);
            return Ok(fail_all(&targets, &FailureReason::RiskBlocked(reason)));
        }

        // ====================================================================
        // STEP 5: PER-PLATFORM DISPATCH
        // ====================================================================
        let mut results = Vec::with_capacity(targets.len());
        for platform in targets {
            let result = self.dispatch(platform, video_path, metadata)?;
            if result.success {
                info!("{}: published at {}", platform, result.url.as_deref().unwrap_or_default());
            } else {
                warn!("{}: {}", platform, result.error.as_deref().unwrap_or_default());
            }
            results.push(result);
        }

        Ok(results)
    }

    fn dispatch(&mut self, platform: Platform, video_path: &Path, metadata: &UploadMetadata) -> CoreResult<UploadResult> {
        if !self.rate_limiter.can_upload(platform) {
            if self.dry_run {
                info!("{}: daily limit reached, ignored in dry-run mode", platform);
            } else {
                return Ok(UploadResult::from_reason(platform, &FailureReason::RateLimitExceeded));
            }
        }

        let policy = self.retry_policies.policy_for(platform);
        let dry_run = self.dry_run;
        let result = match self.uploaders.get_mut(platform) {
            Some(uploader) => settle(platform, upload_with_retry(uploader, &policy, video_path, metadata, dry_run)),
            None => return Ok(UploadResult::from_reason(platform, &FailureReason::PlatformNotImplemented)),
        };

        if result.success && !self.dry_run {
            self.rate_limiter.record_upload(platform)?;
        }
        Ok(result)
    }
}

/// Runs up to `policy.attempts()` attempts and returns the last result.
fn upload_with_retry(
    uploader: &mut dyn PlatformUploader,
    policy: &RetryPolicy,
    video_path: &Path,
    metadata: &UploadMetadata,
    dry_run: bool,
) -> UploadResult {
    let platform = uploader.platform();
    let max_attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        info!("Uploading to {} (attempt {}/{})", platform, attempt, max_attempts);
        let options = DispatchOptions { dry_run, attempt };
        let result = uploader.upload(video_path, metadata, &options);

        if result.success || attempt >= max_attempts {
            return result;
        }

        warn!(
            "{} attempt {} failed: {}",
            platform,
            attempt,
            result.error.as_deref().unwrap_or("unknown error")
        );
        if policy.recover_between_attempts {
            debug!("Running {} recovery before retrying", platform);
            uploader.recover();
        }
        if !policy.backoff.is_zero() {
            info!("Retrying {} in {}s", platform, policy.backoff.as_secs_f32());
            thread::sleep(policy.backoff);
        }
        attempt += 1;
    }
}

/// Rebuilds an uploader's final result so it carries the dispatched
/// platform and has a URL exactly when it succeeded. A success without a URL
/// counts as a failed attempt.
fn settle(platform: Platform, result: UploadResult) -> UploadResult {
    if result.platform != platform {
        warn!("{} uploader reported its result as {}", platform, result.platform);
    }

    match (result.success, result.url, result.error) {
        (true, Some(url), _) if !url.trim().is_empty() => UploadResult::success(platform, url),
        (true, _, _) => {
            warn!("{} uploader reported success without a URL", platform);
            UploadResult::from_reason(
                platform,
                &FailureReason::UploadAttemptFailed("Uploader reported success without a video URL".to_string()),
            )
        }
        (false, _, error) => UploadResult::from_reason(
            platform,
            &FailureReason::UploadAttemptFailed(error.unwrap_or_else(|| "Upload failed".to_string())),
        ),
    }
}

fn fail_all(platforms: &[Platform], reason: &FailureReason) -> Vec<UploadResult> {
    platforms
        .iter()
        .map(|platform| UploadResult::from_reason(*platform, reason))
        .collect()
}
