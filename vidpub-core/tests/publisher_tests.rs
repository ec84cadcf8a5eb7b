// vidpub-core/tests/publisher_tests.rs

use vidpub_core::config::default_daily_limits;
use vidpub_core::mocks::{FixedClock, MockAnalyzer, MockEmergencyStop, MockUploader};
use vidpub_core::*;
use std::path::Path;
use std::time::Duration;
use tempfile::{TempDir, tempdir};

// --- Test Helper Functions ---

fn limiter(dir: &TempDir, clock: &FixedClock) -> RateLimiter {
    RateLimiter::with_clock(
        dir.path().join("safety").join("rate_limits.json"),
        default_daily_limits(),
        Box::new(clock.clone()),
    )
}

fn build(
    dir: &TempDir,
    analyzer: &MockAnalyzer,
    stop: &MockEmergencyStop,
    uploaders: UploaderRegistry,
) -> Publisher<MockAnalyzer, MockEmergencyStop> {
    let clock = FixedClock::new(2025, 3, 14);
    Publisher::new(analyzer.clone(), stop.clone(), limiter(dir, &clock), uploaders)
        .with_retry_policies(RetryPolicies::standard(Duration::ZERO))
}

fn titled(title: &str) -> UploadMetadata {
    UploadMetadata {
        title: title.to_string(),
        ..Default::default()
    }
}

// --- Emergency stop ---

#[test]
fn test_emergency_stop_fails_every_requested_platform() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let analyzer = MockAnalyzer::horizontal();
    let youtube = MockUploader::succeeding(Platform::YouTube);
    let mut publisher = build(
        &dir,
        &analyzer,
        &MockEmergencyStop::new(true),
        UploaderRegistry::new().with(Box::new(youtube.clone())),
    );

    let results = publisher.upload(
        Path::new("a.mp4"),
        Some(&[Platform::YouTube, Platform::TikTok]),
        Some(&titled("Hello")),
    )?;

    assert_eq!(results.len(), 2);
    for result in &results {
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Emergency Stop Triggered"));
    }
    assert!(analyzer.calls().is_empty(), "analyzer must not run while stopped");
    assert_eq!(youtube.upload_calls(), 0);
    Ok(())
}

#[test]
fn test_emergency_stop_without_platforms_returns_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let analyzer = MockAnalyzer::vertical();
    let mut publisher = build(&dir, &analyzer, &MockEmergencyStop::new(true), UploaderRegistry::new());

    let results = publisher.upload(Path::new("a.mp4"), None, None)?;
    assert!(results.is_empty());
    assert!(analyzer.calls().is_empty());
    Ok(())
}

#[test]
fn test_emergency_stop_is_rechecked_on_every_call() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let stop = MockEmergencyStop::new(false);
    let youtube = MockUploader::succeeding(Platform::YouTube);
    let mut publisher = build(
        &dir,
        &MockAnalyzer::horizontal(),
        &stop,
        UploaderRegistry::new().with(Box::new(youtube.clone())),
    );

    let first = publisher.upload(Path::new("one.mp4"), None, Some(&titled("One")))?;
    assert!(first[0].success);

    stop.trigger()?;
    let second = publisher.upload(Path::new("two.mp4"), Some(&[Platform::YouTube]), Some(&titled("Two")))?;
    assert!(!second[0].success);
    assert_eq!(youtube.upload_calls(), 1);
    Ok(())
}

// --- Routing and dispatch ---

#[test]
fn test_vertical_video_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let tiktok = MockUploader::succeeding(Platform::TikTok);
    let instagram = MockUploader::succeeding(Platform::Instagram);
    let shorts = MockUploader::succeeding(Platform::YouTubeShorts);
    let mut publisher = build(
        &dir,
        &MockAnalyzer::vertical(),
        &MockEmergencyStop::new(false),
        UploaderRegistry::new()
            .with(Box::new(tiktok.clone()))
            .with(Box::new(instagram.clone()))
            .with(Box::new(shorts.clone())),
    );

    let results = publisher.upload(Path::new("clip.mp4"), None, Some(&titled("Morning run")))?;

    let platforms: Vec<Platform> = results.iter().map(|r| r.platform).collect();
    assert_eq!(platforms, vec![Platform::TikTok, Platform::Instagram, Platform::YouTubeShorts]);
    assert!(results.iter().all(|r| r.success && r.url.is_some()));

    let limiter = publisher.rate_limiter();
    assert_eq!(limiter.count_today(Platform::TikTok), 1);
    assert_eq!(limiter.count_today(Platform::Instagram), 1);
    assert_eq!(limiter.count_today(Platform::YouTubeShorts), 1);
    assert_eq!(limiter.count_today(Platform::YouTube), 0);
    Ok(())
}

#[test]
fn test_explicit_platforms_override_routing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let instagram = MockUploader::succeeding(Platform::Instagram);
    let mut publisher = build(
        &dir,
        &MockAnalyzer::horizontal(),
        &MockEmergencyStop::new(false),
        UploaderRegistry::new().with(Box::new(instagram.clone())),
    );

    let results = publisher.upload(Path::new("wide.mp4"), Some(&[Platform::Instagram]), None)?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].platform, Platform::Instagram);
    assert!(results[0].success);
    Ok(())
}

#[test]
fn test_unregistered_platform_is_not_implemented() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let mut publisher = build(
        &dir,
        &MockAnalyzer::horizontal(),
        &MockEmergencyStop::new(false),
        UploaderRegistry::new(),
    );

    let results = publisher.upload(Path::new("wide.mp4"), None, None)?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].platform, Platform::YouTube);
    assert!(!results[0].success);
    assert_eq!(results[0].error.as_deref(), Some("Platform not yet implemented"));
    assert_eq!(publisher.rate_limiter().count_today(Platform::YouTube), 0);
    Ok(())
}

#[test]
fn test_analyzer_failure_propagates() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let youtube = MockUploader::succeeding(Platform::YouTube);
    let mut publisher = build(
        &dir,
        &MockAnalyzer::failing(),
        &MockEmergencyStop::new(false),
        UploaderRegistry::new().with(Box::new(youtube.clone())),
    );

    let outcome = publisher.upload(Path::new("broken.mp4"), Some(&[Platform::YouTube]), None);
    assert!(matches!(outcome, Err(CoreError::AnalysisError(_))));
    assert_eq!(youtube.upload_calls(), 0);
    Ok(())
}

// --- Retry policies ---

#[test]
fn test_instagram_retries_until_success() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let instagram = MockUploader::scripted(Platform::Instagram, [false, false, true]);
    let mut publisher = build(
        &dir,
        &MockAnalyzer::vertical(),
        &MockEmergencyStop::new(false),
        UploaderRegistry::new().with(Box::new(instagram.clone())),
    );

    let results = publisher.upload(Path::new("clip.mp4"), Some(&[Platform::Instagram]), None)?;
    assert!(results[0].success);
    assert_eq!(instagram.upload_calls(), 3);
    assert_eq!(instagram.recover_calls(), 2);
    assert_eq!(publisher.rate_limiter().count_today(Platform::Instagram), 1);
    Ok(())
}

#[test]
fn test_instagram_gives_up_after_three_attempts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let instagram = MockUploader::failing(Platform::Instagram, "Post button never appeared");
    let mut publisher = build(
        &dir,
        &MockAnalyzer::vertical(),
        &MockEmergencyStop::new(false),
        UploaderRegistry::new().with(Box::new(instagram.clone())),
    );

    let results = publisher.upload(Path::new("clip.mp4"), Some(&[Platform::Instagram]), None)?;
    assert!(!results[0].success);
    assert_eq!(results[0].error.as_deref(), Some("Post button never appeared"));
    assert_eq!(instagram.upload_calls(), 3);
    assert_eq!(publisher.rate_limiter().count_today(Platform::Instagram), 0);
    Ok(())
}

#[test]
fn test_youtube_failure_is_not_retried() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let youtube = MockUploader::scripted(Platform::YouTube, [false, true]);
    let mut publisher = build(
        &dir,
        &MockAnalyzer::horizontal(),
        &MockEmergencyStop::new(false),
        UploaderRegistry::new().with(Box::new(youtube.clone())),
    );

    let results = publisher.upload(Path::new("wide.mp4"), None, None)?;
    assert!(!results[0].success);
    assert_eq!(youtube.upload_calls(), 1);
    assert_eq!(youtube.recover_calls(), 0);
    Ok(())
}

#[test]
fn test_custom_retry_policy_applies_to_any_platform() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let tiktok = MockUploader::scripted(Platform::TikTok, [false, true]);
    let policies = RetryPolicies::standard(Duration::ZERO)
        .with(Platform::TikTok, RetryPolicy::with_recovery(2, Duration::ZERO));
    let mut publisher = build(
        &dir,
        &MockAnalyzer::vertical(),
        &MockEmergencyStop::new(false),
        UploaderRegistry::new().with(Box::new(tiktok.clone())),
    )
    .with_retry_policies(policies);

    let results = publisher.upload(Path::new("clip.mp4"), Some(&[Platform::TikTok]), None)?;
    assert!(results[0].success);
    assert_eq!(tiktok.upload_calls(), 2);
    Ok(())
}

// --- Risk screening ---

#[test]
fn test_risky_title_blocks_every_routed_platform() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let tiktok = MockUploader::succeeding(Platform::TikTok);
    let mut publisher = build(
        &dir,
        &MockAnalyzer::vertical(),
        &MockEmergencyStop::new(false),
        UploaderRegistry::new().with(Box::new(tiktok.clone())),
    );

    let results = publisher.upload(Path::new("clip.mp4"), None, Some(&titled("Free money tips")))?;
    assert_eq!(results.len(), 3);
    for result in &results {
        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("Risk check failed: Title contains risky word: 'free money'")
        );
    }
    assert_eq!(tiktok.upload_calls(), 0);
    Ok(())
}

#[test]
fn test_soft_warnings_do_not_block() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let youtube = MockUploader::succeeding(Platform::YouTube);
    let mut publisher = build(
        &dir,
        &MockAnalyzer::horizontal(),
        &MockEmergencyStop::new(false),
        UploaderRegistry::new().with(Box::new(youtube.clone())),
    );

    let results = publisher.upload(Path::new("wide.mp4"), None, Some(&titled("THE BIG ANNOUNCEMENT")))?;
    assert!(results[0].success);
    assert_eq!(youtube.upload_calls(), 1);
    Ok(())
}

// --- Rate limiting ---

#[test]
fn test_rate_limit_exceeded_skips_uploader() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let clock = FixedClock::new(2025, 3, 14);
    let youtube = MockUploader::succeeding(Platform::YouTube);
    let mut limits = default_daily_limits();
    limits.insert(Platform::YouTube, 1);
    let limiter = RateLimiter::with_clock(dir.path().join("limits.json"), limits, Box::new(clock.clone()));
    let mut publisher = Publisher::new(
        MockAnalyzer::horizontal(),
        MockEmergencyStop::new(false),
        limiter,
        UploaderRegistry::new().with(Box::new(youtube.clone())),
    );

    let first = publisher.upload(Path::new("one.mp4"), None, None)?;
    assert!(first[0].success);

    let second = publisher.upload(Path::new("two.mp4"), None, None)?;
    assert!(!second[0].success);
    assert_eq!(second[0].error.as_deref(), Some("Daily rate limit exceeded"));
    assert_eq!(youtube.upload_calls(), 1);

    clock.set(2025, 3, 15);
    let next_day = publisher.upload(Path::new("three.mp4"), None, None)?;
    assert!(next_day[0].success);
    Ok(())
}

#[test]
fn test_dry_run_bypasses_and_does_not_count() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let clock = FixedClock::new(2025, 3, 14);
    let youtube = MockUploader::succeeding(Platform::YouTube);
    let mut limits = default_daily_limits();
    limits.insert(Platform::YouTube, 0);
    let limiter = RateLimiter::with_clock(dir.path().join("limits.json"), limits, Box::new(clock));
    let mut publisher = Publisher::new(
        MockAnalyzer::horizontal(),
        MockEmergencyStop::new(false),
        limiter,
        UploaderRegistry::new().with(Box::new(youtube.clone())),
    )
    .with_dry_run(true);

    let results = publisher.upload(Path::new("wide.mp4"), None, None)?;
    assert!(results[0].success);
    assert_eq!(publisher.rate_limiter().count_today(Platform::YouTube), 0);
    assert!(youtube.received_options().iter().all(|o| o.dry_run));
    Ok(())
}

#[test]
fn test_counts_survive_reopening_the_store() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let clock = FixedClock::new(2025, 3, 14);
    {
        let mut publisher = Publisher::new(
            MockAnalyzer::horizontal(),
            MockEmergencyStop::new(false),
            limiter(&dir, &clock),
            UploaderRegistry::new().with(Box::new(MockUploader::succeeding(Platform::YouTube))),
        );
        publisher.upload(Path::new("one.mp4"), None, None)?;
        publisher.upload(Path::new("two.mp4"), None, None)?;
    }

    let reopened = limiter(&dir, &clock);
    assert_eq!(reopened.count_today(Platform::YouTube), 2);
    assert_eq!(reopened.get_remaining(Platform::YouTube), 4);
    Ok(())
}

#[test]
fn test_unwritable_store_fails_after_upload() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let blocker = dir.path().join("state");
    std::fs::write(&blocker, "")?;

    let youtube = MockUploader::succeeding(Platform::YouTube);
    let limiter = RateLimiter::with_clock(
        blocker.join("rate_limits.json"),
        default_daily_limits(),
        Box::new(FixedClock::new(2025, 3, 14)),
    );
    let mut publisher = Publisher::new(
        MockAnalyzer::horizontal(),
        MockEmergencyStop::new(false),
        limiter,
        UploaderRegistry::new().with(Box::new(youtube.clone())),
    );

    let outcome = publisher.upload(Path::new("wide.mp4"), None, None);
    assert!(matches!(outcome, Err(CoreError::RateLimitStore(_))));
    assert_eq!(youtube.upload_calls(), 1);
    Ok(())
}

#[test]
fn test_risk_failure_reports_the_first_warning() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let youtube = MockUploader::succeeding(Platform::YouTube);
    let mut publisher = build(
        &dir,
        &MockAnalyzer::horizontal(),
        &MockEmergencyStop::new(false),
        UploaderRegistry::new().with(Box::new(youtube.clone())),
    );

    let metadata = UploadMetadata {
        title: "Weekly recap".to_string(),
        description: "free money inside".to_string(),
        tags: (0..31).map(|i| format!("tag{}", i)).collect(),
        ..Default::default()
    };
    let warnings = RiskDetector::new().check(&metadata).warnings;
    assert_eq!(warnings[0], "Description contains risky word: 'free money'");

    let results = publisher.upload(Path::new("wide.mp4"), None, Some(&metadata))?;
    assert_eq!(results.len(), 1);
    assert!(!results[0].success);
    assert_eq!(
        results[0].error.as_deref(),
        Some("Risk check failed: Description contains risky word: 'free money'")
    );
    assert_eq!(youtube.upload_calls(), 0);
    Ok(())
}

// --- Configuration wiring ---

#[test]
fn test_from_config_uses_configured_stop_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let stop_file = dir.path().join("STOP_ALL_UPLOADS");
    let config = PublisherConfigBuilder::new()
        .rate_limit_file(dir.path().join("limits.json"))
        .stop_file(&stop_file)
        .stop_env_var("VIDPUB_TEST_STOP_UNUSED")
        .retry_backoff(Duration::ZERO)
        .build();

    let youtube = MockUploader::succeeding(Platform::YouTube);
    let mut publisher = Publisher::from_config(
        &config,
        MockAnalyzer::horizontal(),
        UploaderRegistry::new().with(Box::new(youtube.clone())),
    )?;

    std::fs::write(&stop_file, "")?;
    let results = publisher.upload(Path::new("wide.mp4"), Some(&[Platform::YouTube]), None)?;
    assert_eq!(results[0].error.as_deref(), Some("Emergency Stop Triggered"));

    publisher.emergency_stop().reset()?;
    let results = publisher.upload(Path::new("wide.mp4"), Some(&[Platform::YouTube]), None)?;
    assert!(results[0].success);
    Ok(())
}
