// ============================================================================
// vidpub-core/src/safety/rate_limiter.rs
// ============================================================================
//
// RATE LIMITER: Persisted Per-day, Per-platform Upload Admission
//
// Keeps a count of successful uploads for every (calendar day, platform)
// pair and denies new uploads once a platform's daily ceiling is reached.
//
// PERSISTENCE:
// The counts live in a JSON document `{ "YYYY-MM-DD": { "youtube": 3 } }`.
// The document is read once when the limiter is opened and rewritten in full
// after every recorded upload. A missing or corrupt document yields an empty
// state so a first run never fails.
//
// The store assumes a single writer. Running several orchestrator processes
// against the same file needs an external lock.
//
// AI-ASSISTANT-INFO: Persisted daily upload counters and admission control

// ---- Internal crate imports ----
use crate::config::{FALLBACK_DAILY_LIMIT, PublisherConfig};
use crate::error::{CoreError, CoreResult};
use crate::models::Platform;

// ---- External crate imports ----
use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use tempfile::NamedTempFile;

// ---- Standard library imports ----
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Persisted shape: date key -> platform identifier -> count.
type UsageTable = BTreeMap<String, BTreeMap<String, u32>>;

/// Format of the day keys in the store.
const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// CLOCK
// ============================================================================

/// Source of the current calendar day.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

// ============================================================================
// RATE LIMITER
// ============================================================================

/// Daily upload ceilings backed by a JSON file.
///
/// The day key is taken at call time, so a batch running across midnight
/// counts against both days. Platform quotas reset on wall-clock days too.
pub struct RateLimiter {
    storage_path: PathBuf,
    limits: HashMap<Platform, u32>,
    usage: UsageTable,
    clock: Box<dyn Clock>,
}

impl RateLimiter {
    /// Opens the store at `storage_path` with the given ceilings.
    ///
    /// Never fails: an unreadable store is logged and replaced by an empty
    /// state, which is written back on the first recorded upload.
    pub fn open(storage_path: impl Into<PathBuf>, limits: HashMap<Platform, u32>) -> Self {
        Self::with_clock(storage_path, limits, Box::new(LocalClock))
    }

    /// Opens the store using the configured path and ceilings.
    pub fn from_config(config: &PublisherConfig) -> Self {
        Self::open(config.rate_limit_file.clone(), config.daily_limits.clone())
    }

    /// Opens the store with an explicit day source.
    pub fn with_clock(
        storage_path: impl Into<PathBuf>,
        limits: HashMap<Platform, u32>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let storage_path = storage_path.into();
        let usage = load_usage(&storage_path);
        Self {
            storage_path,
            limits,
            usage,
            clock,
        }
    }

    /// Location of the persisted counters.
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Ceiling for `platform`; unlisted platforms get the fallback of 5.
    pub fn limit_for(&self, platform: Platform) -> u32 {
        self.limits
            .get(&platform)
            .copied()
            .unwrap_or(FALLBACK_DAILY_LIMIT)
    }

    /// Successful uploads recorded today for `platform`.
    pub fn count_today(&self, platform: Platform) -> u32 {
        self.usage
            .get(&self.today_key())
            .and_then(|day| day.get(platform.as_str()))
            .copied()
            .unwrap_or(0)
    }

    /// True while today's count is strictly below the ceiling.
    pub fn can_upload(&self, platform: Platform) -> bool {
        self.count_today(platform) < self.limit_for(platform)
    }

    /// Uploads still allowed today.
    pub fn get_remaining(&self, platform: Platform) -> u32 {
        self.limit_for(platform).saturating_sub(self.count_today(platform))
    }

    /// Counts one successful upload and persists the whole table.
    pub fn record_upload(&mut self, platform: Platform) -> CoreResult<()> {
        let today = self.today_key();
        let count = self
            .usage
            .entry(today.clone())
            .or_default()
            .entry(platform.as_str().to_string())
            .or_insert(0);
        *count += 1;
        let count = *count;

        self.save_usage()?;
        info!(
            "Recorded {} upload {}/{} for {}",
            platform,
            count,
            self.limit_for(platform),
            today
        );
        Ok(())
    }

    fn today_key(&self) -> String {
        self.clock.today().format(DAY_KEY_FORMAT).to_string()
    }

    /// Writes to a sibling temp file and renames it over the store.
    fn save_usage(&self) -> CoreResult<()> {
        let parent = match self.storage_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| {
            CoreError::RateLimitStore(format!("cannot create '{}': {}", parent.display(), e))
        })?;

        let json = serde_json::to_string_pretty(&self.usage)?;
        let mut tmp = NamedTempFile::new_in(&parent).map_err(|e| {
            CoreError::RateLimitStore(format!("cannot create temp file in '{}': {}", parent.display(), e))
        })?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| CoreError::RateLimitStore(format!("cannot write counters: {}", e)))?;
        tmp.persist(&self.storage_path).map_err(|e| {
            CoreError::RateLimitStore(format!(
                "cannot replace '{}': {}",
                self.storage_path.display(),
                e.error
            ))
        })?;

        debug!("Saved rate limit state to {}", self.storage_path.display());
        Ok(())
    }
}

fn load_usage(path: &Path) -> UsageTable {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No rate limit state at {}, starting empty", path.display());
            return UsageTable::new();
        }
        Err(e) => {
            warn!("Cannot read rate limit state {}: {}. Starting empty.", path.display(), e);
            return UsageTable::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(usage) => usage,
        Err(e) => {
            warn!("Rate limit state {} is corrupt: {}. Starting empty.", path.display(), e);
            UsageTable::new()
        }
    }
}
