// ============================================================================
// vidpub-core/src/safety/risk_detector.rs
// ============================================================================
//
// RISK DETECTOR: Metadata Scan for Platform-penalty Patterns
//
// Stateless check of title, description and tags. Every rule runs and every
// warning is collected. Some rules are hard blocks (the engine aborts the
// whole call), the rest only warn.
//
// RULES:
// 1. Banned phrase (case-insensitive substring) in the title: hard block.
//    Banned phrase in the description: warning only.
// 2. More than 30 tags: hard block.
// 3. Title longer than 100 characters: warning only.
// 4. Title longer than 10 characters and entirely upper-case: warning only.
//
// AI-ASSISTANT-INFO: Risk detection over publishing metadata

// ---- Internal crate imports ----
use crate::models::UploadMetadata;

/// Phrases likely to trigger shadowbans or demonetization.
pub const BANNED_PHRASES: &[&str] = &[
    "hack",
    "crack",
    "warez",
    "nulled",
    "carding",
    "free money",
    "pyramid scheme",
    "ponzi",
];

/// More tags than this reads as tag stuffing.
pub const MAX_TAGS: usize = 30;

/// Titles longer than this may be truncated.
pub const MAX_TITLE_CHARS: usize = 100;

/// All-caps titles at or below this length are not flagged.
pub const ALL_CAPS_MIN_CHARS: usize = 10;

/// Outcome of a risk check. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskCheckResult {
    pub is_safe: bool,
    /// Every warning raised, in rule order
    pub warnings: Vec<String>,
}

impl RiskCheckResult {
    fn new() -> Self {
        Self {
            is_safe: true,
            warnings: Vec::new(),
        }
    }

    fn warn(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Records a blocking warning. `is_safe` never goes back to true.
    fn block(&mut self, warning: String) {
        self.is_safe = false;
        self.warnings.push(warning);
    }
}

/// Scans publishing metadata for risky patterns.
#[derive(Debug, Clone)]
pub struct RiskDetector {
    banned_phrases: Vec<String>,
}

impl Default for RiskDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskDetector {
    /// Detector using [`BANNED_PHRASES`].
    pub fn new() -> Self {
        Self::with_banned_phrases(BANNED_PHRASES.iter().copied())
    }

    /// Detector using a custom phrase list. Matching is case-insensitive.
    pub fn with_banned_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            banned_phrases: phrases
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn check(&self, metadata: &UploadMetadata) -> RiskCheckResult {
        let mut result = RiskCheckResult::new();

        let title = metadata.title.to_lowercase();
        let description = metadata.description.to_lowercase();

        // Per phrase: title first, then description.
        for phrase in &self.banned_phrases {
            if title.contains(phrase.as_str()) {
                result.block(format!("Title contains risky word: '{}'", phrase));
            }
            if description.contains(phrase.as_str()) {
                result.warn(format!("Description contains risky word: '{}'", phrase));
            }
        }

        if metadata.tags.len() > MAX_TAGS {
            result.block(format!(
                "Excessive tags ({}). Risk of spam detection.",
                metadata.tags.len()
            ));
        }

        let title_chars = metadata.title.chars().count();
        if title_chars > MAX_TITLE_CHARS {
            result.warn(format!(
                "Title too long (>{} chars). May be truncated.",
                MAX_TITLE_CHARS
            ));
        }

        if title_chars > ALL_CAPS_MIN_CHARS && is_all_caps(&metadata.title) {
            result.warn("Title is ALL CAPS. High risk of spam classification.".to_string());
        }

        result
    }
}

/// At least one cased letter and no lower-case letters.
fn is_all_caps(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(title: &str, description: &str, tag_count: usize) -> UploadMetadata {
        UploadMetadata {
            title: title.to_string(),
            description: description.to_string(),
            tags: (0..tag_count).map(|i| format!("tag{}", i)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn banned_phrase_in_title_blocks() {
        let result = RiskDetector::new().check(&metadata("FREE MONEY NOW OFFER", "", 0));
        assert!(!result.is_safe);
        assert_eq!(result.warnings[0], "Title contains risky word: 'free money'");
        assert!(result.warnings.iter().any(|w| w.contains("ALL CAPS")));
    }

    #[test]
    fn banned_phrase_in_description_only_warns() {
        let result = RiskDetector::new().check(&metadata("My trip", "FREE MONEY NOW OFFER", 0));
        assert!(result.is_safe);
        assert_eq!(result.warnings, vec!["Description contains risky word: 'free money'"]);
    }

    #[test]
    fn tag_stuffing_blocks() {
        let result = RiskDetector::new().check(&metadata("Fine title", "", 31));
        assert!(!result.is_safe);
        assert_eq!(result.warnings, vec!["Excessive tags (31). Risk of spam detection."]);

        assert!(RiskDetector::new().check(&metadata("Fine title", "", 30)).is_safe);
    }

    #[test]
    fn long_title_only_warns() {
        let title = "a".repeat(101);
        let result = RiskDetector::new().check(&metadata(&title, "", 0));
        assert!(result.is_safe);
        assert_eq!(result.warnings, vec!["Title too long (>100 chars). May be truncated."]);

        let title = "a".repeat(100);
        assert!(RiskDetector::new().check(&metadata(&title, "", 0)).warnings.is_empty());
    }

    #[test]
    fn all_caps_title_only_warns() {
        let result = RiskDetector::new().check(&metadata("WATCH THIS NOW", "", 0));
        assert!(result.is_safe);
        assert_eq!(result.warnings.len(), 1);

        // Ten characters or fewer is not flagged
        assert!(RiskDetector::new().check(&metadata("WATCH THIS", "", 0)).warnings.is_empty());
        // No letters at all is not "upper-case"
        assert!(RiskDetector::new().check(&metadata("2024-12-31 !!", "", 0)).warnings.is_empty());
    }

    #[test]
    fn all_rules_run_and_block_is_sticky() {
        let title = format!("ponzi {}", "x".repeat(100));
        let result = RiskDetector::new().check(&metadata(&title, "a crack in the wall", 40));
        assert!(!result.is_safe);
        assert_eq!(
            result.warnings,
            vec![
                "Description contains risky word: 'crack'".to_string(),
                "Title contains risky word: 'ponzi'".to_string(),
                "Excessive tags (40). Risk of spam detection.".to_string(),
                "Title too long (>100 chars). May be truncated.".to_string(),
            ]
        );
    }

    #[test]
    fn phrases_are_checked_in_list_order_across_fields() {
        // 'hack' precedes 'free money' in the banned list
        let result = RiskDetector::new().check(&metadata("Free money guide", "a hack for you", 0));
        assert!(!result.is_safe);
        assert_eq!(
            result.warnings,
            vec![
                "Description contains risky word: 'hack'".to_string(),
                "Title contains risky word: 'free money'".to_string(),
            ]
        );
    }

    #[test]
    fn clean_metadata_passes() {
        let result = RiskDetector::new().check(&metadata("Sunset timelapse", "Shot on a hill.", 5));
        assert!(result.is_safe);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn custom_phrases_are_case_insensitive() {
        let detector = RiskDetector::with_banned_phrases(["Giveaway"]);
        assert!(!detector.check(&metadata("Huge GIVEAWAY today", "", 0)).is_safe);
    }
}
