// ============================================================================
// vidpub-cli/src/output.rs
// ============================================================================
//
// TERMINAL OUTPUT: Result Tables, Status Views and JSON Rendering
//
// Human output is styled with the console crate; `--json` output is plain
// serde_json so it can be piped.
//
// AI-ASSISTANT-INFO: Terminal rendering of upload results and status

// ---- Internal crate imports ----
use vidpub_core::UploadResult;

// ---- External crate imports ----
use console::style;
use serde_json::{Value, json};

// ---- Standard library imports ----
use std::path::Path;

/// Prints a section header in the `----- TITLE -----` style.
pub fn print_section(title: &str) {
    println!("\n{}\n", style(format!("----- {} -----", title.to_uppercase())).cyan().bold());
}

/// Prints an aligned `key: value` line.
pub fn print_key_value(key: &str, value: &str) {
    println!("  {:<18} {}", format!("{}:", key), value);
}

/// Prints one video's per-platform results.
pub fn print_results_table(video: &Path, results: &[UploadResult]) {
    print_section(&format!("Results: {}", vidpub_core::models::display_path(video)));

    if results.is_empty() {
        println!("  {}", style("No platforms were attempted").dim());
        return;
    }

    for result in results {
        if result.success {
            println!(
                "  {} {:<16} {}",
                style("✓").green().bold(),
                result.platform.as_str(),
                result.url.as_deref().unwrap_or_default()
            );
        } else {
            println!(
                "  {} {:<16} {}",
                style("✗").red().bold(),
                result.platform.as_str(),
                style(result.error.as_deref().unwrap_or("unknown error")).red()
            );
        }
    }
}

/// Prints the closing summary line for a batch.
pub fn print_summary(succeeded: usize, failed: usize) {
    println!();
    if failed == 0 {
        println!("  {} {}", style("✓").green().bold(), style(format!("{} upload(s) succeeded", succeeded)).bold());
    } else {
        println!(
            "  {} {}",
            style("✗").red().bold(),
            style(format!("{} succeeded, {} failed", succeeded, failed)).bold()
        );
    }
}

/// JSON document for one video's results.
pub fn video_results_json(video: &Path, results: &[UploadResult]) -> Value {
    json!({
        "video": video.display().to_string(),
        "results": results,
    })
}

/// Colors a yes/no flag.
pub fn format_flag(value: bool, yes: &str, no: &str) -> String {
    if value {
        style(yes).green().to_string()
    } else {
        style(no).yellow().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidpub_core::Platform;

    #[test]
    fn json_carries_video_and_results() {
        let results = vec![
            UploadResult::success(Platform::YouTube, "https://youtu.be/abc"),
            UploadResult::failure(Platform::TikTok, "Platform not yet implemented"),
        ];
        let doc = video_results_json(Path::new("clips/a.mp4"), &results);

        assert_eq!(doc["video"], "clips/a.mp4");
        assert_eq!(doc["results"][0]["platform"], "youtube");
        assert_eq!(doc["results"][0]["url"], "https://youtu.be/abc");
        assert_eq!(doc["results"][1]["success"], false);
        assert!(doc["results"][1].get("url").is_none());
    }
}
