// ============================================================================
// vidpub-cli/src/logging.rs
// ============================================================================
//
// LOGGING UTILITIES: Logger Setup and Helper Functions
//
// The core library logs through the `log` facade; this module installs
// env_logger as the backend. Log lines go to stderr so `--json` output on
// stdout stays machine-readable.
//
// USAGE:
// - default: info
// - --verbose: debug
// - RUST_LOG=...: overrides both
//
// AI-ASSISTANT-INFO: env_logger initialization and timestamp helper

// ---- External crate imports ----
use console::style;
use log::LevelFilter;

// ---- Standard library imports ----
use std::env;
use std::io::Write;

/// Installs env_logger with a compact `timestamp LEVEL message` format.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format(|buf, record| {
        let level_str = match record.level() {
            log::Level::Error => style("ERROR").red().bold(),
            log::Level::Warn => style("WARN ").yellow(),
            log::Level::Info => style("INFO ").green(),
            log::Level::Debug => style("DEBUG").blue(),
            log::Level::Trace => style("TRACE").magenta(),
        };
        writeln!(buf, "{} {} {}", style(get_timestamp()).dim(), level_str, record.args())
    });

    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    let _ = builder.try_init();
}

/// Returns the current local timestamp formatted as "YYYY-MM-DD HH:MM:SS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_has_date_and_time() {
        let ts = get_timestamp();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logging(false);
        init_logging(true);
    }
}
