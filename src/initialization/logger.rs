//! Logger initialization.
//!
//! Two output formats share one `env_logger` builder:
//! - plain: emoji, colored level and target, for terminals
//! - JSON: one object per line, for log collectors

use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Crates whose debug output drowns out the client's own messages.
const NOISY_TARGETS: &[&str] = &["reqwest", "hyper", "hyper_util"];

/// Initializes the global logger.
///
/// `RUST_LOG` is read first and `level` then overrides it for this crate.
/// HTTP stack crates never log below `info`, even at `--log-level trace`.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already set.
///
/// # Examples
///
/// ```bash
/// # Debug transport and auth decisions (secrets are masked)
/// onion_client --log-level debug http://example.onion/
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=onion_client=debug,reqwest=debug onion_client --check-tor
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for target in NOISY_TARGETS {
        builder.filter_module(target, level.min(LevelFilter::Info));
    }
    builder.filter_module(env!("CARGO_CRATE_NAME"), level);

    match format {
        LogFormat::Json => builder.format(write_json),
        LogFormat::Plain => builder.format(write_plain),
    };

    builder.try_init().map_err(InitializationError::from)
}

fn write_plain(buf: &mut Formatter, record: &Record<'_>) -> io::Result<()> {
    let (emoji, level) = level_style(record.level());
    writeln!(
        buf,
        "{} {} [{}] {}",
        emoji,
        record.target().cyan(),
        level,
        record.args()
    )
}

fn write_json(buf: &mut Formatter, record: &Record<'_>) -> io::Result<()> {
    let line = serde_json::json!({
        "ts": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        "level": record.level().as_str(),
        "target": record.target(),
        "msg": record.args().to_string(),
    });
    writeln!(buf, "{}", line)
}

fn level_style(level: Level) -> (&'static str, ColoredString) {
    let name = level.as_str();
    match level {
        Level::Error => ("❌", name.red()),
        Level::Warn => ("⚠️", name.yellow()),
        Level::Info => ("✔️", name.green()),
        Level::Debug => ("🔍", name.blue()),
        Level::Trace => ("🔬", name.purple()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_twice_reports_error() {
        // whichever call comes first in this process may win; a second
        // call must fail cleanly instead of panicking
        let _ = init_logger_with(LevelFilter::Debug, LogFormat::Plain);
        let second = init_logger_with(LevelFilter::Info, LogFormat::Json);
        assert!(matches!(second, Err(InitializationError::LoggerError(_))));
    }

    #[test]
    fn test_init_logger_json_format_does_not_panic() {
        let _ = init_logger_with(LevelFilter::Warn, LogFormat::Json);
        log::warn!("json line with \"quotes\"");
    }

    #[test]
    fn test_level_style_names() {
        assert_eq!(level_style(Level::Error).0, "❌");
        assert!(level_style(Level::Debug).1.to_string().contains("DEBUG"));
    }
}
