use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

use crate::error::{Error, Result};

pub const LOG_FILE_NAME: &str = "todo-tui.log";

/// Keeps the non-blocking appender alive for the life of the process
static APPENDER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize tracing, writing to `<log_dir>/todo-tui.log`.
///
/// Logs never go to the terminal, which the TUI owns. The level comes from
/// `level` if given, otherwise from `LOG_LEVEL`, then `RUST_LOG`, then `info`.
/// Values containing `=` or `,` are treated as `EnvFilter` directives, e.g.
/// `todo_core=trace,todo_tui=debug`.
///
/// Returns the log file path so it can be shown to the user.
pub fn init_tracing(log_dir: &Path, level: Option<&str>) -> Result<PathBuf> {
    let log_file = log_dir.join(LOG_FILE_NAME);

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(log_dir)
        .map_err(|e| Error::Logging(e.to_string()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = APPENDER_GUARD.set(guard);

    let level_str = level
        .map(str::to_string)
        .or_else(|| std::env::var("LOG_LEVEL").ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    let is_complex_directive = level_str.contains('=') || level_str.contains(',');

    let result = if is_complex_directive {
        fmt::Subscriber::builder()
            .with_env_filter(EnvFilter::new(&level_str))
            .with_ansi(false) // Disable ANSI color codes in files
            .with_writer(non_blocking)
            .with_file(true)
            .with_line_number(true)
            .try_init()
    } else {
        fmt::Subscriber::builder()
            .with_max_level(parse_level_filter(&level_str))
            .with_ansi(false)
            .with_writer(non_blocking)
            .with_file(true)
            .with_line_number(true)
            .try_init()
    };
    result.map_err(|e| Error::Logging(e.to_string()))?;

    Ok(log_file)
}

fn parse_level_filter(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "off" => LevelFilter::OFF,
        _ => LevelFilter::INFO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_filter() {
        assert_eq!(parse_level_filter("TRACE"), LevelFilter::TRACE);
        assert_eq!(parse_level_filter("warn"), LevelFilter::WARN);
        assert_eq!(parse_level_filter("off"), LevelFilter::OFF);
        assert_eq!(parse_level_filter("loud"), LevelFilter::INFO);
    }
}
