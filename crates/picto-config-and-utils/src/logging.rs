//! Logging initialization.
//!
//! Thin wrapper over the observability crate so binaries only need this
//! crate to get the standard PictoAmigos log output.

use observability::LogConfig;
use std::path::PathBuf;
use tracing::Level;

/// Initialize the logging system.
///
/// Log level comes from `RUST_LOG` when set, otherwise `level`. With a
/// `log_file`, structured JSONL lines go there and stderr stays quiet for the
/// interactive prompt. Without one, compact lines go to stderr.
///
/// ```ignore
/// init_logging("info", None);
/// tracing::info!("started");
/// ```
pub fn init_logging(level: &str, log_file: Option<PathBuf>) {
    let write_file = log_file.is_some();
    observability::init_with_config(LogConfig {
        service_name: "pictoamigos".into(),
        default_level: parse_level(level).as_str().to_lowercase(),
        log_path: log_file,
        write_file,
        also_stderr: !write_file,
    });
}

/// Parse a configured level name. Unrecognised names mean `INFO`.
pub fn parse_level(level: &str) -> Level {
    let level = level.trim();
    if level.eq_ignore_ascii_case("warning") {
        return Level::WARN;
    }
    level.parse().unwrap_or(Level::INFO)
}
