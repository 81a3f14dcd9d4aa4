//! # Observability
//!
//! Logging setup shared by every PictoAmigos binary.
//!
//! Crates never configure logging themselves. They emit through the standard
//! `tracing` macros and the binary calls [`init`] or [`init_with_config`] once
//! at startup. Output goes to:
//!
//! - stderr, in the compact human format (optional)
//! - a JSONL file, one event per line (optional, `~/.pictoamigos/logs/dev.jsonl`
//!   when no explicit path is given)
//!
//! ## Usage
//!
//! ```rust,ignore
//! fn main() {
//!     observability::init_with_config(observability::LogConfig {
//!         service_name: "pictoamigos".into(),
//!         default_level: "debug".into(),
//!         also_stderr: true,
//!         ..Default::default()
//!     });
//!     tracing::info!("ready");
//! }
//! ```

mod file_writer;

use std::path::PathBuf;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use file_writer::JsonlWriter;

/// Where log lines go and how verbose they are.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Name of the service (e.g., "pictoamigos", "worker").
    pub service_name: String,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub default_level: String,

    /// Optional JSONL log file. `None` means [`default_log_path`] when
    /// `write_file` is set.
    pub log_path: Option<PathBuf>,

    /// Write JSONL lines to `log_path`.
    pub write_file: bool,

    /// Compact human-readable lines on stderr.
    pub also_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "pictoamigos".into(),
            default_level: "info".into(),
            log_path: None,
            write_file: false,
            also_stderr: true,
        }
    }
}

/// Central log file location: `~/.pictoamigos/logs/dev.jsonl`.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".pictoamigos").join("logs").join("dev.jsonl"))
}

/// Initialize logging with default settings for `service_name`.
pub fn init(service_name: &str) {
    init_with_config(LogConfig {
        service_name: service_name.into(),
        ..Default::default()
    });
}

/// Initialize logging with custom configuration.
///
/// Installing a second global subscriber is ignored, so tests and binaries
/// can call this more than once.
pub fn init_with_config(config: LogConfig) {
    let env_filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.default_level))
    };

    let log_path = if config.write_file {
        config.log_path.clone().or_else(default_log_path)
    } else {
        None
    };

    let file_layer = log_path.as_ref().and_then(|path| {
        match JsonlWriter::open(path) {
            Ok(writer) => Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(writer)
                    .with_filter(env_filter()),
            ),
            Err(err) => {
                eprintln!("failed to open log file {}: {err}", path.display());
                None
            }
        }
    });

    let stderr_layer = config.also_stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .with_writer(std::io::stderr)
            .with_filter(env_filter())
    });

    let installed = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            service = %config.service_name,
            log_path = ?log_path,
            "observability initialized"
        );
    }
}
