//! Logging setup
//!
//! Installs a `tracing` subscriber writing to stderr. `RUST_LOG` takes
//! precedence over the configured level when set.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub ansi: bool,
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            ansi: true,
            with_target: false,
        }
    }
}

impl LogConfig {
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("course_builder={}", self.level)))
    }
}

/// Initialize the logging system with the given configuration.
///
/// Returns false if a global subscriber was already installed, which makes
/// repeated calls (tests, embedding hosts) harmless.
pub fn init_logging(config: &LogConfig) -> bool {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi)
        .with_target(config.with_target);

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(layer)
        .try_init()
        .is_ok()
}
