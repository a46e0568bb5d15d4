//! Logger initialisation for the cleaning pipeline
//! Author: kartik4091

use tracing::info;
use tracing_subscriber::EnvFilter;

/// Log levels accepted on the command line
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Logger for the PDF link cleaning pipeline
pub struct Logger {
    level: String,
    initialized: bool,
}

impl Logger {
    pub fn new() -> Self {
        Self::with_level("info")
    }

    pub fn with_level(level: &str) -> Self {
        Self {
            level: level.to_string(),
            initialized: false,
        }
    }

    /// Quiet mode keeps errors only.
    pub fn quiet() -> Self {
        Self::with_level("error")
    }

    /// Install the global subscriber. `RUST_LOG` takes precedence over the
    /// configured level. A second call, or a subscriber installed elsewhere,
    /// is left untouched.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("pdf_link_cleaner={}", self.level)));

        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();

        self.initialized = true;
        if installed {
            info!("Logger initialized with level: {}", self.level);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
