// Per-manager logging sink

use crate::errors::{IdmError, Result};
use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use tracing::Level;

/// Logging sink owned by an [`IdmManager`](crate::IdmManager)
///
/// Events go through `tracing` under the `keyrock::manager` target, but only
/// when they pass this sink's own level. The default sink is disabled, so an
/// embedding application sees nothing until it opts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientLogger {
    max_level: LevelFilter,
}

impl ClientLogger {
    pub const TARGET: &'static str = "keyrock::manager";

    pub fn disabled() -> Self {
        Self {
            max_level: LevelFilter::OFF,
        }
    }

    pub fn with_level(max_level: LevelFilter) -> Self {
        Self { max_level }
    }

    /// Parse a level name such as `"debug"` or `"off"`
    pub fn from_level_name(name: &str) -> Result<Self> {
        let max_level = LevelFilter::from_str(name)
            .map_err(|_| IdmError::Configuration(format!("Unknown log level: {}", name)))?;
        Ok(Self::with_level(max_level))
    }

    pub fn max_level(&self) -> LevelFilter {
        self.max_level
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.max_level
    }

    pub fn log(&self, level: Level, message: &str) {
        if !self.enabled(level) {
            return;
        }

        match level {
            Level::ERROR => tracing::error!(target: ClientLogger::TARGET, "{}", message),
            Level::WARN => tracing::warn!(target: ClientLogger::TARGET, "{}", message),
            Level::INFO => tracing::info!(target: ClientLogger::TARGET, "{}", message),
            Level::DEBUG => tracing::debug!(target: ClientLogger::TARGET, "{}", message),
            Level::TRACE => tracing::trace!(target: ClientLogger::TARGET, "{}", message),
        }
    }

    pub fn error(&self, message: &str) {
        self.log(Level::ERROR, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::WARN, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::INFO, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(Level::DEBUG, message);
    }
}

impl Default for ClientLogger {
    fn default() -> Self {
        Self::disabled()
    }
}
