//! Debug logging for cutscene execution
//!
//! Messages are grouped by category so a single area (say, flag writes) can be
//! traced without the rest. Everything is routed through the `log` facade with
//! a per-category target.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Environment variable that turns debug logging on
pub const DEBUG_ENV: &str = "BUDGETVILLE_DEBUG";

/// Debug log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// All internal state changes
    Trace,
    /// Development debugging information
    Debug,
    /// Important state changes
    Info,
    /// Potential issues
    Warn,
    /// Error situations
    Error,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::Level::Trace,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

/// Debug log category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebugCategory {
    /// Cursor movement and event dispatch
    Engine,
    /// Suspension and resumption
    Flow,
    /// Flag store reads and writes
    Flags,
    /// Facing and walking
    Actors,
    /// Balance changes
    Ledger,
}

impl DebugCategory {
    pub fn target(self) -> &'static str {
        match self {
            DebugCategory::Engine => "budgetville::engine",
            DebugCategory::Flow => "budgetville::flow",
            DebugCategory::Flags => "budgetville::flags",
            DebugCategory::Actors => "budgetville::actors",
            DebugCategory::Ledger => "budgetville::ledger",
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Enable debug logging
    pub enabled: bool,
    /// Minimum log level
    pub level: LogLevel,
    /// Enabled categories
    pub categories: HashSet<DebugCategory>,
}

impl Default for DebugConfig {
    fn default() -> Self {
        let mut categories = HashSet::new();
        categories.insert(DebugCategory::Engine);
        categories.insert(DebugCategory::Flow);

        Self {
            enabled: std::env::var(DEBUG_ENV).is_ok(),
            level: LogLevel::Debug,
            categories,
        }
    }
}

impl DebugConfig {
    /// Every category at trace level
    pub fn verbose() -> Self {
        Self {
            enabled: true,
            level: LogLevel::Trace,
            categories: [
                DebugCategory::Engine,
                DebugCategory::Flow,
                DebugCategory::Flags,
                DebugCategory::Actors,
                DebugCategory::Ledger,
            ]
            .into_iter()
            .collect(),
        }
    }

    pub fn allows(&self, category: DebugCategory, level: LogLevel) -> bool {
        self.enabled && level >= self.level && self.categories.contains(&category)
    }
}

/// Log a debug message
pub fn log(config: &DebugConfig, category: DebugCategory, level: LogLevel, message: &str) {
    if !config.allows(category, level) {
        return;
    }

    let level: log::Level = level.into();
    log::log!(target: category.target(), level, "{}", message);
}
