//! Leveled logger handed to every handler.
//!
//! Lines are written to the host log as `[name] LEVEL message`. They never
//! start with `EVENT_JSON:`, so NEP-297 indexers skip them.

use near_sdk::{log, near};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[near(serializers = [borsh, json])]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Debug
    }
}

#[derive(Clone, Debug)]
pub struct Logger {
    name: String,
    level: LogLevel,
}

impl Logger {
    pub fn new(name: impl Into<String>, level: LogLevel) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }

    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.write(LogLevel::Debug, message.as_ref());
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.write(LogLevel::Info, message.as_ref());
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        self.write(LogLevel::Warning, message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.write(LogLevel::Error, message.as_ref());
    }

    fn write(&self, level: LogLevel, message: &str) {
        if self.is_enabled_for(level) {
            log!("[{}] {} {}", self.name, level.as_str(), message);
        }
    }
}
