use std::{fmt::Display, str::FromStr};

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::config::LoggerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_string_short(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRC",
            LogLevel::Debug => "DBG",
            LogLevel::Info => "INF",
            LogLevel::Warn => "WAR",
            LogLevel::Error => "ERR",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" | "trc" => Ok(LogLevel::Trace),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "info" | "inf" => Ok(LogLevel::Info),
            "warn" | "warning" | "war" => Ok(LogLevel::Warn),
            "error" | "err" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "Trace"),
            LogLevel::Debug => write!(f, "Debug"),
            LogLevel::Info => write!(f, "Info"),
            LogLevel::Warn => write!(f, "Warn"),
            LogLevel::Error => write!(f, "Error"),
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Where the events of a run should go, derived from the logger config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTarget {
    pub level: tracing::Level,
    /// `None` means standard error.
    pub file_path: Option<String>,
}

impl LogTarget {
    /// Returns `None` if logging is disabled. Log files are named after the
    /// time of the run and placed in `./logs/`.
    pub fn from_config(config: &LoggerConfig) -> Option<Self> {
        if !*config.get_enabled() {
            return None;
        }

        let file_path = if *config.get_log_file() {
            Some(format!(
                "./logs/automata_run_{}.txt",
                Local::now().format("%Y-%m-%d_%H-%M-%S")
            ))
        } else {
            None
        };

        Some(LogTarget {
            level: (*config.get_log_level()).into(),
            file_path,
        })
    }
}
