use serde::{Deserialize, Serialize};

use crate::{automaton::DEFAULT_ALPHABET, logger::LogLevel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    enabled: bool,
    log_file: bool,
    log_level: LogLevel,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            enabled: false,
            log_file: false,
            log_level: LogLevel::Warn,
        }
    }
}

impl LoggerConfig {
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn get_enabled(&self) -> &bool {
        &self.enabled
    }

    pub fn with_log_file(mut self, log_file: bool) -> Self {
        self.log_file = log_file;
        self
    }

    pub fn set_log_file(&mut self, log_file: bool) {
        self.log_file = log_file;
    }

    pub fn get_log_file(&self) -> &bool {
        &self.log_file
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn get_log_level(&self) -> &LogLevel {
        &self.log_level
    }
}

/// Configuration of the automata tools. Every field is optional in the TOML
/// file, missing fields take their default.
///
/// ```toml
/// alphabet = "abc"
///
/// [logger]
/// enabled = true
/// log_level = "Debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomataConfig {
    alphabet: String,
    logger: LoggerConfig,
}

impl Default for AutomataConfig {
    fn default() -> Self {
        AutomataConfig {
            alphabet: DEFAULT_ALPHABET.to_string(),
            logger: LoggerConfig::default(),
        }
    }
}

impl AutomataConfig {
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file<P: AsRef<std::path::Path>>(file_path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(file_path)?;
        Self::from_toml(&content)
    }

    pub fn from_optional_file<P: AsRef<std::path::Path>>(
        file_path: Option<P>,
    ) -> anyhow::Result<Self> {
        match file_path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn with_alphabet(mut self, alphabet: impl Into<String>) -> Self {
        self.alphabet = alphabet.into();
        self
    }

    pub fn set_alphabet(&mut self, alphabet: impl Into<String>) {
        self.alphabet = alphabet.into();
    }

    pub fn get_alphabet(&self) -> &String {
        &self.alphabet
    }

    /// The symbols of the configured alphabet.
    pub fn alphabet_symbols(&self) -> Vec<char> {
        self.alphabet.chars().collect()
    }

    pub fn with_logger(mut self, logger: LoggerConfig) -> Self {
        self.logger = logger;
        self
    }

    pub fn set_logger(&mut self, logger: LoggerConfig) {
        self.logger = logger;
    }

    pub fn get_logger(&self) -> &LoggerConfig {
        &self.logger
    }
}
