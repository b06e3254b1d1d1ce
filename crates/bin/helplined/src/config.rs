//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `helpline.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use helpline_domain::error::ValidationError;
use helpline_domain::service::{ServiceCard, ensure_unique_numbers};

/// Default configuration file name.
pub const CONFIG_FILE: &str = "helpline.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// State file settings.
    pub storage: StorageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Clipboard mechanisms.
    pub clipboard: ClipboardConfig,
    /// Services listed on the page.
    pub directory: DirectoryConfig,
}

/// State file configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON state file.
    pub path: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Clipboard configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Clipboard program and arguments (e.g. `xclip -selection clipboard`).
    /// Autodetected when unset.
    pub command: Option<String>,
    /// Fall back to the OSC 52 terminal escape when the program fails.
    pub osc52_fallback: bool,
}

/// Directory page configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Page heading.
    pub title: String,
    /// Listed services, in display order.
    pub services: Vec<ServiceEntry>,
}

/// One `[[directory.services]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceEntry {
    pub name: String,
    pub number: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl ServiceEntry {
    fn new(name: &str, number: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            number: number.to_string(),
            category: Some(category.to_string()),
        }
    }
}

impl Config {
    /// Load configuration from `helpline.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting directory is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(CONFIG_FILE)?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("HELPLINE_STORAGE_PATH") {
            self.storage.path = val.into();
        }
        if let Some(val) = var("HELPLINE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("HELPLINE_CLIPBOARD") {
            self.clipboard.command = Some(val);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.directory.services.is_empty() {
            return Err(ConfigError::Validation(
                "directory must list at least one service".to_string(),
            ));
        }
        self.cards()?;
        Ok(())
    }

    /// Build the directory cards, in configured order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Directory`] if a service has a blank name or
    /// number, or a number is listed twice.
    pub fn cards(&self) -> Result<Vec<ServiceCard>, ConfigError> {
        let cards = self
            .directory
            .services
            .iter()
            .map(|entry| {
                let mut builder = ServiceCard::builder()
                    .service_name(entry.name.as_str())
                    .number(entry.number.as_str());
                if let Some(category) = &entry.category {
                    builder = builder.category(category.as_str());
                }
                builder.build()
            })
            .collect::<Result<Vec<_>, _>>()?;
        ensure_unique_numbers(&cards)?;
        Ok(cards)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("helpline-state.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "helplined=info,helpline=info".to_string(),
        }
    }
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            command: None,
            osc52_fallback: true,
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            title: "Emergency Service Directory".to_string(),
            services: vec![
                ServiceEntry::new("National Emergency Number", "999", "All"),
                ServiceEntry::new("Police Helpline Number", "100", "Police"),
                ServiceEntry::new("Fire Service Number", "101", "Fire"),
                ServiceEntry::new("Ambulance Service", "1994-999999", "Health"),
                ServiceEntry::new("Women & Child Helpline", "109", "Help"),
                ServiceEntry::new("Anti-Corruption Helpline", "106", "Govt."),
                ServiceEntry::new("Electricity Helpline", "16216", "Electricity"),
                ServiceEntry::new("Brac Helpline", "16445", "NGO"),
                ServiceEntry::new("Bangladesh Railway Helpline", "163", "Travel"),
            ],
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// A configured service is invalid.
    #[error("invalid directory")]
    Directory(#[from] ValidationError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
