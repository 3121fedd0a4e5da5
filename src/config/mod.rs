//! Configuration for the accessor
//!
//! Replaces the process-wide constants of older variants of this logic
//! with an explicit configuration struct handed to the locator and
//! classifier at construction. Supports loading from a TOML file and
//! merging with defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable supplying an alternate target process name.
/// When set, the default accepted-name set is ignored entirely.
pub const PROCESS_NAME_ENV: &str = "DME_DOLPHIN_PROCESS_NAME";

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub process: ProcessConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Target process identification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessConfig {
    /// Accepted short names: the canonical emulator binary and its
    /// open-source fork
    #[serde(default = "default_process_names")]
    pub names: Vec<String>,

    /// Override name; when present, `names` is not consulted at all
    #[serde(default)]
    pub override_name: Option<String>,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        ProcessConfig {
            names: default_process_names(),
            override_name: None,
        }
    }
}

impl ProcessConfig {
    /// Applies the environment override, if set and non-empty
    pub fn with_env_override(mut self) -> Self {
        if let Ok(name) = env::var(PROCESS_NAME_ENV) {
            if !name.is_empty() {
                self.override_name = Some(name);
            }
        }
        self
    }

    /// Human-readable list of the names this configuration matches
    pub fn describe_targets(&self) -> String {
        match &self.override_name {
            Some(name) => name.clone(),
            None => self.names.join(", "),
        }
    }
}

/// Console RAM layout constants used by the classifier and translator
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Size of the primary pool (MEM1)
    #[serde(default = "default_mem1_size")]
    pub mem1_size: u64,

    /// Size of the extended pool (MEM2)
    #[serde(default = "default_mem2_size")]
    pub mem2_size: u64,

    /// Size of the auxiliary pool (ARAM)
    #[serde(default = "default_aram_size")]
    pub aram_size: u64,

    /// Logical-offset boundary below which offsets address the auxiliary
    /// pool when it is accessible
    #[serde(default = "default_aram_fake_size")]
    pub aram_fake_size: u32,

    /// Console address where the primary pool begins
    #[serde(default = "default_mem1_console_base")]
    pub mem1_console_base: u32,

    /// Console address where the extended pool begins
    #[serde(default = "default_mem2_console_base")]
    pub mem2_console_base: u32,

    /// Gap between the primary pool and the next pool within the shared
    /// backing object
    #[serde(default = "default_mapping_gap")]
    pub mapping_gap: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            mem1_size: default_mem1_size(),
            mem2_size: default_mem2_size(),
            aram_size: default_aram_size(),
            aram_fake_size: default_aram_fake_size(),
            mem1_console_base: default_mem1_console_base(),
            mem2_console_base: default_mem2_console_base(),
            mapping_gap: default_mapping_gap(),
        }
    }
}

impl LayoutConfig {
    /// Backing-object offset at which the auxiliary or extended pool sits
    pub fn secondary_backing_offset(&self) -> u64 {
        self.mem1_size + self.mapping_gap
    }

    /// Distance between the extended and primary pools in console
    /// address space
    pub fn console_base_distance(&self) -> u32 {
        self.mem2_console_base - self.mem1_console_base
    }

    /// Checks the layout for internally contradictory values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mem1_size == 0 || self.mem2_size == 0 || self.aram_size == 0 {
            return Err(ConfigError::Invalid(
                "pool sizes must be non-zero".to_string(),
            ));
        }
        if self.mem2_console_base <= self.mem1_console_base {
            return Err(ConfigError::Invalid(
                "extended console base must be above the primary console base".to_string(),
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.layout.validate()?;
        Ok(config)
    }

    /// Loads configuration, falling back to defaults when the file is
    /// missing or malformed
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Config {
        Config::load(path).unwrap_or_default()
    }
}

// Default functions for serde

fn default_process_names() -> Vec<String> {
    vec!["Dolphin".to_string(), "dolphin-emu".to_string()]
}

fn default_mem1_size() -> u64 {
    0x180_0000
}

fn default_mem2_size() -> u64 {
    0x400_0000
}

fn default_aram_size() -> u64 {
    0x100_0000
}

fn default_aram_fake_size() -> u32 {
    0x100_0000
}

fn default_mem1_console_base() -> u32 {
    0x8000_0000
}

fn default_mem2_console_base() -> u32 {
    0x9000_0000
}

fn default_mapping_gap() -> u64 {
    0x4_0000
}

fn default_log_level() -> String {
    "info".to_string()
}
