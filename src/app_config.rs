use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::validation::rules::{OptionalRule, RuleToggles};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory holding the working script files
    #[serde(default = "default_spt_dir")]
    pub spt_dir: String,

    /// Directory holding the blueprint copies of the original column
    #[serde(default = "default_blueprint_dir")]
    pub blueprint_dir: String,

    /// Directory receiving patch documents and the aggregate report
    #[serde(default = "default_result_dir")]
    pub result_dir: String,

    /// Validation config
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Validation rule configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ValidationConfig {
    /// Whether the structural pass runs
    #[serde(default = "default_true")]
    pub structural: bool,

    /// Whether the symbol pass runs
    #[serde(default = "default_true")]
    pub symbol: bool,

    /// Optional rules to switch on (all off by default)
    #[serde(default)]
    pub optional_rules: Vec<OptionalRule>,
}

impl ValidationConfig {
    // @returns: Rule toggles for the validators
    pub fn toggles(&self) -> RuleToggles {
        let mut toggles = RuleToggles::with_optional(&self.optional_rules);
        toggles.structural = self.structural;
        toggles.symbol = self.symbol;
        toggles
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            structural: true,
            symbol: true,
            optional_rules: Vec::new(),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default)
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

fn default_true() -> bool {
    true
}

fn default_spt_dir() -> String {
    "spt".to_string()
}

fn default_blueprint_dir() -> String {
    "sptBluePrint".to_string()
}

fn default_result_dir() -> String {
    "result".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            spt_dir: default_spt_dir(),
            blueprint_dir: default_blueprint_dir(),
            result_dir: default_result_dir(),
            validation: ValidationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.spt_dir.trim().is_empty() {
            return Err(anyhow!("spt_dir must not be empty"));
        }
        if self.blueprint_dir.trim().is_empty() {
            return Err(anyhow!("blueprint_dir must not be empty"));
        }
        if self.result_dir.trim().is_empty() {
            return Err(anyhow!("result_dir must not be empty"));
        }
        if Path::new(&self.spt_dir) == Path::new(&self.result_dir) {
            return Err(anyhow!("result_dir must differ from spt_dir"));
        }
        Ok(())
    }
}
