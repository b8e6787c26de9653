//! Configuration management for freight-planner
//!
//! Config stored at: ~/.config/freight-planner/config.json

use clap::ValueEnum;
use freight_domain::{IdGenerator, RandomIds, SequentialIds};
use freight_types::{ConfigError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_DIR: &str = "freight-planner";

/// How new vehicle ids are generated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStyle {
    /// 8 random hex characters
    #[default]
    Random,
    /// V1, V2, ... continuing after the highest existing number
    Sequential,
}

impl std::fmt::Display for IdStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdStyle::Random => write!(f, "random"),
            IdStyle::Sequential => write!(f, "sequential"),
        }
    }
}

impl IdStyle {
    /// Generator for this style; sequential numbering continues after `existing`
    pub fn generator<'a>(self, existing: impl IntoIterator<Item = &'a str>) -> Box<dyn IdGenerator> {
        match self {
            IdStyle::Random => Box::new(RandomIds),
            IdStyle::Sequential => {
                let last = existing
                    .into_iter()
                    .filter_map(|id| id.strip_prefix('V')?.parse::<u64>().ok())
                    .max()
                    .unwrap_or(0);
                Box::new(SequentialIds::starting_after("V", last))
            }
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Company name used when the state file has none
    #[serde(default = "default_company_name")]
    pub company_name: String,

    /// State file override
    #[serde(default)]
    pub state_file: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Vehicle id style for new vehicles
    #[serde(default)]
    pub id_style: IdStyle,

    /// Log filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_company_name() -> String {
    "Fast Delivery".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            company_name: default_company_name(),
            state_file: None,
            output_format: OutputFormat::default(),
            id_style: IdStyle::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the state file path
    pub fn state_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.state_file {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(data_dir.join("state.json"))
    }

    /// Id generator matching `id_style`, numbering after `existing` ids
    pub fn id_generator<'a>(
        &self,
        existing: impl IntoIterator<Item = &'a str>,
    ) -> Box<dyn IdGenerator> {
        self.id_style.generator(existing)
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Freight Planner Configuration")?;
        writeln!(f, "=============================")?;
        writeln!(f)?;
        writeln!(f, "Company name:   {}", self.company_name)?;
        writeln!(
            f,
            "State file:     {}",
            self.state_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(f, "Vehicle ids:    {}", self.id_style)?;
        writeln!(f, "Log level:      {}", self.log_level)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}
