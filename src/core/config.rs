use crate::core::clipboard::DEFAULT_RESET_AFTER;
use crate::core::conversion::InvalidAmountPolicy;
use crate::core::rates::{RateOverrides, RateTable};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};
use tracing::debug;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConversionConfig {
    #[serde(default)]
    pub invalid_amount: InvalidAmountPolicy,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClipboardConfig {
    pub reset_after_ms: u64,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        ClipboardConfig {
            reset_after_ms: DEFAULT_RESET_AFTER.as_millis() as u64,
        }
    }
}

impl ClipboardConfig {
    pub fn reset_after(&self) -> Duration {
        Duration::from_millis(self.reset_after_ms)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PayoutConfig {
    pub deposit_address: String,
    pub account_name_placeholder: String,
}

impl Default for PayoutConfig {
    fn default() -> Self {
        PayoutConfig {
            deposit_address: "4LiV4YjbxsL6739MKghUd".to_string(),
            account_name_placeholder: "John Doe".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub conversion: ConversionConfig,
    /// Extra or overriding rates on top of the builtin table.
    #[serde(default)]
    pub rates: RateOverrides,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
    #[serde(default)]
    pub payout: PayoutConfig,
}

impl AppConfig {
    /// Loads the config from the default location, falling back to the
    /// defaults when no file exists there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "remit", "remit")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Builtin rates with the configured overrides and reciprocals applied.
    pub fn rate_table(&self) -> Result<RateTable> {
        RateTable::from_overrides(&self.rates).context("Invalid rates in config")
    }
}
