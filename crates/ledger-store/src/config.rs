//! # Ledger Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     LEDGER_DEFAULT_TIER=premium                                        │
//! │     LEDGER_COEF_PREMIUM_NORMAL=8000                                    │
//! │     LEDGER_LOG=debug                                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/ledger/ledger.toml (Linux)                               │
//! │     ~/Library/Application Support/com.shop.ledger/ledger.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [pricing]
//! normal_account_normal_product = 10000
//! normal_account_premium_product = 15000
//! premium_account_normal_product = 8000
//! premium_account_premium_product = 9500
//!
//! [accounts]
//! default_tier = "normal"
//!
//! [logging]
//! filter = "info,ledger=debug"
//! ```
//!
//! Coefficients are basis points: 10000 = ×1.00.

use ledger_core::{AccountTier, CoefficientTable, Multiplier};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Account Settings
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountSettings {
    /// Tier given to newly registered accounts.
    #[serde(default)]
    pub default_tier: AccountTier,
}

// =============================================================================
// Logging Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` still wins.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,ledger=debug".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete ledger configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Tier × kind price coefficients.
    #[serde(default)]
    pub pricing: CoefficientTable,

    #[serde(default)]
    pub accounts: AccountSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl LedgerConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (ledger.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading ledger config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load ledger config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML config file without applying overrides.
    pub fn from_file(path: &Path) -> StoreResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::Config("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Ledger config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        for (cell, multiplier) in self.pricing.cells() {
            if multiplier.bps() == 0 {
                return Err(StoreError::Config(format!(
                    "pricing.{} must be greater than 0",
                    cell
                )));
            }
        }

        if self.logging.filter.trim().is_empty() {
            return Err(StoreError::Config("logging.filter must not be empty".into()));
        }

        Ok(())
    }

    /// Applies `LEDGER_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(tier) = lookup("LEDGER_DEFAULT_TIER") {
            match tier.parse::<AccountTier>() {
                Ok(parsed) => {
                    debug!(tier = %parsed, "Overriding default tier from environment");
                    self.accounts.default_tier = parsed;
                }
                Err(e) => warn!(error = %e, "Ignoring LEDGER_DEFAULT_TIER"),
            }
        }

        if let Some(filter) = lookup("LEDGER_LOG") {
            self.logging.filter = filter;
        }

        let pricing = &mut self.pricing;
        let cells: [(&str, &mut Multiplier); 4] = [
            ("LEDGER_COEF_NORMAL_NORMAL", &mut pricing.normal_account_normal_product),
            ("LEDGER_COEF_NORMAL_PREMIUM", &mut pricing.normal_account_premium_product),
            ("LEDGER_COEF_PREMIUM_NORMAL", &mut pricing.premium_account_normal_product),
            ("LEDGER_COEF_PREMIUM_PREMIUM", &mut pricing.premium_account_premium_product),
        ];
        for (key, cell) in cells {
            let Some(raw) = lookup(key) else { continue };
            match raw.trim().parse::<u32>() {
                Ok(bps) => {
                    debug!(key, bps, "Overriding coefficient from environment");
                    *cell = Multiplier::from_bps(bps);
                }
                Err(_) => warn!(key, value = %raw, "Ignoring non-numeric coefficient"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shop", "ledger")
            .map(|dirs| dirs.config_dir().join("ledger.toml"))
    }
}
