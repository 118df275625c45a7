//! # Register Configuration
//!
//! Two inputs configure a register:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  RegisterConfig  (JSON, per transaction, sent by the server)            │
//! │    purchase_codes / payment_codes / adjustment_codes / credit_codes     │
//! │    ledger  - stored rows when editing a saved payment                   │
//! │    payment - the payment record being created or edited                 │
//! │                                                                         │
//! │  RegisterSettings (TOML, per installation)                              │
//! │    Priority:                                                            │
//! │      1. Environment variables (highest)                                 │
//! │           REGISTER_CHANGE_PAYMENT_TYPE=Cash                             │
//! │           REGISTER_ENFORCE_REQUIRED_DETAIL=false                        │
//! │      2. Settings file                                                   │
//! │      3. Defaults (lowest)                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Settings File Format
//! ```toml
//! # register.toml
//! change_payment_type = "Cash"
//! enforce_required_detail = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::code::Code;
use crate::error::{ConfigError, ConfigResult, RegisterResult};
use crate::ledger_row::LedgerRowRecord;
use crate::payment::PaymentRecord;

/// Payment type whose first code posts change.
pub const DEFAULT_CHANGE_PAYMENT_TYPE: &str = "Cash";

const ENV_CHANGE_PAYMENT_TYPE: &str = "REGISTER_CHANGE_PAYMENT_TYPE";
const ENV_ENFORCE_REQUIRED_DETAIL: &str = "REGISTER_ENFORCE_REQUIRED_DETAIL";

// =============================================================================
// Register Config
// =============================================================================

/// Everything the server sends to open a register.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterConfig {
    #[serde(default)]
    pub purchase_codes: Vec<Code>,

    #[serde(default)]
    pub payment_codes: Vec<Code>,

    #[serde(default)]
    pub adjustment_codes: Vec<Code>,

    #[serde(default)]
    pub credit_codes: Vec<Code>,

    /// Stored rows of the payment being edited; empty for a new payment.
    #[serde(default)]
    pub ledger: Vec<LedgerRowRecord>,

    #[serde(default)]
    pub payment: PaymentRecord,
}

impl RegisterConfig {
    pub fn from_json(json: &str) -> RegisterResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// =============================================================================
// Register Settings
// =============================================================================

/// Installation-wide register behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterSettings {
    /// Payment type of the code used for change rows.
    #[serde(default = "default_change_payment_type")]
    pub change_payment_type: String,

    /// Whether validation reports rows missing a required detail.
    #[serde(default = "default_enforce_required_detail")]
    pub enforce_required_detail: bool,
}

fn default_change_payment_type() -> String {
    DEFAULT_CHANGE_PAYMENT_TYPE.to_string()
}

fn default_enforce_required_detail() -> bool {
    true
}

impl Default for RegisterSettings {
    fn default() -> Self {
        RegisterSettings {
            change_payment_type: default_change_payment_type(),
            enforce_required_detail: default_enforce_required_detail(),
        }
    }
}

impl RegisterSettings {
    /// Loads settings from `path` (when it exists), then the environment.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut settings = Self::default();

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading register settings from file");
                let contents = std::fs::read_to_string(path)?;
                settings = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Settings file not found, using defaults");
            }
        }

        settings.apply_env_overrides();
        settings.validate()?;

        Ok(settings)
    }

    /// Loads settings or returns defaults if load fails.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!("Failed to load register settings: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Writes settings to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        info!(?path, "Register settings saved");
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.change_payment_type.trim().is_empty() {
            return Err(ConfigError::Invalid("change_payment_type must not be empty".to_string()));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(payment_type) = lookup(ENV_CHANGE_PAYMENT_TYPE) {
            debug!(payment_type = %payment_type, "Overriding change payment type from environment");
            self.change_payment_type = payment_type;
        }

        if let Some(flag) = lookup(ENV_ENFORCE_REQUIRED_DETAIL) {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.enforce_required_detail = true,
                "0" | "false" | "no" | "off" => self.enforce_required_detail = false,
                _ => warn!(value = %flag, "Unknown required-detail flag in environment"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_settings() {
        let settings = RegisterSettings::default();
        assert_eq!(settings.change_payment_type, "Cash");
        assert!(settings.enforce_required_detail);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings = RegisterSettings::from_toml_str("enforce_required_detail = false").unwrap();
        assert_eq!(settings.change_payment_type, "Cash");
        assert!(!settings.enforce_required_detail);

        assert!(matches!(
            RegisterSettings::from_toml_str("enforce_required_detail = \"maybe\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validation_rejects_blank_change_type() {
        let settings = RegisterSettings {
            change_payment_type: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_CHANGE_PAYMENT_TYPE, "StoreCredit"),
            (ENV_ENFORCE_REQUIRED_DETAIL, "off"),
        ]
        .into_iter()
        .collect();

        let mut settings = RegisterSettings::default();
        settings.apply_overrides(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(settings.change_payment_type, "StoreCredit");
        assert!(!settings.enforce_required_detail);

        settings.apply_overrides(|name| (name == ENV_ENFORCE_REQUIRED_DETAIL).then(|| "bogus".to_string()));
        assert!(!settings.enforce_required_detail);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("register-settings-{}", uuid::Uuid::new_v4()));
        let path = dir.join("register.toml");
        let settings = RegisterSettings {
            change_payment_type: "Cash".to_string(),
            enforce_required_detail: false,
        };

        settings.save(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("enforce_required_detail = false"));
        assert_eq!(RegisterSettings::from_toml_str(&contents).unwrap(), settings);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("absent-{}.toml", uuid::Uuid::new_v4()));
        let settings = RegisterSettings::load_or_default(Some(&path));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_register_config_from_json() {
        let config = RegisterConfig::from_json(
            r#"{
                "purchase_codes": [{"id": 1, "code": "ST", "debit_or_credit": "C", "account_type": "Income"}],
                "payment_codes": [{"id": 3, "code": "CA", "debit_or_credit": "D", "payment_type": "Cash"}],
                "payment": {"type": "Payment"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.purchase_codes.len(), 1);
        assert!(config.credit_codes.is_empty());
        assert!(config.ledger.is_empty());
        assert_eq!(config.payment.payment_type.as_deref(), Some("Payment"));

        assert!(RegisterConfig::from_json("{\"purchase_codes\": 5}").is_err());
    }
}
