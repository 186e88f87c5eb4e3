//! Configuration loading from the environment.

use std::path::PathBuf;

use thiserror::Error;

use comanda_observability::LogFormat;

pub const CATALOG_PATH_VAR: &str = "COMANDA_CATALOG_PATH";
pub const HIGH_QUANTITY_THRESHOLD_VAR: &str = "COMANDA_HIGH_QUANTITY_THRESHOLD";
pub const LOG_FORMAT_VAR: &str = "COMANDA_LOG_FORMAT";

pub const DEFAULT_HIGH_QUANTITY_THRESHOLD: u32 = 50;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}' ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings for the order core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComandaConfig {
    /// Legacy-format catalog file to load at startup.
    pub catalog_path: Option<PathBuf>,
    /// Quantities above this get a warning from product validation.
    pub high_quantity_threshold: u32,
    pub log_format: LogFormat,
}

impl Default for ComandaConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            high_quantity_threshold: DEFAULT_HIGH_QUANTITY_THRESHOLD,
            log_format: LogFormat::Json,
        }
    }
}

impl ComandaConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source; unset and blank values take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get(CATALOG_PATH_VAR) {
            config.catalog_path = Some(PathBuf::from(path.trim()));
        }

        match get(HIGH_QUANTITY_THRESHOLD_VAR) {
            Some(raw) => {
                config.high_quantity_threshold =
                    raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                        ConfigError::Invalid {
                            var: HIGH_QUANTITY_THRESHOLD_VAR,
                            value: raw.clone(),
                            reason: e.to_string(),
                        }
                    })?;
            }
            None => tracing::debug!(
                default = DEFAULT_HIGH_QUANTITY_THRESHOLD,
                "{HIGH_QUANTITY_THRESHOLD_VAR} not set, using default"
            ),
        }

        if let Some(raw) = get(LOG_FORMAT_VAR) {
            config.log_format = raw.parse().map_err(|e: comanda_observability::UnknownLogFormat| {
                ConfigError::Invalid {
                    var: LOG_FORMAT_VAR,
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ComandaConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ComandaConfig::default());
        assert_eq!(config.high_quantity_threshold, 50);
    }

    #[test]
    fn reads_every_variable() {
        let config = ComandaConfig::from_lookup(lookup(&[
            (CATALOG_PATH_VAR, "/srv/menu.json"),
            (HIGH_QUANTITY_THRESHOLD_VAR, " 20 "),
            (LOG_FORMAT_VAR, "pretty"),
        ]))
        .unwrap();
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/menu.json")));
        assert_eq!(config.high_quantity_threshold, 20);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn bad_values_name_the_variable() {
        let err = ComandaConfig::from_lookup(lookup(&[(HIGH_QUANTITY_THRESHOLD_VAR, "many")]))
            .unwrap_err();
        assert!(err.to_string().contains(HIGH_QUANTITY_THRESHOLD_VAR));

        let err = ComandaConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: LOG_FORMAT_VAR, .. }));
    }

    #[test]
    fn blank_values_take_defaults() {
        let config = ComandaConfig::from_lookup(lookup(&[(CATALOG_PATH_VAR, "  ")])).unwrap();
        assert_eq!(config.catalog_path, None);
    }
}
