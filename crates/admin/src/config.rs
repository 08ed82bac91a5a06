//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `TIENDA_EXPORT_DIR` - Directory the CSV export is written to (default: .)
//! - `TIENDA_ADMIN_TABS` - Comma-separated panel tabs, first is active (default: pedidos)

use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_EXPORT_DIR: &str = ".";
const DEFAULT_TABS: &str = "pedidos";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin panel configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// Where exported CSV files are written
    pub export_dir: PathBuf,
    /// Panel tab names, in display order
    pub tabs: Vec<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
            tabs: vec![DEFAULT_TABS.to_string()],
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `TIENDA_ADMIN_TABS` names no tab.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let tabs = match lookup("TIENDA_ADMIN_TABS") {
            Some(raw) => parse_tabs(&raw).ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "TIENDA_ADMIN_TABS".to_string(),
                    "at least one tab name is required".to_string(),
                )
            })?,
            None => vec![DEFAULT_TABS.to_string()],
        };

        Ok(Self {
            export_dir: lookup("TIENDA_EXPORT_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR), PathBuf::from),
            tabs,
        })
    }
}

/// Split a comma-separated tab list, `None` when it names nothing.
fn parse_tabs(raw: &str) -> Option<Vec<String>> {
    let tabs: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|tab| !tab.is_empty())
        .map(String::from)
        .collect();
    (!tabs.is_empty()).then_some(tabs)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AdminConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AdminConfig::default());
        assert_eq!(config.tabs, vec!["pedidos"]);
    }

    #[test]
    fn test_tabs_are_trimmed() {
        let config = AdminConfig::from_lookup(lookup(&[
            ("TIENDA_ADMIN_TABS", " pedidos, productos ,,clientes"),
            ("TIENDA_EXPORT_DIR", "/tmp/exports"),
        ]))
        .unwrap();
        assert_eq!(config.tabs, vec!["pedidos", "productos", "clientes"]);
        assert_eq!(config.export_dir, PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn test_empty_tab_list_is_rejected() {
        let err = AdminConfig::from_lookup(lookup(&[("TIENDA_ADMIN_TABS", " , ")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "TIENDA_ADMIN_TABS"));
    }
}
