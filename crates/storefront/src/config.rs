//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `TIENDA_DATA_DIR` - Directory holding `cart.json` and `orders.json` (default: .tienda)
//! - `TIENDA_SHIPPING_FLAT_RATE` - Shipping charged below the threshold (default: 150)
//! - `TIENDA_FREE_SHIPPING_THRESHOLD` - Subtotals above this ship free (default: 2000)
//! - `TIENDA_CONTACT_PHONE` - Phone shown in the header and footer (default: +502 50174461)
//! - `TIENDA_FACEBOOK_URL` - Facebook link target (default: #)

use std::path::PathBuf;

use thiserror::Error;
use tienda_core::{Price, ShippingPolicy};

const DEFAULT_DATA_DIR: &str = ".tienda";
const DEFAULT_CONTACT_PHONE: &str = "+502 50174461";
const DEFAULT_FACEBOOK_URL: &str = "#";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory of the file-backed store
    pub data_dir: PathBuf,
    /// Shipping rate and free-shipping threshold
    pub shipping: ShippingPolicy,
    /// Contact details rendered on page load
    pub contact: ContactConfig,
}

/// Contact details shown in the header and footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactConfig {
    pub phone: String,
    pub facebook_url: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            phone: DEFAULT_CONTACT_PHONE.to_string(),
            facebook_url: DEFAULT_FACEBOOK_URL.to_string(),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            shipping: ShippingPolicy::default(),
            contact: ContactConfig::default(),
        }
    }
}

impl StorefrontConfig {
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
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ShippingPolicy::default();
        let flat_rate = get_price(&lookup, "TIENDA_SHIPPING_FLAT_RATE")?
            .unwrap_or(defaults.flat_rate);
        let free_threshold = get_price(&lookup, "TIENDA_FREE_SHIPPING_THRESHOLD")?
            .unwrap_or(defaults.free_threshold);

        Ok(Self {
            data_dir: lookup("TIENDA_DATA_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from),
            shipping: ShippingPolicy::new(flat_rate, free_threshold),
            contact: ContactConfig {
                phone: get_or_default(&lookup, "TIENDA_CONTACT_PHONE", DEFAULT_CONTACT_PHONE),
                facebook_url: get_or_default(&lookup, "TIENDA_FACEBOOK_URL", DEFAULT_FACEBOOK_URL),
            },
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Get an optional price variable.
fn get_price(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<Price>, ConfigError> {
    lookup(key)
        .map(|raw| {
            raw.parse::<Price>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
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
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".tienda"));
        assert_eq!(config.shipping, ShippingPolicy::default());
        assert_eq!(config.contact.phone, "+502 50174461");
        assert_eq!(config.contact.facebook_url, "#");
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("TIENDA_DATA_DIR", "/var/lib/tienda"),
            ("TIENDA_SHIPPING_FLAT_RATE", "99.50"),
            ("TIENDA_FREE_SHIPPING_THRESHOLD", "1500"),
            ("TIENDA_FACEBOOK_URL", "https://facebook.com/tienda"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/tienda"));
        assert_eq!(config.shipping.flat_rate.to_string(), "$99.50");
        assert_eq!(config.shipping.free_threshold, Price::from_units(1500));
        assert_eq!(config.contact.facebook_url, "https://facebook.com/tienda");
    }

    #[test]
    fn test_invalid_price_is_rejected() {
        let err = StorefrontConfig::from_lookup(lookup(&[("TIENDA_SHIPPING_FLAT_RATE", "gratis")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "TIENDA_SHIPPING_FLAT_RATE"));
    }
}
