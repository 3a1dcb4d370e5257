//! # Storefront Configuration
//!
//! Where orders go and how long the checkout dialog lingers.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BREW_ORDER_ENDPOINT=https://intake.example.com/order               │
//! │     BREW_AUTO_CLOSE_DELAY_MS=3500                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/brew-storefront/storefront.toml (Linux)                  │
//! │     ~/Library/Application Support/coffee.brew.storefront/... (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     the public intake endpoint, 500 / 3500 / 500 ms timers             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [endpoint]
//! url = "https://telegram-orders-server.onrender.com/order"
//! timeout_secs = 15
//!
//! [checkout]
//! clear_cart_delay_ms = 500
//! auto_close_delay_ms = 3500
//! reset_delay_ms = 500
//!
//! [store]
//! name = "Brew Coffee"
//! currency_sign = "₽"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{IntakeError, IntakeResult};

/// Public order-intake endpoint used when nothing else is configured.
pub const DEFAULT_ORDER_ENDPOINT: &str = "https://telegram-orders-server.onrender.com/order";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

// =============================================================================
// Endpoint Settings
// =============================================================================

/// Where placed orders are POSTed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSettings {
    #[serde(default = "default_endpoint_url")]
    pub url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint_url() -> String {
    DEFAULT_ORDER_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for EndpointSettings {
    fn default() -> Self {
        EndpointSettings {
            url: default_endpoint_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EndpointSettings {
    /// Parses the configured URL.
    pub fn parsed_url(&self) -> IntakeResult<Url> {
        Ok(Url::parse(&self.url)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Checkout Timings
// =============================================================================

/// Delays that sequence the optimistic checkout.
///
/// ## Timeline
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  t=0        submit accepted, Success shown, POST spawned                │
/// │  t=500ms    cart cleared                      (clear_cart_delay_ms)     │
/// │  t=3500ms   checkout dialog closed            (auto_close_delay_ms)     │
/// │  t=4000ms   back to Idle, form reset          (+ reset_delay_ms)        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
/// `clear_cart_delay_ms` and `auto_close_delay_ms` both count from the
/// submit; `reset_delay_ms` counts from the close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutTimings {
    #[serde(default = "default_clear_cart_delay")]
    pub clear_cart_delay_ms: u64,

    #[serde(default = "default_auto_close_delay")]
    pub auto_close_delay_ms: u64,

    #[serde(default = "default_reset_delay")]
    pub reset_delay_ms: u64,
}

fn default_clear_cart_delay() -> u64 {
    500
}

fn default_auto_close_delay() -> u64 {
    3500
}

fn default_reset_delay() -> u64 {
    500
}

impl Default for CheckoutTimings {
    fn default() -> Self {
        CheckoutTimings {
            clear_cart_delay_ms: default_clear_cart_delay(),
            auto_close_delay_ms: default_auto_close_delay(),
            reset_delay_ms: default_reset_delay(),
        }
    }
}

impl CheckoutTimings {
    pub fn clear_cart_delay(&self) -> Duration {
        Duration::from_millis(self.clear_cart_delay_ms)
    }

    pub fn auto_close_delay(&self) -> Duration {
        Duration::from_millis(self.auto_close_delay_ms)
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

// =============================================================================
// Store Settings
// =============================================================================

/// Presentation settings for the store front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Shown after prices and after each line total in the order summary.
    #[serde(default = "default_currency_sign")]
    pub currency_sign: String,
}

fn default_store_name() -> String {
    "Brew Coffee".to_string()
}

fn default_currency_sign() -> String {
    brew_core::money::CURRENCY_SIGN.to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_sign: default_currency_sign(),
        }
    }
}

// =============================================================================
// Main Storefront Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub endpoint: EndpointSettings,

    #[serde(default)]
    pub checkout: CheckoutTimings,

    #[serde(default)]
    pub store: StoreSettings,
}

impl StorefrontConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> IntakeResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
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
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> IntakeResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| IntakeError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> IntakeResult<()> {
        let url = self.endpoint.parsed_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(IntakeError::InvalidUrl(format!(
                "Order endpoint must use http:// or https://, got: {}",
                self.endpoint.url
            )));
        }

        if self.endpoint.timeout_secs == 0 {
            return Err(IntakeError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment
    /// in [`load`](Self::load)).
    ///
    /// Unparseable numbers are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("BREW_ORDER_ENDPOINT") {
            debug!(url = %url, "Overriding order endpoint from environment");
            self.endpoint.url = url;
        }

        if let Some(name) = lookup("BREW_STORE_NAME") {
            self.store.name = name;
        }

        let numeric = |key: &str, target: &mut u64| {
            if let Some(raw) = lookup(key) {
                match raw.trim().parse::<u64>() {
                    Ok(value) => {
                        debug!(key, value, "Overriding setting from environment");
                        *target = value;
                    }
                    Err(_) => warn!(key, value = %raw, "Ignoring non-numeric environment override"),
                }
            }
        };

        numeric("BREW_REQUEST_TIMEOUT_SECS", &mut self.endpoint.timeout_secs);
        numeric(
            "BREW_CLEAR_CART_DELAY_MS",
            &mut self.checkout.clear_cart_delay_ms,
        );
        numeric(
            "BREW_AUTO_CLOSE_DELAY_MS",
            &mut self.checkout.auto_close_delay_ms,
        );
        numeric("BREW_RESET_DELAY_MS", &mut self.checkout.reset_delay_ms);
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("coffee", "brew", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint.url
    }

    pub fn timings(&self) -> CheckoutTimings {
        self.checkout
    }

    pub fn store_name(&self) -> &str {
        &self.store.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.endpoint_url(), DEFAULT_ORDER_ENDPOINT);
        assert_eq!(config.endpoint.timeout_secs, 15);
        assert_eq!(config.checkout.clear_cart_delay_ms, 500);
        assert_eq!(config.checkout.auto_close_delay_ms, 3500);
        assert_eq!(config.checkout.reset_delay_ms, 500);
        assert_eq!(config.store.currency_sign, "₽");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = StorefrontConfig::default();

        config.endpoint.url = "ftp://orders.example.com".to_string();
        assert!(matches!(config.validate(), Err(IntakeError::InvalidUrl(_))));

        config.endpoint.url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.endpoint.url = "http://127.0.0.1:8080/order".to_string();
        assert!(config.validate().is_ok());

        config.endpoint.timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(IntakeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [checkout]
            auto_close_delay_ms = 1000
            "#,
        )
        .unwrap();

        assert_eq!(config.checkout.auto_close_delay_ms, 1000);
        assert_eq!(config.checkout.clear_cart_delay_ms, 500);
        assert_eq!(config.endpoint_url(), DEFAULT_ORDER_ENDPOINT);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("BREW_ORDER_ENDPOINT", "http://localhost:9000/order"),
            ("BREW_CLEAR_CART_DELAY_MS", "0"),
            ("BREW_RESET_DELAY_MS", "soon"),
            ("BREW_STORE_NAME", "Тест"),
        ]
        .into_iter()
        .collect();

        let mut config = StorefrontConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.endpoint_url(), "http://localhost:9000/order");
        assert_eq!(config.checkout.clear_cart_delay_ms, 0);
        // Non-numeric value is ignored
        assert_eq!(config.checkout.reset_delay_ms, 500);
        assert_eq!(config.store_name(), "Тест");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = StorefrontConfig::default();
        config.checkout.auto_close_delay_ms = 2000;
        config.store.name = "Brew Test".to_string();
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[endpoint]"));
        assert!(contents.contains("[checkout]"));

        let loaded: StorefrontConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_on_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[endpoint\nurl = ").unwrap();

        assert!(StorefrontConfig::load(Some(path.clone())).is_err());
        let config = StorefrontConfig::load_or_default(Some(path));
        assert_eq!(config.checkout, CheckoutTimings::default());
    }

    #[test]
    fn test_timing_durations() {
        let timings = CheckoutTimings::default();
        assert_eq!(timings.clear_cart_delay(), Duration::from_millis(500));
        assert_eq!(timings.auto_close_delay(), Duration::from_millis(3500));
        assert_eq!(timings.reset_delay(), Duration::from_millis(500));
    }
}
