//! # Configuration State
//!
//! Storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BREW_*`)
//! 2. Config file (`storefront.toml`)
//! 3. Defaults (`brew_intake::config`)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use brew_core::Money;
use brew_intake::{CheckoutTimings, EndpointSettings, StorefrontConfig};
use std::path::PathBuf;

/// Read-only storefront configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigState {
    config: StorefrontConfig,
}

impl ConfigState {
    pub fn new(config: StorefrontConfig) -> Self {
        ConfigState { config }
    }

    /// Loads from the platform config file and `BREW_*` variables, falling
    /// back to defaults on any error.
    pub fn from_env() -> Self {
        Self::load(None)
    }

    pub fn load(path: Option<PathBuf>) -> Self {
        ConfigState::new(StorefrontConfig::load_or_default(path))
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &EndpointSettings {
        &self.config.endpoint
    }

    pub fn timings(&self) -> CheckoutTimings {
        self.config.checkout
    }

    pub fn store_name(&self) -> &str {
        &self.config.store.name
    }

    pub fn currency_sign(&self) -> &str {
        &self.config.store.currency_sign
    }

    /// Formats an amount with the configured currency sign.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::Money;
    /// use brew_storefront::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_price(Money::from_units(850)), "850 ₽");
    /// ```
    pub fn format_price(&self, amount: Money) -> String {
        format!("{} {}", amount.units(), self.currency_sign())
    }
}
