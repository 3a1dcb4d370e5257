//! # Brew Storefront Library
//!
//! Application layer of the Brew Coffee storefront: wires the catalog,
//! the cart and the checkout dialog to order delivery.
//!
//! ## Module Organization
//! ```text
//! brew_storefront/
//! ├── lib.rs          ◄─── You are here (Storefront setup, logging)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart state management
//! │   ├── checkout.rs ◄─── Checkout phases and timers
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Product grid
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── checkout.rs ◄─── Order dialog commands
//! │   └── store.rs    ◄─── Store info
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup
//! ```rust,no_run
//! use brew_storefront::{init_tracing, Storefront};
//! use brew_storefront::state::ConfigState;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! init_tracing();
//! let storefront = Storefront::connect(ConfigState::from_env())?;
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::sync::Arc;

use brew_core::Catalog;
use brew_intake::{Dispatcher, HttpOrderSink, IntakeResult, OrderSink};
use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{CartState, CheckoutState, ConfigState};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,brew=debug,reqwest=warn";

/// Everything a storefront session needs.
///
/// Commands take the individual fields, not the whole struct.
#[derive(Debug, Clone)]
pub struct Storefront {
    pub catalog: Arc<Catalog>,
    pub cart: CartState,
    pub checkout: CheckoutState,
    pub config: ConfigState,
}

impl Storefront {
    /// Builds a storefront that delivers orders to `sink`.
    pub fn new(config: ConfigState, sink: Arc<dyn OrderSink>) -> Self {
        let dispatcher = Dispatcher::new(sink).with_currency_sign(config.currency_sign());
        let checkout = CheckoutState::new(dispatcher, config.timings());

        Storefront {
            catalog: Arc::new(Catalog::storefront()),
            cart: CartState::new(),
            checkout,
            config,
        }
    }

    /// Builds a storefront that POSTs orders to the configured endpoint.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │  1. HTTP sink from [endpoint] (url, timeout)                            │
    /// │  2. Dispatcher around the sink                                          │
    /// │  3. Empty cart, idle checkout, built-in catalog                         │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn connect(config: ConfigState) -> IntakeResult<Self> {
        let sink = HttpOrderSink::new(config.endpoint())?;
        info!(
            endpoint = %sink.endpoint(),
            store = config.store_name(),
            "Storefront ready"
        );
        Ok(Self::new(config, Arc::new(sink)))
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=brew_storefront=trace` - Trace the app layer only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Calling it again is harmless; only the first call installs a subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // Err means a subscriber is already installed
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
