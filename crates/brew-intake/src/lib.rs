//! # brew-intake: Order Delivery
//!
//! Gets placed orders to the order-intake service and loads the storefront
//! configuration that says where that service lives.
//!
//! ## Delivery Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Order (brew-core)                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Dispatcher ── tokio::spawn ──► OrderSink::deliver(OrderPayload)        │
//! │       │                              │                                  │
//! │       ▼                              ├── HttpOrderSink (reqwest POST)   │
//! │  DeliveryTicket                      └── MemorySink (tests)             │
//! │  (safe to drop)                                                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - `StorefrontConfig` (TOML file + environment)
//! - [`client`] - The `OrderSink` trait and its implementations
//! - [`dispatch`] - Detached, single-attempt delivery
//! - [`error`] - `IntakeError`

pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;

pub use client::{HttpOrderSink, MemorySink, OrderSink};
pub use config::{CheckoutTimings, EndpointSettings, StoreSettings, StorefrontConfig};
pub use dispatch::{DeliveryOutcome, DeliveryTicket, Dispatcher};
pub use error::{IntakeError, IntakeResult};
