//! # brew-core: Pure Business Logic for the Brew Storefront
//!
//! This crate holds the storefront's model layer: the catalog, the cart
//! reducer and the checkout rules. Everything here is synchronous and
//! deterministic; timers and network delivery live in `brew-intake` and the
//! storefront app.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Brew Storefront Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI                                │   │
//! │  │    Product Grid ──► Cart Modal ──► Checkout Modal              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ brew-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │   order   │  │ validation│  │   │
//! │  │   │  Product  │  │   Cart    │  │   Order   │  │  checkout │  │   │
//! │  │   │   Grind   │  │  CartKey  │  │  Payload  │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 brew-intake (Delivery Layer)                    │   │
//! │  │            POST of the order payload, fire-and-forget           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Whole-unit price type
//! - [`catalog`] - Products, grind variants, the built-in assortment
//! - [`cart`] - The cart reducer and its derived totals
//! - [`order`] - Checkout form, immutable orders, the wire payload
//! - [`validation`] - Checkout preconditions
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use brew_core::{Cart, CartKey, Grind, Money, ProductId};
//!
//! let mut cart = Cart::new();
//! let key = CartKey::new(ProductId::new("ethiopia-bule-hora"), Some(Grind::Whole));
//!
//! cart.add(key.clone(), "Эфиопия Буле Хора (Зерно)", Money::from_units(850));
//! cart.add(key, "Эфиопия Буле Хора (Зерно)", Money::from_units(850));
//!
//! assert_eq!(cart.total(), Money::from_units(1700));
//! assert_eq!(cart.count(), 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartKey, CartLineItem, RemoveOutcome};
pub use catalog::{Catalog, Grind, Product, ProductId, ProductKind, Section};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{
    CheckoutForm, CustomerContact, Fulfillment, FulfillmentMode, Order, OrderPayload,
    PickupLocation,
};
