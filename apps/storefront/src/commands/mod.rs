//! # Commands Module
//!
//! All commands exposed to the storefront UI.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Product grid
//! ├── cart.rs      ◄─── Cart manipulation, "buy" button
//! ├── checkout.rs  ◄─── Order dialog and submission
//! └── store.rs     ◄─── Store name, currency, pickup shops
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartState) -> CartResponse
//!
//! // Needs the catalog and the cart
//! fn add_to_cart(catalog: &Catalog, cart: &CartState, ...)
//!
//! // Needs the cart (snapshot + delayed clear) and the checkout
//! fn submit_order(cart: &CartState, checkout: &CheckoutState)
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod store;
