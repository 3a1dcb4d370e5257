//! # State Module
//!
//! Manages application state for the storefront.
//!
//! ## Why Multiple State Types?
//! Each command takes only the state it touches, so a cart command never
//! needs the checkout dialog and vice versa.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        Storefront                               │   │
//! │  │  catalog, cart, checkout, config                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │  CartState   │  │  CheckoutState   │  │   ConfigState    │          │
//! │  │              │  │                  │  │                  │          │
//! │  │  Arc<Mutex<  │  │  phase, form,    │  │  endpoint        │          │
//! │  │    Cart      │  │  dialog open,    │  │  timings         │          │
//! │  │  >>          │  │  Dispatcher      │  │  store name      │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState: Arc<Mutex<Cart>>, shared with the cart-clear timer       │
//! │  • CheckoutState: Arc<Mutex<..>>, shared with the reset timer          │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod checkout;
mod config;

pub use cart::{CartState, CartTotals};
pub use checkout::{CheckoutError, CheckoutPhase, CheckoutState, CheckoutStatus, SubmitReceipt};
pub use config::ConfigState;
