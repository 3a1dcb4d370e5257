//! # Cart State
//!
//! Holds the customer's cart and whether the cart view is open.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands may access/modify the cart
//! 2. The checkout's cart-clearing timer mutates it from a spawned task
//! 3. Only one mutation may run at a time
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  UI Action                Command                 Cart State Change     │
//! │  ─────────                ───────                 ─────────────────     │
//! │                                                                         │
//! │  "В корзину" / "+" ──────► add_to_cart() ───────► qty + 1 or insert    │
//! │                                                                         │
//! │  "−" ────────────────────► remove_from_cart() ──► qty − 1 or delete    │
//! │                                                                         │
//! │  Trash icon ─────────────► remove_line() ───────► delete line          │
//! │                                                                         │
//! │  Order placed (+500 ms) ─► (checkout timer) ────► clear()              │
//! │                                                                         │
//! │  Open cart ──────────────► get_cart() ──────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use brew_core::{Cart, Money};
use serde::{Deserialize, Serialize};

/// Cart totals summary for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct lines.
    pub line_count: usize,

    /// Σ quantity, the cart badge number.
    pub item_count: u32,

    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.len(),
            item_count: cart.count(),
            total: cart.total(),
        }
    }
}

/// Shared cart state.
///
/// Cloning is cheap and every clone sees the same cart.
///
/// ## Poisoning
/// A panic while the lock is held leaves a cart whose invariants still
/// hold (every mutation is a single step), so a poisoned lock is entered
/// anyway.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
    view_open: Arc<AtomicBool>,
}

impl CartState {
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
            view_open: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use brew_storefront::state::{CartState, CartTotals};
    ///
    /// let cart_state = CartState::new();
    /// let totals = cart_state.with_cart(|cart| CartTotals::from(cart));
    /// assert_eq!(totals.item_count, 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    pub fn totals(&self) -> CartTotals {
        self.with_cart(|cart| CartTotals::from(cart))
    }

    pub fn is_view_open(&self) -> bool {
        self.view_open.load(Ordering::SeqCst)
    }

    pub fn set_view_open(&self, open: bool) {
        self.view_open.store(open, Ordering::SeqCst);
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}
