//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │  Dialog  │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       ▲                │                                 │              │
//! │       │           add_to_cart                            │              │
//! │       │           remove_from_cart                       │              │
//! │       │           remove_line                            │              │
//! │       │                                                  │              │
//! │       └──────────── cleared 500 ms after the order ──────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use brew_core::{Cart, CartKey, CartLineItem, Catalog, Grind, ProductId, RemoveOutcome};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CartState, CartTotals};

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.snapshot(),
            totals: CartTotals::from(cart),
        }
    }
}

/// What the header "buy" button should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuyAction {
    OpenCart,
    ScrollToCatalog,
}

fn parse_grind(grind: Option<&str>) -> Result<Option<Grind>, ApiError> {
    Ok(grind.map(|g| g.parse::<Grind>()).transpose()?)
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds one unit of a product.
///
/// ## Behavior
/// - Beans without a grind get the selector default (whole beans)
/// - A grind on a drip bag or gift is rejected
/// - Repeat adds of the same product and grind increase one line
pub fn add_to_cart(
    catalog: &Catalog,
    cart: &CartState,
    product_id: &str,
    grind: Option<&str>,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, grind = ?grind, "add_to_cart command");

    let product = catalog.require(product_id)?;
    let grind = parse_grind(grind)?;

    cart.with_cart_mut(|c| -> Result<CartResponse, ApiError> {
        let quantity = c.add_product(product, grind)?;
        debug!(product_id = %product_id, quantity, "Cart line updated");
        Ok(CartResponse::from(&*c))
    })
}

/// Removes one unit of a product, the "−" button.
///
/// Unknown products and products not in the cart leave the cart unchanged.
pub fn remove_from_cart(
    cart: &CartState,
    product_id: &str,
    grind: Option<&str>,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, grind = ?grind, "remove_from_cart command");

    let grind = parse_grind(grind)?;
    let product_id = ProductId::new(product_id);

    Ok(cart.with_cart_mut(|c| {
        match c.remove(&product_id, grind) {
            RemoveOutcome::Decremented { key, remaining } => {
                debug!(key = %key, remaining, "Cart line decremented");
            }
            RemoveOutcome::Removed { key } => debug!(key = %key, "Cart line removed"),
            RemoveOutcome::NotFound => debug!(product_id = %product_id, "Nothing to remove"),
        }
        CartResponse::from(&*c)
    }))
}

/// Deletes a whole line, the trash icon in the cart view.
pub fn remove_line(cart: &CartState, key: &CartKey) -> CartResponse {
    debug!(key = %key, "remove_line command");
    cart.with_cart_mut(|c| {
        if !c.remove_completely(key) {
            debug!(key = %key, "Line not in cart");
        }
        CartResponse::from(&*c)
    })
}

pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");
    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}

/// The header "buy" button: opens the cart when it has items, otherwise
/// sends the customer to the catalog.
pub fn buy_click(cart: &CartState) -> BuyAction {
    if cart.totals().item_count > 0 {
        cart.set_view_open(true);
        BuyAction::OpenCart
    } else {
        BuyAction::ScrollToCatalog
    }
}

pub fn close_cart(cart: &CartState) {
    cart.set_view_open(false);
}
