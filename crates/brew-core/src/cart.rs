//! # Cart Module
//!
//! The in-memory shopping cart and its reducer operations.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action                 Operation               Cart Change          │
//! │  ─────────                 ─────────               ───────────          │
//! │                                                                         │
//! │  Click "+" on card ──────► add() ────────────────► qty += 1 / insert   │
//! │                                                                         │
//! │  Click "−" on card ──────► remove() ─────────────► qty -= 1 / delete   │
//! │                                                                         │
//! │  Trash icon in cart ─────► remove_completely() ──► delete line         │
//! │                                                                         │
//! │  Order submitted ────────► clear() ──────────────► empty               │
//! │                                                                         │
//! │  Header badge / totals ──► count(), total() ─────► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! A line is identified by a [`CartKey`]: product reference plus optional
//! grind. Keys are compared structurally, so a product whose *name*
//! contains a grind word can never collide with another product's line.

use std::fmt;
use std::num::NonZeroU32;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{Grind, Product, ProductId};
use crate::error::CoreResult;
use crate::money::Money;

// =============================================================================
// Cart Key
// =============================================================================

/// Composite identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartKey {
    pub product: ProductId,
    pub grind: Option<Grind>,
}

impl CartKey {
    pub fn new(product: ProductId, grind: Option<Grind>) -> Self {
        CartKey { product, grind }
    }

    /// Key for a product sold without a grind.
    pub fn plain(product: ProductId) -> Self {
        CartKey::new(product, None)
    }
}

/// `product` or `product/grind`; for logs and UI element keys only.
impl fmt::Display for CartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.grind {
            Some(grind) => write!(f, "{}/{}", self.product, grind),
            None => write!(f, "{}", self.product),
        }
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// One entry in the cart.
///
/// ## Design Notes
/// - `quantity` is a `NonZeroU32`: a line at zero cannot be represented,
///   the decrement path deletes the line instead
/// - `unit_price` is frozen when the line is first created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub key: CartKey,

    /// Display name, including the grind label for beans.
    pub name: String,

    pub unit_price: Money,

    #[ts(type = "number")]
    pub quantity: NonZeroU32,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    fn new(key: CartKey, name: String, unit_price: Money) -> Self {
        CartLineItem {
            key,
            name,
            unit_price,
            quantity: NonZeroU32::MIN,
            added_at: Utc::now(),
        }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity.get())
    }
}

// =============================================================================
// Remove Outcome
// =============================================================================

/// What a [`Cart::remove`] call did.
///
/// Removing something that is not in the cart is not an error; the
/// outcome just reports `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The line lost one unit and is still in the cart.
    Decremented { key: CartKey, remaining: u32 },

    /// The line had a single unit and was deleted.
    Removed { key: CartKey },

    /// No line matched; the cart is unchanged.
    NotFound,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - At most one line per [`CartKey`]
/// - Every line has quantity ≥ 1
/// - `total()` and `count()` are computed from the lines on every call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartLineItem>,

    /// When the cart was created/last cleared
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds one unit of `key`.
    ///
    /// ## Behavior
    /// - Line already present: quantity increases by 1 (price and name are
    ///   left as first recorded)
    /// - Line absent: inserted with quantity 1
    ///
    /// ## Returns
    /// The line's quantity after the add.
    pub fn add(&mut self, key: CartKey, name: impl Into<String>, unit_price: Money) -> u32 {
        if let Some(line) = self.items.iter_mut().find(|l| l.key == key) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity.get();
        }

        self.items.push(CartLineItem::new(key, name.into(), unit_price));
        1
    }

    /// Adds one unit of a catalog product.
    ///
    /// Resolves the grind through [`Product::resolve_grind`] and derives the
    /// line name and price from the product.
    pub fn add_product(&mut self, product: &Product, grind: Option<Grind>) -> CoreResult<u32> {
        let grind = product.resolve_grind(grind)?;
        Ok(self.add(
            product.cart_key(grind),
            product.display_name(grind),
            product.price,
        ))
    }

    /// Removes one unit of a product.
    ///
    /// ## Lookup
    /// 1. Exact key (`product` + `grind`)
    /// 2. Otherwise, the first line of the same product with any grind.
    ///    Callers that do not know which grind the customer picked still
    ///    decrement something sensible.
    ///
    /// ## Behavior
    /// - quantity > 1: decrement
    /// - quantity == 1: delete the line
    /// - nothing matched: no-op
    pub fn remove(&mut self, product: &ProductId, grind: Option<Grind>) -> RemoveOutcome {
        let Some(index) = self.find_index(product, grind) else {
            return RemoveOutcome::NotFound;
        };

        let remaining = self.items[index].quantity.get() - 1;
        match NonZeroU32::new(remaining) {
            Some(quantity) => {
                let line = &mut self.items[index];
                line.quantity = quantity;
                RemoveOutcome::Decremented {
                    key: line.key.clone(),
                    remaining,
                }
            }
            None => {
                let line = self.items.remove(index);
                RemoveOutcome::Removed { key: line.key }
            }
        }
    }

    /// Deletes a line regardless of its quantity.
    ///
    /// Returns `false` if the key was not in the cart.
    pub fn remove_completely(&mut self, key: &CartKey) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|l| &l.key != key);
        self.items.len() != initial_len
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Σ(unit price × quantity).
    pub fn total(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Σ(quantity): the number shown on the cart badge.
    pub fn count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.quantity.get()))
    }

    /// Quantity to show on a product card.
    ///
    /// Uses the same lookup as [`Cart::remove`], so the number on the card
    /// is the line the "−" button will act on.
    pub fn quantity_of(&self, product: &ProductId, grind: Option<Grind>) -> u32 {
        self.find_index(product, grind)
            .map(|i| self.items[i].quantity.get())
            .unwrap_or(0)
    }

    pub fn line(&self, key: &CartKey) -> Option<&CartLineItem> {
        self.items.iter().find(|l| &l.key == key)
    }

    pub fn lines(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Owned copy of the lines, taken when an order is built.
    pub fn snapshot(&self) -> Vec<CartLineItem> {
        self.items.clone()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn find_index(&self, product: &ProductId, grind: Option<Grind>) -> Option<usize> {
        self.items
            .iter()
            .position(|l| &l.key.product == product && l.key.grind == grind)
            .or_else(|| self.items.iter().position(|l| &l.key.product == product))
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use std::collections::HashSet;

    fn ethiopia(grind: Grind) -> CartKey {
        CartKey::new(ProductId::new("ethiopia-bule-hora"), Some(grind))
    }

    fn add_ethiopia(cart: &mut Cart, grind: Grind) -> u32 {
        cart.add(ethiopia(grind), "Эфиопия Буле Хора", Money::from_units(850))
    }

    #[test]
    fn test_add_same_key_twice_merges() {
        let mut cart = Cart::new();

        assert_eq!(add_ethiopia(&mut cart, Grind::Whole), 1);
        assert_eq!(add_ethiopia(&mut cart, Grind::Whole), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), Money::from_units(1700));
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_add_two_grinds_gives_two_lines() {
        let mut cart = Cart::new();
        add_ethiopia(&mut cart, Grind::Whole);
        add_ethiopia(&mut cart, Grind::Espresso);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.line(&ethiopia(Grind::Whole)).unwrap().quantity(), 1);
        assert_eq!(cart.line(&ethiopia(Grind::Espresso)).unwrap().quantity(), 1);
    }

    #[test]
    fn test_name_with_separator_does_not_collide() {
        // A product literally named "X-espresso" vs product "X" ground for espresso
        let mut cart = Cart::new();
        cart.add(
            CartKey::plain(ProductId::new("x-espresso")),
            "X-espresso",
            Money::from_units(100),
        );
        cart.add(
            CartKey::new(ProductId::new("x"), Some(Grind::Espresso)),
            "X (Эспрессо)",
            Money::from_units(200),
        );

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Money::from_units(300));
    }

    #[test]
    fn test_remove_decrements_then_deletes() {
        let mut cart = Cart::new();
        add_ethiopia(&mut cart, Grind::Filter);
        add_ethiopia(&mut cart, Grind::Filter);

        let product = ProductId::new("ethiopia-bule-hora");
        assert_eq!(
            cart.remove(&product, Some(Grind::Filter)),
            RemoveOutcome::Decremented {
                key: ethiopia(Grind::Filter),
                remaining: 1
            }
        );
        assert_eq!(cart.line(&ethiopia(Grind::Filter)).unwrap().quantity(), 1);

        assert_eq!(
            cart.remove(&product, Some(Grind::Filter)),
            RemoveOutcome::Removed {
                key: ethiopia(Grind::Filter)
            }
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_falls_back_to_product_without_grind() {
        let mut cart = Cart::new();
        add_ethiopia(&mut cart, Grind::Turkish);

        let outcome = cart.remove(&ProductId::new("ethiopia-bule-hora"), Some(Grind::Whole));
        assert_eq!(
            outcome,
            RemoveOutcome::Removed {
                key: ethiopia(Grind::Turkish)
            }
        );

        add_ethiopia(&mut cart, Grind::Turkish);
        let outcome = cart.remove(&ProductId::new("ethiopia-bule-hora"), None);
        assert!(matches!(outcome, RemoveOutcome::Removed { .. }));
    }

    #[test]
    fn test_remove_prefers_exact_grind() {
        let mut cart = Cart::new();
        add_ethiopia(&mut cart, Grind::Whole);
        add_ethiopia(&mut cart, Grind::Espresso);

        cart.remove(&ProductId::new("ethiopia-bule-hora"), Some(Grind::Espresso));

        assert!(cart.line(&ethiopia(Grind::Espresso)).is_none());
        assert!(cart.line(&ethiopia(Grind::Whole)).is_some());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.remove(&ProductId::new("drip-guatemala"), None),
            RemoveOutcome::NotFound
        );

        add_ethiopia(&mut cart, Grind::Whole);
        assert_eq!(
            cart.remove(&ProductId::new("drip-guatemala"), None),
            RemoveOutcome::NotFound
        );
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_remove_completely() {
        let mut cart = Cart::new();
        for _ in 0..5 {
            add_ethiopia(&mut cart, Grind::Whole);
        }

        assert!(cart.remove_completely(&ethiopia(Grind::Whole)));
        assert!(cart.is_empty());
        assert!(!cart.remove_completely(&ethiopia(Grind::Whole)));
    }

    #[test]
    fn test_quantity_of_uses_remove_lookup() {
        let mut cart = Cart::new();
        add_ethiopia(&mut cart, Grind::Espresso);
        add_ethiopia(&mut cart, Grind::Espresso);

        let product = ProductId::new("ethiopia-bule-hora");
        assert_eq!(cart.quantity_of(&product, Some(Grind::Espresso)), 2);
        assert_eq!(cart.quantity_of(&product, Some(Grind::Whole)), 2);
        assert_eq!(cart.quantity_of(&ProductId::new("drip-ethiopia"), None), 0);
    }

    #[test]
    fn test_add_product_from_catalog() {
        let catalog = Catalog::storefront();
        let mut cart = Cart::new();

        let beans = catalog.require("rwanda-gasharu").unwrap();
        cart.add_product(beans, None).unwrap();
        let line = &cart.lines()[0];
        assert_eq!(line.key.grind, Some(Grind::Whole));
        assert_eq!(line.name, "Руанда Гашару (Зерно)");

        let advent = catalog.require("advent-calendar").unwrap();
        cart.add_product(advent, None).unwrap();
        assert!(cart.add_product(advent, Some(Grind::Filter)).is_err());

        assert_eq!(cart.total(), Money::from_units(850 + 3500));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        add_ethiopia(&mut cart, Grind::Whole);
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_cart_key_display() {
        assert_eq!(ethiopia(Grind::FrenchPress).to_string(), "ethiopia-bule-hora/french-press");
        assert_eq!(
            CartKey::plain(ProductId::new("drip-ethiopia")).to_string(),
            "drip-ethiopia"
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        const PRODUCTS: [(&str, u64); 3] = [
            ("ethiopia-bule-hora", 850),
            ("drip-ethiopia", 130),
            ("advent-calendar", 3500),
        ];

        #[derive(Debug, Clone)]
        enum Op {
            Add { product: usize, grind: Option<Grind> },
            Remove { product: usize, grind: Option<Grind> },
        }

        fn grind() -> impl Strategy<Value = Option<Grind>> {
            prop_oneof![
                Just(None),
                (0..Grind::ALL.len()).prop_map(|i| Some(Grind::ALL[i])),
            ]
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0..PRODUCTS.len(), grind()).prop_map(|(product, grind)| Op::Add { product, grind }),
                (0..PRODUCTS.len(), grind())
                    .prop_map(|(product, grind)| Op::Remove { product, grind }),
            ]
        }

        proptest! {
            #[test]
            fn test_cart_invariants_hold(ops in proptest::collection::vec(op(), 0..64)) {
                let mut cart = Cart::new();
                let mut expected_count: u32 = 0;

                for op in ops {
                    match op {
                        Op::Add { product, grind } => {
                            let (id, price) = PRODUCTS[product];
                            cart.add(
                                CartKey::new(ProductId::new(id), grind),
                                id,
                                Money::from_units(price),
                            );
                            expected_count += 1;
                        }
                        Op::Remove { product, grind } => {
                            let (id, _) = PRODUCTS[product];
                            if cart.remove(&ProductId::new(id), grind) != RemoveOutcome::NotFound {
                                expected_count -= 1;
                            }
                        }
                    }

                    let keys: HashSet<&CartKey> = cart.lines().iter().map(|l| &l.key).collect();
                    prop_assert_eq!(keys.len(), cart.len());
                    prop_assert!(cart.lines().iter().all(|l| l.quantity() >= 1));

                    let expected_total: u64 = cart
                        .lines()
                        .iter()
                        .map(|l| l.unit_price.units() * u64::from(l.quantity()))
                        .sum();
                    prop_assert_eq!(cart.total().units(), expected_total);
                    prop_assert_eq!(cart.count(), expected_count);
                }
            }
        }
    }
}
