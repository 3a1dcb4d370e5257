//! # Money Module
//!
//! Provides the `Money` type for storefront prices.
//!
//! ## Whole Units
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every catalog price is a whole number of rubles:                       │
//! │                                                                         │
//! │    Beans 200 g ........ 850 ₽                                          │
//! │    Drip bag ........... 130 ₽                                          │
//! │    Advent calendar .... 3500 ₽                                         │
//! │                                                                         │
//! │  The type stores an unsigned integer and never sees a float. It does   │
//! │  not care whether the unit is a ruble or a kopeck; the catalog and the │
//! │  intake service agree on whole rubles.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use brew_core::money::Money;
//!
//! let price = Money::from_units(850);
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.units(), 1700);
//! assert_eq!(line_total.to_string(), "1700 ₽");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

/// Currency sign appended to formatted amounts and order summaries.
pub const CURRENCY_SIGN: &str = "₽";

// =============================================================================
// Money Type
// =============================================================================

/// A non-negative monetary amount in whole currency units.
///
/// ## Design Decisions
/// - **u64 (unsigned)**: prices and totals are never negative; there are no
///   refunds or discounts in the storefront
/// - **Saturating arithmetic**: an absurd quantity cannot panic the cart
/// - **Transparent serde**: serializes as a bare JSON number, which is what
///   the order-intake service expects for `total`
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] u64);

impl Money {
    /// Creates a Money value from whole units.
    #[inline]
    pub const fn from_units(units: u64) -> Self {
        Money(units)
    }

    /// Returns the value in whole units.
    #[inline]
    pub const fn units(&self) -> u64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::money::Money;
    ///
    /// let drip = Money::from_units(130);
    /// assert_eq!(drip.multiply_quantity(3).units(), 390);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, quantity: u32) -> Self {
        Money(self.0.saturating_mul(quantity as u64))
    }
}

// =============================================================================
// Operator Implementations
// =============================================================================

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl From<u64> for Money {
    fn from(units: u64) -> Self {
        Money(units)
    }
}

/// Formats as `"<units> ₽"`, the default way prices appear in the cart.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, CURRENCY_SIGN)
    }
}
