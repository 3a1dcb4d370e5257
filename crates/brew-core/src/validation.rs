//! # Validation Module
//!
//! Checkout preconditions, checked synchronously before anything leaves the
//! process.
//!
//! ## Check Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "Отправить заказ" pressed                                              │
//! │       │                                                                 │
//! │       ├── cart empty? ─────────────────► EmptyCart                      │
//! │       │                                                                 │
//! │       ├── consent unchecked? ──────────► ConsentRequired                │
//! │       │                                                                 │
//! │       ├── delivery with blank address? ► AddressRequired                │
//! │       │                                                                 │
//! │       ├── blank name? ─────────────────► Required { field: "name" }     │
//! │       │                                                                 │
//! │       ├── blank phone? ────────────────► Required { field: "phone" }    │
//! │       │                                                                 │
//! │       └── OK → order is built and submitted                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first failing check wins; a rejection never touches the network.

use crate::cart::CartLineItem;
use crate::error::ValidationError;
use crate::order::{CheckoutForm, FulfillmentMode};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// True if the value is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Rejects a blank required field.
///
/// ## Example
/// ```rust
/// use brew_core::validation::validate_required;
///
/// assert!(validate_required("phone", "+7 900 000 00 00").is_ok());
/// assert!(validate_required("phone", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if is_blank(value) {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Runs every checkout precondition against the form and a cart snapshot.
pub fn validate_checkout(form: &CheckoutForm, lines: &[CartLineItem]) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::EmptyCart);
    }

    if !form.consent {
        return Err(ValidationError::ConsentRequired);
    }

    if form.fulfillment_mode == FulfillmentMode::Delivery && is_blank(&form.address) {
        return Err(ValidationError::AddressRequired);
    }

    validate_required("name", &form.name)?;
    validate_required("phone", &form.phone)?;

    Ok(())
}
