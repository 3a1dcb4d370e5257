//! # Error Types
//!
//! Domain-specific error types for brew-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  brew-core errors (this file)                                          │
//! │  ├── CoreError        - Catalog lookups, unknown selectors             │
//! │  └── ValidationError  - Checkout preconditions                         │
//! │                                                                         │
//! │  brew-intake errors (separate crate)                                   │
//! │  └── IntakeError      - Config and delivery failures (logged only)     │
//! │                                                                         │
//! │  storefront app errors                                                 │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → UI                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Delivery failures never reach this hierarchy's user-facing end: once an
//! order is committed locally the UI has already shown success.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product with this id exists in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A grind selector string did not match any known grind.
    #[error("Unknown grind: '{0}'")]
    UnknownGrind(String),

    /// A pickup location selector did not match any coffee shop.
    #[error("Unknown pickup location: '{0}'")]
    UnknownPickupLocation(String),

    /// A fulfillment mode string was neither delivery nor pickup.
    #[error("Unknown fulfillment mode: '{0}'")]
    UnknownFulfillmentMode(String),

    /// A grind was supplied for a product that is not sold as beans.
    ///
    /// ## When This Occurs
    /// - A drip bag or the advent calendar is added with a grind selector
    #[error("Product {product} does not take a grind")]
    GrindNotApplicable { product: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Checkout validation failures.
///
/// These are the only failures a customer ever sees. Each one is reported
/// synchronously, before any network activity, and leaves the checkout in
/// its idle state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The cart has no line items.
    #[error("Cart is empty")]
    EmptyCart,

    /// The personal-data consent checkbox is unchecked.
    #[error("Consent to personal data processing is required")]
    ConsentRequired,

    /// Delivery was chosen but the address is blank.
    #[error("Delivery address is required")]
    AddressRequired,

    /// A required contact field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },
}

impl ValidationError {
    /// Machine-readable reason, stable across message wording changes.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::EmptyCart => "empty_cart",
            ValidationError::ConsentRequired => "consent_required",
            ValidationError::AddressRequired => "address_required",
            ValidationError::Required { .. } => "field_required",
        }
    }

    /// The message shown to the customer.
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::EmptyCart => "В корзине нет товаров".to_string(),
            ValidationError::ConsentRequired => {
                "Пожалуйста, дайте согласие на обработку персональных данных".to_string()
            }
            ValidationError::AddressRequired => "Пожалуйста, укажите адрес доставки".to_string(),
            ValidationError::Required { field } => format!("Пожалуйста, заполните поле: {field}"),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
