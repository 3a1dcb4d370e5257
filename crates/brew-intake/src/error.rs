//! # Intake Error Types
//!
//! Error types for configuration and order delivery.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Intake Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────────┐  ┌─────────────────────┐  ┌────────────────┐  │
//! │  │   Configuration     │  │     Transport       │  │    Payload     │  │
//! │  │                     │  │                     │  │                │  │
//! │  │  InvalidConfig      │  │  Connection         │  │  Serialization │  │
//! │  │  InvalidUrl         │  │  Timeout            │  │                │  │
//! │  │  ConfigLoadFailed   │  │  Rejected (non-2xx) │  │                │  │
//! │  │  ConfigSaveFailed   │  │                     │  │                │  │
//! │  └─────────────────────┘  └─────────────────────┘  └────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Transport and payload errors never reach the customer. The dispatcher
//! logs them and the checkout stays in its success state.

use thiserror::Error;

/// Result type alias for intake operations.
pub type IntakeResult<T> = Result<T, IntakeError>;

/// Errors raised while configuring or delivering orders.
#[derive(Debug, Error)]
pub enum IntakeError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid storefront configuration.
    #[error("Invalid storefront configuration: {0}")]
    InvalidConfig(String),

    /// The order endpoint is not a usable http(s) URL.
    #[error("Invalid order endpoint: {0}")]
    InvalidUrl(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never got a response.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The request timed out.
    #[error("Order delivery timed out")]
    Timeout,

    /// The intake service answered with a non-2xx status.
    #[error("Order rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    // =========================================================================
    // Payload Errors
    // =========================================================================
    /// Failed to serialize the order payload.
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for IntakeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            IntakeError::Timeout
        } else if err.is_builder() {
            IntakeError::Client(err.to_string())
        } else if err.is_decode() || err.is_body() {
            IntakeError::SerializationFailed(err.to_string())
        } else {
            IntakeError::ConnectionFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for IntakeError {
    fn from(err: serde_json::Error) -> Self {
        IntakeError::SerializationFailed(err.to_string())
    }
}

impl From<url::ParseError> for IntakeError {
    fn from(err: url::ParseError) -> Self {
        IntakeError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for IntakeError {
    fn from(err: std::io::Error) -> Self {
        IntakeError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for IntakeError {
    fn from(err: toml::de::Error) -> Self {
        IntakeError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for IntakeError {
    fn from(err: toml::ser::Error) -> Self {
        IntakeError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl IntakeError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            IntakeError::InvalidConfig(_)
                | IntakeError::InvalidUrl(_)
                | IntakeError::ConfigLoadFailed(_)
                | IntakeError::ConfigSaveFailed(_)
        )
    }

    /// Returns true if the order may not have reached the intake service.
    pub fn is_delivery_error(&self) -> bool {
        matches!(
            self,
            IntakeError::ConnectionFailed(_) | IntakeError::Timeout | IntakeError::Rejected { .. }
        )
    }
}
