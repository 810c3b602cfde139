//! Error types for the cashbill library

use thiserror::Error;

/// Result type alias for cashbill operations
pub type Result<T> = std::result::Result<T, CashbillError>;

/// Main error type for cashbill operations
#[derive(Error, Debug)]
pub enum CashbillError {
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error (connection, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL could not be parsed or extended
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// A request builder was handed a container it does not understand
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Currency code outside of ISO 4217
    #[error("Invalid currency: {code} is not an ISO 4217 currency code")]
    InvalidCurrency { code: String },

    /// Strict channel requirements were not met before sending a payment
    #[error("Channel requirement violated: {message}")]
    ChannelRequirement { message: String },

    /// Notification arguments carry no order identifier
    #[error("Notification arguments do not contain an order id")]
    MissingOrderId,

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CashbillError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an invalid currency error
    pub fn invalid_currency(code: impl Into<String>) -> Self {
        Self::InvalidCurrency { code: code.into() }
    }

    /// Create a channel requirement error
    pub fn channel_requirement(message: impl Into<String>) -> Self {
        Self::ChannelRequirement {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
