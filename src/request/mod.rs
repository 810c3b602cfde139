//! Request builders for the gateway's REST operations
//!
//! Each builder turns one kind of [`Container`] into exactly one HTTP call
//! and hands back the raw [`GatewayResponse`]. HTTP error statuses are not
//! errors at this level: only transport failures are propagated, and
//! [`Transfer::is_error`] classifies the response afterwards.

mod channels;
mod payment;
mod transaction_info;
mod update_return_urls;

pub use channels::RequestPaymentChannels;
pub use payment::RequestPayment;
pub use transaction_info::RequestTransactionInfo;
pub use update_return_urls::RequestUpdateReturnUrls;

use crate::container::Container;
use crate::{CashbillError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Content type of form-encoded request bodies
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Status code and body of a gateway response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: String,
}

impl GatewayResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Read status and body out of a transport response
    pub async fn from_response(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(Self { status, body })
    }

    /// Decode the body into a typed value
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(CashbillError::from)
    }

    /// `errorMessage` reported by the gateway, if the body is JSON and has one
    pub fn error_message(&self) -> Option<String> {
        let value: Value = serde_json::from_str(&self.body).ok()?;
        match value.get("errorMessage")? {
            Value::Null => None,
            Value::String(message) => Some(message.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Default error rule: anything but 200, or a body carrying `errorMessage`
pub fn is_error_response(response: &GatewayResponse) -> bool {
    response.status != 200 || response.error_message().is_some()
}

/// One gateway operation: sends a container, classifies the response
#[async_trait]
pub trait Transfer: Send + Sync {
    /// Issue the HTTP call for `container`.
    ///
    /// Fails with [`CashbillError::InvalidArgument`] before any network
    /// activity when handed a container of the wrong kind.
    async fn send_request(&self, container: Container<'_>) -> Result<GatewayResponse>;

    /// Whether the gateway reported a failure
    fn is_error(&self, response: &GatewayResponse) -> bool {
        is_error_response(response)
    }
}

pub(crate) fn wrong_container(expected: &str, given: Container<'_>) -> CashbillError {
    CashbillError::invalid_argument(format!(
        "container must be of type {}, {} given",
        expected,
        given.kind()
    ))
}

pub(crate) fn form_body<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}
