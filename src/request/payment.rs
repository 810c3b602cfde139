use super::{form_body, wrong_container, GatewayResponse, Transfer, FORM_CONTENT_TYPE};
use crate::config::GatewayConfig;
use crate::container::{Container, PaymentContainer};
use crate::crypto::Signable;
use crate::{CashbillError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

/// `POST /payment/{shopId}`: creates a transaction
#[derive(Debug, Clone)]
pub struct RequestPayment {
    config: GatewayConfig,
    client: Client,
    strict_requirements_channel: bool,
}

impl RequestPayment {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = config.http_client()?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: GatewayConfig, client: Client) -> Self {
        Self {
            config,
            client,
            strict_requirements_channel: false,
        }
    }

    /// Check channel requirements locally before sending
    pub fn with_strict_requirements_channel(mut self, strict: bool) -> Self {
        self.strict_requirements_channel = strict;
        self
    }

    pub fn is_strict_requirements_channel(&self) -> bool {
        self.strict_requirements_channel
    }

    /// Form fields sent to the gateway, absent optional values left out
    pub fn post_fields(container: &PaymentContainer) -> Vec<(&'static str, String)> {
        let mut fields: Vec<(&'static str, String)> = container
            .fields()
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| (name, value)))
            .collect();
        fields.push(("sign", container.signature()));
        fields
    }
}

/// When a full channel is preferred, its currencies must include the
/// payment's and an email address must be present.
pub(crate) fn check_channel(container: &PaymentContainer) -> Result<()> {
    let Some(channel) = container.channel().and_then(|c| c.as_channel()) else {
        return Ok(());
    };

    if !channel.supports(container.currency()) {
        let available: Vec<&str> = channel
            .available_currencies()
            .iter()
            .map(|currency| currency.code())
            .collect();
        return Err(CashbillError::channel_requirement(format!(
            "currency {} is not supported by channel {}, available: [{}]",
            container.currency(),
            channel.id(),
            available.join(" ")
        )));
    }

    if container.email().map_or(true, str::is_empty) {
        return Err(CashbillError::channel_requirement(format!(
            "channel {} requires the payer's email address in personal data",
            channel.id()
        )));
    }

    Ok(())
}

#[async_trait]
impl Transfer for RequestPayment {
    async fn send_request(&self, container: Container<'_>) -> Result<GatewayResponse> {
        let Container::Payment(container) = container else {
            return Err(wrong_container("PaymentContainer", container));
        };

        if self.strict_requirements_channel {
            check_channel(container)?;
        }

        let url = self.config.endpoint(["payment", container.shop_id()])?;
        let fields = Self::post_fields(container);
        let body = form_body(fields.iter().map(|(name, value)| (*name, value.as_str())));

        debug!(method = "POST", url = %url, "Sending payment request");
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        GatewayResponse::from_response(response).await
    }
}
