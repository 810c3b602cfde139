use super::{wrong_container, GatewayResponse, Transfer};
use crate::config::GatewayConfig;
use crate::container::{ChannelsContainer, Container};
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// `GET /paymentchannels/{shopId}[/{lang}]`: channels available to a shop
#[derive(Debug, Clone)]
pub struct RequestPaymentChannels {
    config: GatewayConfig,
    client: Client,
}

impl RequestPaymentChannels {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = config.http_client()?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: GatewayConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn request_url(&self, container: &ChannelsContainer) -> Result<Url> {
        let mut segments = vec!["paymentchannels", container.shop_id()];
        if let Some(language) = container.language() {
            segments.push(language.path_segment());
        }
        self.config.endpoint(segments)
    }
}

#[async_trait]
impl Transfer for RequestPaymentChannels {
    async fn send_request(&self, container: Container<'_>) -> Result<GatewayResponse> {
        let Container::Channels(container) = container else {
            return Err(wrong_container("ChannelsContainer", container));
        };

        let url = self.request_url(container)?;
        tracing::debug!(method = "GET", url = %url, "Requesting payment channels");
        let response = self.client.get(url).send().await?;

        GatewayResponse::from_response(response).await
    }
}
