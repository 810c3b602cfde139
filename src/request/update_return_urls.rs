use super::{form_body, wrong_container, GatewayResponse, Transfer, FORM_CONTENT_TYPE};
use crate::config::GatewayConfig;
use crate::container::{Container, UpdateReturnUrlsContainer};
use crate::crypto::Signable;
use crate::Result;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

/// `PUT /payment/{shopId}/{orderId}`: replaces the return URLs of a transaction
#[derive(Debug, Clone)]
pub struct RequestUpdateReturnUrls {
    config: GatewayConfig,
    client: Client,
}

impl RequestUpdateReturnUrls {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = config.http_client()?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: GatewayConfig, client: Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl Transfer for RequestUpdateReturnUrls {
    async fn send_request(&self, container: Container<'_>) -> Result<GatewayResponse> {
        let Container::UpdateReturnUrls(container) = container else {
            return Err(wrong_container("UpdateReturnUrlsContainer", container));
        };

        let url = self
            .config
            .endpoint(["payment", container.shop_id(), container.order_id()])?;
        let sign = container.signature();
        let body = form_body([
            ("returnUrl", container.return_url()),
            ("negativeReturnUrl", container.negative_return_url()),
            ("sign", sign.as_str()),
        ]);

        tracing::debug!(
            method = "PUT",
            order_id = container.order_id(),
            "Updating return URLs"
        );
        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        GatewayResponse::from_response(response).await
    }

    /// Success carries no body: only 204 counts
    fn is_error(&self, response: &GatewayResponse) -> bool {
        response.status != 204
    }
}
