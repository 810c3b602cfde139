use super::{wrong_container, GatewayResponse, Transfer};
use crate::config::GatewayConfig;
use crate::container::{Container, TransactionInfoContainer};
use crate::crypto::Signable;
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// `GET /payment/{shopId}/{orderId}?sign=...`: current state of a transaction
#[derive(Debug, Clone)]
pub struct RequestTransactionInfo {
    config: GatewayConfig,
    client: Client,
}

impl RequestTransactionInfo {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = config.http_client()?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: GatewayConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Signed status URL for `container`
    pub fn request_url(&self, container: &TransactionInfoContainer) -> Result<Url> {
        let mut url = self
            .config
            .endpoint(["payment", container.shop_id(), container.order_id()])?;
        url.query_pairs_mut()
            .append_pair("sign", &container.signature());
        Ok(url)
    }
}

#[async_trait]
impl Transfer for RequestTransactionInfo {
    async fn send_request(&self, container: Container<'_>) -> Result<GatewayResponse> {
        let Container::TransactionInfo(container) = container else {
            return Err(wrong_container("TransactionInfoContainer", container));
        };

        let url = self.request_url(container)?;
        tracing::debug!(
            method = "GET",
            order_id = container.order_id(),
            "Requesting transaction info"
        );
        let response = self.client.get(url).send().await?;

        GatewayResponse::from_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_carries_signature() {
        let request = RequestTransactionInfo::new(GatewayConfig::test()).unwrap();
        let container = TransactionInfoContainer::new("secret", "shop1", "TEST_abc");
        let url = request.request_url(&container).unwrap();

        assert_eq!(
            url.as_str(),
            format!(
                "https://pay.cashbill.pl/testws/rest/payment/shop1/TEST_abc?sign={}",
                container.signature()
            )
        );
    }
}
