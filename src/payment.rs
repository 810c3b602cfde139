//! A transaction created by the gateway

use crate::config::GatewayConfig;
use crate::container::{SecretPhrase, UpdateReturnUrlsContainer};
use crate::gateway::{log_gateway_error, GatewayOutcome};
use crate::request::{RequestUpdateReturnUrls, Transfer};
use crate::Result;
use reqwest::Client;

/// Newly created transaction.
///
/// Keeps the shop credentials it was created with, so the return URLs can
/// be changed later without supplying them again.
#[derive(Debug, Clone)]
pub struct Payment {
    secret_phrase: SecretPhrase,
    shop_id: String,
    order_id: String,
    redirect_url: String,
    config: GatewayConfig,
    client: Option<Client>,
}

impl Payment {
    pub fn new(
        secret_phrase: impl Into<SecretPhrase>,
        shop_id: impl Into<String>,
        order_id: impl Into<String>,
        redirect_url: impl Into<String>,
    ) -> Self {
        Self {
            secret_phrase: secret_phrase.into(),
            shop_id: shop_id.into(),
            order_id: order_id.into(),
            redirect_url: redirect_url.into(),
            config: GatewayConfig::default(),
            client: None,
        }
    }

    /// Gateway environment follow-up requests go to
    pub fn with_config(mut self, config: GatewayConfig) -> Self {
        self.config = config;
        self
    }

    /// HTTP client reused for follow-up requests
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Where the payer has to be sent to complete the payment
    pub fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    pub fn shop_id(&self) -> &str {
        &self.shop_id
    }

    pub fn secret_phrase(&self) -> &str {
        self.secret_phrase.expose()
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Signed container replacing this transaction's return URLs
    pub fn update_return_urls_container(
        &self,
        success_url: impl Into<String>,
        failure_url: impl Into<String>,
    ) -> UpdateReturnUrlsContainer {
        UpdateReturnUrlsContainer::new(
            self.secret_phrase.clone(),
            self.shop_id.as_str(),
            self.order_id.as_str(),
            success_url,
            failure_url,
        )
    }

    /// Replace the success and failure return URLs
    pub async fn update_return_urls(
        &self,
        success_url: impl Into<String>,
        failure_url: impl Into<String>,
    ) -> Result<GatewayOutcome<()>> {
        let request = match &self.client {
            Some(client) => RequestUpdateReturnUrls::with_client(self.config.clone(), client.clone()),
            None => RequestUpdateReturnUrls::new(self.config.clone())?,
        };
        self.update_return_urls_with(success_url, failure_url, &request)
            .await
    }

    /// Replace the return URLs through a caller-supplied request
    pub async fn update_return_urls_with(
        &self,
        success_url: impl Into<String>,
        failure_url: impl Into<String>,
        request: &dyn Transfer,
    ) -> Result<GatewayOutcome<()>> {
        let container = self.update_return_urls_container(success_url, failure_url);
        let response = request.send_request((&container).into()).await?;
        if request.is_error(&response) {
            log_gateway_error("update_return_urls", &response);
            return Ok(GatewayOutcome::failure(response));
        }
        Ok(GatewayOutcome::success((), response))
    }
}
