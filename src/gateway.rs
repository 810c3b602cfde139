//! High-level entry point orchestrating containers, requests and results

use crate::channel::{Channel, ChannelCollection};
use crate::config::GatewayConfig;
use crate::container::{
    ChannelsContainer, NotificationContainer, PaymentContainer, TransactionInfoContainer,
};
use crate::crypto::Signable;
use crate::notification::PaymentNotification;
use crate::payment::Payment;
use crate::request::{
    GatewayResponse, RequestPayment, RequestPaymentChannels, RequestTransactionInfo, Transfer,
};
use crate::transaction::TransactionInfo;
use crate::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

/// Result of one gateway call: the typed value on success, and always the
/// raw response for diagnostics.
#[derive(Debug, Clone)]
pub struct GatewayOutcome<T> {
    value: Option<T>,
    response: GatewayResponse,
}

impl<T> GatewayOutcome<T> {
    pub fn success(value: T, response: GatewayResponse) -> Self {
        Self {
            value: Some(value),
            response,
        }
    }

    pub fn failure(response: GatewayResponse) -> Self {
        Self {
            value: None,
            response,
        }
    }

    pub fn is_success(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    pub fn response(&self) -> &GatewayResponse {
        &self.response
    }

    pub fn into_parts(self) -> (Option<T>, GatewayResponse) {
        (self.value, self.response)
    }
}

/// Body of a successful payment creation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedPayment {
    id: String,
    redirect_url: String,
}

pub(crate) fn log_gateway_error(operation: &str, response: &GatewayResponse) {
    warn!(
        operation,
        status = response.status,
        error_message = response.error_message().as_deref().unwrap_or(""),
        "Gateway reported an error"
    );
}

/// CashBill gateway client
#[derive(Debug, Clone)]
pub struct Cashbill {
    config: GatewayConfig,
    client: Client,
    strict_requirements_channel: bool,
}

impl Cashbill {
    /// Create a client for the given configuration
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let client = config.http_client()?;
        Ok(Self {
            config,
            client,
            strict_requirements_channel: false,
        })
    }

    /// Verify channel currency and email requirements before creating payments
    pub fn with_strict_requirements_channel(mut self, strict: bool) -> Self {
        self.strict_requirements_channel = strict;
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn is_test_mode(&self) -> bool {
        self.config.is_test_mode()
    }

    /// Create a new transaction
    pub async fn generate_payment(
        &self,
        container: &PaymentContainer,
    ) -> Result<GatewayOutcome<Payment>> {
        let request = RequestPayment::with_client(self.config.clone(), self.client.clone())
            .with_strict_requirements_channel(self.strict_requirements_channel);
        self.generate_payment_with(container, &request).await
    }

    /// Create a new transaction through a caller-supplied request
    pub async fn generate_payment_with(
        &self,
        container: &PaymentContainer,
        request: &dyn Transfer,
    ) -> Result<GatewayOutcome<Payment>> {
        let response = request.send_request(container.into()).await?;
        if request.is_error(&response) {
            log_gateway_error("generate_payment", &response);
            return Ok(GatewayOutcome::failure(response));
        }

        let created: CreatedPayment = response.json()?;
        info!(order_id = %created.id, "Payment created");

        let payment = Payment::new(
            container.secret_phrase(),
            container.shop_id(),
            created.id,
            created.redirect_url,
        )
        .with_config(self.config.clone())
        .with_client(self.client.clone());

        Ok(GatewayOutcome::success(payment, response))
    }

    /// Fetch the current state of a transaction
    pub async fn transaction_info(
        &self,
        container: &TransactionInfoContainer,
    ) -> Result<GatewayOutcome<TransactionInfo>> {
        let request = RequestTransactionInfo::with_client(self.config.clone(), self.client.clone());
        self.transaction_info_with(container, &request).await
    }

    /// Fetch the current state of a transaction through a caller-supplied request
    pub async fn transaction_info_with(
        &self,
        container: &TransactionInfoContainer,
        request: &dyn Transfer,
    ) -> Result<GatewayOutcome<TransactionInfo>> {
        let response = request.send_request(container.into()).await?;
        if request.is_error(&response) {
            log_gateway_error("transaction_info", &response);
            return Ok(GatewayOutcome::failure(response));
        }

        let info: TransactionInfo = response.json()?;
        Ok(GatewayOutcome::success(info, response))
    }

    /// List the payment channels available to the shop
    pub async fn payment_channels(
        &self,
        container: &ChannelsContainer,
    ) -> Result<GatewayOutcome<ChannelCollection>> {
        let request = RequestPaymentChannels::with_client(self.config.clone(), self.client.clone());
        self.payment_channels_with(container, &request).await
    }

    /// List the payment channels through a caller-supplied request
    pub async fn payment_channels_with(
        &self,
        container: &ChannelsContainer,
        request: &dyn Transfer,
    ) -> Result<GatewayOutcome<ChannelCollection>> {
        let response = request.send_request(container.into()).await?;
        if request.is_error(&response) {
            log_gateway_error("payment_channels", &response);
            return Ok(GatewayOutcome::failure(response));
        }

        let channels: Vec<Channel> = response.json()?;
        let collection: ChannelCollection = channels.into_iter().collect();
        Ok(GatewayOutcome::success(collection, response))
    }

    /// Validate an inbound notification.
    ///
    /// Returns `None` when the signature does not match; such a payload must
    /// not be trusted. The gateway still expects the acknowledgement from
    /// [`notification_acknowledgement`](crate::notification::notification_acknowledgement)
    /// in either case.
    pub fn payment_notification(
        &self,
        container: NotificationContainer,
    ) -> Option<PaymentNotification> {
        let notification = PaymentNotification::new(container);
        if !notification.check_sign() {
            warn!(cmd = notification.cmd(), "Rejected notification with invalid sign");
            return None;
        }
        Some(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Container;
    use crate::crypto::SignatureScheme;
    use crate::currency::Currency;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::sync::Mutex;

    /// Answers every request with a canned response and records what it saw
    struct CannedTransfer {
        response: GatewayResponse,
        seen: Mutex<Vec<&'static str>>,
    }

    impl CannedTransfer {
        fn new(status: u16, body: &str) -> Self {
            Self {
                response: GatewayResponse::new(status, body),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transfer for CannedTransfer {
        async fn send_request(&self, container: Container<'_>) -> Result<GatewayResponse> {
            self.seen.lock().unwrap().push(container.kind());
            Ok(self.response.clone())
        }
    }

    fn gateway() -> Cashbill {
        Cashbill::new(GatewayConfig::test()).unwrap()
    }

    fn payment_container() -> PaymentContainer {
        PaymentContainer::new(
            "s3cr3t",
            "shop1",
            "Order #1",
            Decimal::new(1000, 2),
            Currency::new("PLN").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_generate_payment_success() {
        let transfer = CannedTransfer::new(
            200,
            r#"{"id":"TEST_abc","redirectUrl":"https://pay.example/TEST_abc"}"#,
        );
        let outcome = gateway()
            .generate_payment_with(&payment_container(), &transfer)
            .await
            .unwrap();

        let payment = outcome.value().unwrap();
        assert_eq!(payment.order_id(), "TEST_abc");
        assert_eq!(payment.redirect_url(), "https://pay.example/TEST_abc");
        assert_eq!(payment.shop_id(), "shop1");
        assert_eq!(payment.secret_phrase(), "s3cr3t");
        assert_eq!(outcome.response().status, 200);
        assert_eq!(*transfer.seen.lock().unwrap(), ["PaymentContainer"]);
    }

    #[tokio::test]
    async fn test_generate_payment_error_message_is_failure() {
        let transfer = CannedTransfer::new(200, r#"{"errorMessage":"Invalid sign"}"#);
        let outcome = gateway()
            .generate_payment_with(&payment_container(), &transfer)
            .await
            .unwrap();

        assert!(!outcome.is_success());
        assert_eq!(
            outcome.response().error_message(),
            Some("Invalid sign".to_string())
        );
    }

    #[tokio::test]
    async fn test_transaction_info_server_error_is_failure() {
        let transfer = CannedTransfer::new(500, "");
        let container = TransactionInfoContainer::new("s", "shop1", "TEST_abc");
        let outcome = gateway()
            .transaction_info_with(&container, &transfer)
            .await
            .unwrap();

        assert!(outcome.into_value().is_none());
    }

    #[tokio::test]
    async fn test_payment_channels_collection() {
        let transfer = CannedTransfer::new(
            200,
            r#"[
                {"id":"blik","name":"BLIK","availableCurrencies":["PLN"],"description":"BLIK","logoUrl":null},
                {"id":"card","name":"Card","availableCurrencies":["PLN","EUR"],"description":null,"logoUrl":"https://x/card.png"}
            ]"#,
        );
        let outcome = gateway()
            .payment_channels_with(&ChannelsContainer::new("shop1"), &transfer)
            .await
            .unwrap();

        let mut channels = outcome.into_value().unwrap();
        assert_eq!(channels.len(), 2);
        let ids: Vec<&str> = channels.iter().map(Channel::id).collect();
        assert_eq!(ids, ["blik", "card"]);

        channels.add(Channel::new("blik", "BLIK 2", vec![Currency::new("PLN").unwrap()]));
        assert_eq!(channels.len(), 2);
        assert_eq!(channels.get("blik").unwrap().name(), "BLIK 2");
    }

    #[tokio::test]
    async fn test_mismatched_transfer_is_invalid_argument() {
        let request = RequestTransactionInfo::new(GatewayConfig::test()).unwrap();
        let result = gateway()
            .generate_payment_with(&payment_container(), &request)
            .await;
        assert!(matches!(
            result,
            Err(crate::CashbillError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_payment_notification() {
        let sign = SignatureScheme::Md5.digest_hex("transactionStatusChangedTEST_abcsecret");
        let valid = NotificationContainer::new("secret", "transactionStatusChanged", "TEST_abc", sign);
        let notification = gateway().payment_notification(valid).unwrap();
        assert_eq!(notification.order_id().unwrap(), "TEST_abc");

        let forged =
            NotificationContainer::new("secret", "transactionStatusChanged", "TEST_abc", "0".repeat(32));
        assert!(gateway().payment_notification(forged).is_none());
    }
}
