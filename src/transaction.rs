//! Transaction state as reported by the gateway

use crate::types::{Amount, PersonalData};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    PreStart,
    Start,
    NegativeAuthorization,
    Abort,
    Fraud,
    PositiveAuthorization,
    PositiveFinish,
    NegativeFinish,
    TimeExceeded,
    CriticalError,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 10] = [
        Self::PreStart,
        Self::Start,
        Self::NegativeAuthorization,
        Self::Abort,
        Self::Fraud,
        Self::PositiveAuthorization,
        Self::PositiveFinish,
        Self::NegativeFinish,
        Self::TimeExceeded,
        Self::CriticalError,
    ];

    /// `PositiveFinish` is the only state meaning the payer has paid
    pub fn is_successful(&self) -> bool {
        *self == Self::PositiveFinish
    }

    /// Terminal states can no longer change
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            Self::PreStart | Self::Start | Self::PositiveAuthorization
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreStart => "PreStart",
            Self::Start => "Start",
            Self::NegativeAuthorization => "NegativeAuthorization",
            Self::Abort => "Abort",
            Self::Fraud => "Fraud",
            Self::PositiveAuthorization => "PositiveAuthorization",
            Self::PositiveFinish => "PositiveFinish",
            Self::NegativeFinish => "NegativeFinish",
            Self::TimeExceeded => "TimeExceeded",
            Self::CriticalError => "CriticalError",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::PreStart => "Payment started, the payer has not chosen a payment channel yet",
            Self::Start => "Payment started, the payer has not paid yet",
            Self::NegativeAuthorization => "The payment operator refused to authorize the payment",
            Self::Abort => "The payer abandoned the payment",
            Self::Fraud => "The payment operator classified the transaction as fraud and stopped it",
            Self::PositiveAuthorization => {
                "Preliminarily authorized by the payment operator, final state pending"
            }
            Self::PositiveFinish => "The payment operator confirmed the payment",
            Self::NegativeFinish => "The payment operator did not confirm the payment",
            Self::TimeExceeded => "The time for completing the transaction has run out",
            Self::CriticalError => "Critical error",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transaction details returned by a status query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    #[serde(rename = "id")]
    order_id: String,
    status: TransactionStatus,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    additional_data: Option<String>,
    #[serde(default)]
    payment_channel: Option<String>,
    amount: Amount,
    requested_amount: Amount,
    #[serde(default)]
    personal_data: Option<PersonalData>,
}

impl TransactionInfo {
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn is_successful(&self) -> bool {
        self.status.is_successful()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn additional_data(&self) -> Option<&str> {
        self.additional_data.as_deref()
    }

    pub fn payment_channel(&self) -> Option<&str> {
        self.payment_channel.as_deref()
    }

    /// Amount actually paid
    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    /// Amount the shop asked for
    pub fn requested_amount(&self) -> &Amount {
        &self.requested_amount
    }

    pub fn personal_data(&self) -> Option<&PersonalData> {
        self.personal_data.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn info_with_status(status: TransactionStatus) -> TransactionInfo {
        serde_json::from_value(json!({
            "id": "TEST_abc",
            "status": status.as_str(),
            "title": "Order #1",
            "amount": {"value": 10.0, "currencyCode": "PLN"},
            "requestedAmount": {"value": 10.0, "currencyCode": "PLN"}
        }))
        .unwrap()
    }

    #[test]
    fn test_only_positive_finish_is_successful() {
        for status in TransactionStatus::ALL {
            assert_eq!(
                info_with_status(status).is_successful(),
                status == TransactionStatus::PositiveFinish,
                "{}",
                status
            );
        }
    }

    #[test]
    fn test_terminal_states() {
        let open: Vec<TransactionStatus> = TransactionStatus::ALL
            .into_iter()
            .filter(|status| !status.is_terminal())
            .collect();
        assert_eq!(
            open,
            [
                TransactionStatus::PreStart,
                TransactionStatus::Start,
                TransactionStatus::PositiveAuthorization
            ]
        );
    }

    #[test]
    fn test_full_transaction_json() {
        let info: TransactionInfo = serde_json::from_value(json!({
            "id": "TEST_abc",
            "paymentChannel": "blik",
            "amount": {"value": 9.5, "currencyCode": "PLN"},
            "requestedAmount": {"value": "10.00", "currencyCode": "PLN"},
            "title": "Order #1",
            "description": "desc",
            "personalData": {
                "firstName": "Jan",
                "surname": "Kowalski",
                "email": "jan@example.com",
                "country": null,
                "city": "Warszawa"
            },
            "additionalData": "extra",
            "status": "PositiveFinish"
        }))
        .unwrap();

        assert_eq!(info.order_id(), "TEST_abc");
        assert_eq!(info.payment_channel(), Some("blik"));
        assert_eq!(info.amount().value_string(), "9.5");
        assert_eq!(info.requested_amount().value_string(), "10");
        assert_eq!(info.description(), Some("desc"));
        assert_eq!(info.additional_data(), Some("extra"));
        let personal = info.personal_data().unwrap();
        assert_eq!(personal.email.as_deref(), Some("jan@example.com"));
        assert_eq!(personal.country, None);
        assert!(info.is_successful());
        assert!(info.status().is_terminal());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result: std::result::Result<TransactionInfo, _> = serde_json::from_value(json!({
            "id": "x",
            "status": "Paid",
            "title": "t",
            "amount": {"value": 1, "currencyCode": "PLN"},
            "requestedAmount": {"value": 1, "currencyCode": "PLN"}
        }));
        assert!(result.is_err());
    }
}
