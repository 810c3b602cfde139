//! Validation of inbound payment notifications
//!
//! The gateway notifies the shop about status changes by calling a
//! configured URL with `cmd`, `args` and `sign`. The shop must answer with
//! HTTP 200 and the body `OK` whether or not the signature checks out, and
//! must only trust the payload after [`PaymentNotification::check_sign`].

use crate::container::NotificationContainer;
use crate::crypto::{signatures_match, Signable};
use crate::{CashbillError, Result};

/// Status code of the acknowledgement expected by the gateway
pub const ACKNOWLEDGEMENT_STATUS: u16 = 200;

/// Body of the acknowledgement expected by the gateway
pub const ACKNOWLEDGEMENT_BODY: &str = "OK";

/// Command sent when a transaction changes state
pub const TRANSACTION_STATUS_CHANGED: &str = "transactionStatusChanged";

/// Status and body to answer every notification with
pub fn notification_acknowledgement() -> (u16, &'static str) {
    (ACKNOWLEDGEMENT_STATUS, ACKNOWLEDGEMENT_BODY)
}

/// An inbound notification together with its verification
#[derive(Debug, Clone)]
pub struct PaymentNotification {
    container: NotificationContainer,
}

impl PaymentNotification {
    pub fn new(container: NotificationContainer) -> Self {
        Self { container }
    }

    /// Whether the supplied sign matches MD5(cmd + args + secret phrase)
    pub fn check_sign(&self) -> bool {
        signatures_match(&self.container.signature(), self.container.sign())
    }

    /// First argument, which is the order id by protocol convention
    pub fn order_id(&self) -> Result<&str> {
        match self.container.raw_args().split(',').next() {
            Some(order_id) if !order_id.is_empty() => Ok(order_id),
            _ => Err(CashbillError::MissingOrderId),
        }
    }

    pub fn cmd(&self) -> &str {
        self.container.cmd()
    }

    pub fn args(&self) -> Vec<&str> {
        self.container.args()
    }

    /// Whether this notification reports a transaction state change
    pub fn is_status_change(&self) -> bool {
        self.cmd() == TRANSACTION_STATUS_CHANGED
    }

    pub fn container(&self) -> &NotificationContainer {
        &self.container
    }

    pub fn into_container(self) -> NotificationContainer {
        self.container
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::SignatureScheme;

    const SECRET: &str = "secret";
    const CMD: &str = "transactionStatusChanged";
    const ARGS: &str = "TEST_abc123,extra";

    fn valid_sign() -> String {
        SignatureScheme::Md5.digest_hex(&format!("{}{}{}", CMD, ARGS, SECRET))
    }

    fn notification(cmd: &str, args: &str, sign: &str) -> PaymentNotification {
        PaymentNotification::new(NotificationContainer::new(SECRET, cmd, args, sign))
    }

    #[test]
    fn test_valid_sign() {
        let notification = notification(CMD, ARGS, &valid_sign());
        assert!(notification.check_sign());
        assert_eq!(notification.order_id().unwrap(), "TEST_abc123");
        assert!(notification.is_status_change());
        assert_eq!(notification.args(), ["TEST_abc123", "extra"]);
    }

    #[test]
    fn test_single_character_mutations_are_rejected() {
        let sign = valid_sign();

        for index in 0..sign.len() {
            let mut mutated: Vec<u8> = sign.clone().into_bytes();
            mutated[index] = if mutated[index] == b'0' { b'1' } else { b'0' };
            let mutated = String::from_utf8(mutated).unwrap();
            assert!(!notification(CMD, ARGS, &mutated).check_sign());
        }

        assert!(!notification("transactionStatusChangeD", ARGS, &sign).check_sign());
        assert!(!notification(CMD, "TEST_abc124,extra", &sign).check_sign());
        assert!(!notification(CMD, "TEST_abc123;extra", &sign).check_sign());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let container = NotificationContainer::new("other", CMD, ARGS, valid_sign());
        assert!(!PaymentNotification::new(container).check_sign());
    }

    #[test]
    fn test_empty_args_has_no_order_id() {
        let empty = notification(CMD, "", "");
        assert!(matches!(empty.order_id(), Err(CashbillError::MissingOrderId)));
        assert!(matches!(
            notification(CMD, ",x", "").order_id(),
            Err(CashbillError::MissingOrderId)
        ));
    }

    #[test]
    fn test_acknowledgement() {
        assert_eq!(notification_acknowledgement(), (200, "OK"));
    }
}
