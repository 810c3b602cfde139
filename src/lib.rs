//! # cashbill - CashBill payment gateway client
//!
//! Client SDK for the CashBill online payment gateway. The library builds
//! signed request containers, sends them to the REST API, decodes the
//! answers into typed results and validates the notifications the gateway
//! posts back to the shop.
//!
//! ```no_run
//! use cashbill::{Cashbill, Currency, GatewayConfig, PaymentContainer};
//! use rust_decimal::Decimal;
//!
//! # async fn run() -> cashbill::Result<()> {
//! let gateway = Cashbill::new(GatewayConfig::test())?;
//! let container = PaymentContainer::new(
//!     "secret phrase",
//!     "shop.example",
//!     "Order #1",
//!     Decimal::new(1999, 2),
//!     Currency::new("PLN")?,
//! );
//!
//! if let Some(payment) = gateway.generate_payment(&container).await?.into_value() {
//!     println!("redirect the payer to {}", payment.redirect_url());
//! }
//! # Ok(())
//! # }
//! ```

pub mod channel;
pub mod config;
pub mod container;
pub mod crypto;
pub mod currency;
pub mod error;
pub mod gateway;
pub mod notification;
pub mod payment;
pub mod request;
pub mod transaction;
pub mod types;

// Re-exports for convenience
pub use channel::{Channel, ChannelCollection};
pub use config::{GatewayConfig, Mode};
pub use container::{
    ChannelsContainer, Container, NotificationContainer, PaymentChannel, PaymentContainer,
    SecretPhrase, TransactionInfoContainer, UpdateReturnUrlsContainer,
};
pub use crypto::{Signable, SignatureScheme};
pub use currency::Currency;
pub use error::{CashbillError, Result};
pub use gateway::{Cashbill, GatewayOutcome};
pub use notification::{notification_acknowledgement, PaymentNotification};
pub use payment::Payment;
pub use request::{GatewayResponse, Transfer};
pub use transaction::{TransactionInfo, TransactionStatus};
pub use types::{Amount, Language, PersonalData};

// Feature-gated framework support
#[cfg(feature = "axum")]
pub mod axum;

/// Current version of the cashbill library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
