//! Example: create a payment in the test environment and check its state
//!
//! Reads the shop credentials from `CASHBILL_SHOP_ID` and
//! `CASHBILL_SECRET_PHRASE`. Set `CASHBILL_TEST_MODE=1` to talk to the
//! test gateway.

use rust_decimal::Decimal;
use std::str::FromStr;

use cashbill::{
    Cashbill, ChannelsContainer, Currency, GatewayConfig, Language, PaymentContainer,
    PersonalData, TransactionInfoContainer,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let shop_id = std::env::var("CASHBILL_SHOP_ID").unwrap_or_else(|_| "shop.example".into());
    let secret = std::env::var("CASHBILL_SECRET_PHRASE").unwrap_or_else(|_| "secret".into());

    let config = GatewayConfig::from_env();
    config.validate()?;
    let gateway = Cashbill::new(config)?.with_strict_requirements_channel(false);

    // List channels first so the payer can pick one
    let channels = gateway
        .payment_channels(&ChannelsContainer::new(shop_id.as_str()).with_language(Language::En))
        .await?;
    if let Some(channels) = channels.value() {
        println!("Available channels:");
        for channel in channels {
            println!("   {} - {}", channel.id(), channel.name());
        }
    }

    let container = PaymentContainer::new(
        secret.as_str(),
        shop_id.as_str(),
        "Order #1",
        Decimal::from_str("19.99")?,
        Currency::new("PLN")?,
    )
    .with_description("Demo order")
    .with_return_url("https://shop.example/return")
    .with_negative_return_url("https://shop.example/failed")
    .with_language(Language::Pl)
    .with_personal_data(
        PersonalData::new()
            .with_first_name("Jan")
            .with_surname("Kowalski")
            .with_email("jan@example.com"),
    );

    let outcome = gateway.generate_payment(&container).await?;
    let Some(payment) = outcome.value() else {
        eprintln!(
            "Gateway refused the payment ({}): {}",
            outcome.response().status,
            outcome.response().body
        );
        return Ok(());
    };

    println!("Created {}", payment.order_id());
    println!("Redirect the payer to {}", payment.redirect_url());

    let updated = payment
        .update_return_urls("https://shop.example/thanks", "https://shop.example/sorry")
        .await?;
    println!("Return URLs updated: {}", updated.is_success());

    let info = gateway
        .transaction_info(&TransactionInfoContainer::new(
            secret.as_str(),
            shop_id.as_str(),
            payment.order_id(),
        ))
        .await?;
    if let Some(info) = info.value() {
        println!("Status: {} ({})", info.status(), info.status().description());
    }

    Ok(())
}
