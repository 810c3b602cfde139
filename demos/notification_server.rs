//! Example: receive payment notifications with Axum

use cashbill::{axum::notification_router, notification::TRANSACTION_STATUS_CHANGED};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let secret = std::env::var("CASHBILL_SECRET_PHRASE").unwrap_or_else(|_| "secret".into());

    let app = notification_router("/cashbill/notify", secret, |notification| {
        if notification.cmd() != TRANSACTION_STATUS_CHANGED {
            return;
        }
        match notification.order_id() {
            Ok(order_id) => println!("Transaction {} changed state", order_id),
            Err(err) => eprintln!("Notification without order id: {}", err),
        }
    });

    let listener = tokio::net::TcpListener::bind("0.0.0.0:4021").await?;
    println!("Listening for notifications on http://0.0.0.0:4021/cashbill/notify");

    axum::serve(listener, app).await?;

    Ok(())
}
