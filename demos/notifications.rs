use notification_stream_rs::{
    Audience, ConnectionStatusKind, LocalNotification, NotificationClient, NotificationLevel,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Reads NOTIFICATION_STREAM_URL / NOTIFICATION_ACCESS_TOKEN from .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let client = NotificationClient::from_env()?;
    println!("Listening on {}", client.endpoint());

    let status = client.subscribe_connection_status(|status| match status.status {
        ConnectionStatusKind::Connected => println!("Connected"),
        ConnectionStatusKind::Failed => println!(
            "Gave up: {}",
            status.message.as_deref().unwrap_or("unknown error")
        ),
    })?;

    let stock = client.subscribe_stock_alerts(|alert| {
        let level = if alert.is_out_of_stock() {
            NotificationLevel::Error
        } else {
            NotificationLevel::Warning
        };
        let local = LocalNotification::new(
            "Stock alert",
            format!(
                "{} has {} left",
                alert.product_name.as_deref().unwrap_or("product"),
                alert.current_stock
            ),
            level,
        );
        println!("[{:?}] {}: {}", local.level, local.title, local.message);
    })?;

    let orders = client.subscribe_order_notifications(Audience::Everyone, |order| {
        println!("Order {} is now {}", order.order_id, order.status);
    })?;

    let payments = client.subscribe_payment_notifications(Audience::Everyone, |payment| {
        println!(
            "Payment {} for order {}: {}",
            payment.payment_id, payment.order_id, payment.status
        );
    })?;

    let system = client.subscribe_system_notifications(Audience::Everyone, |notice| {
        println!("[{:?}] {}", notice.level, notice.message);
    })?;

    tokio::signal::ctrl_c().await?;

    println!("Disconnecting...");
    for subscription in [status, stock, orders, payments, system] {
        subscription.unsubscribe();
    }
    println!("Connected: {}", client.is_connected());

    Ok(())
}
