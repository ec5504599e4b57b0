//! # Notification Stream
//!
//! A Server-Sent Events client for storefront notifications: stock alerts,
//! order and payment updates, and system announcements.
//!
//! One [`NotificationClient`] holds a single stream connection and fans typed
//! events out to subscribers. The connection opens with the first
//! subscription, retries with a fixed delay up to a capped number of attempts,
//! and closes when the last subscription is removed.
//!
//! ## Example
//!
//! ```no_run
//! use notification_stream_rs::{Audience, NotificationClient, NotificationClientOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NotificationClient::new(
//!         "https://shop.example.com/stream",
//!         NotificationClientOptions::default(),
//!     )?;
//!
//!     let alerts = client.subscribe_stock_alerts(|alert| {
//!         println!("product {} has {} left", alert.product_id, alert.current_stock);
//!     })?;
//!     let orders = client.subscribe_order_notifications(Audience::User(42), |order| {
//!         println!("order {} is now {}", order.order_id, order.status);
//!     })?;
//!
//!     tokio::signal::ctrl_c().await?;
//!     alerts.unsubscribe();
//!     orders.unsubscribe();
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod infrastructure;
pub mod messaging;
pub mod transport;
pub mod types;

pub use client::{
    ConnectionState, NotificationClient, NotificationClientBuilder, NotificationClientOptions,
    Subscription,
};
pub use messaging::{Audience, EventType, Handler, HandlerId};
pub use transport::{EventStream, HttpTransport, SseEvent, Transport};
pub use types::{
    ConnectionStatus, ConnectionStatusKind, InboundEvent, LocalNotification, NotificationError,
    NotificationLevel, OrderNotification, PaymentNotification, Result, StockAlert,
    SystemNotification,
};
