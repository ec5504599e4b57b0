pub mod constants;
pub mod error;
pub mod message;
pub mod notification;

pub use constants::*;
pub use error::{NotificationError, Result};
pub use message::InboundEvent;
pub use notification::{
    ConnectionStatus, ConnectionStatusKind, LocalNotification, NotificationLevel, OrderNotification,
    PaymentNotification, StockAlert, SystemNotification,
};
