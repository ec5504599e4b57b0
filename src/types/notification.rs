//! Typed payloads for the reserved event types.
//!
//! Every field the backend may omit is optional so that a partially filled
//! payload still decodes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::constants::connection_status;

/// Low-stock or out-of-stock alert for a product at a branch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockAlert {
    pub product_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    pub current_stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl StockAlert {
    /// True when the product is completely out of stock.
    pub fn is_out_of_stock(&self) -> bool {
        self.current_stock <= 0
    }

    /// True when stock is at or below the configured minimum.
    pub fn is_below_minimum(&self) -> bool {
        match self.min_stock {
            Some(min) => self.current_stock <= min,
            None => self.is_out_of_stock(),
        }
    }
}

/// Order status change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderNotification {
    pub order_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Payment status change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentNotification {
    pub payment_id: i64,
    pub order_id: i64,
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Importance of a system or local notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// Broadcast from the platform to everyone or to a role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemNotification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub message: String,
    #[serde(default)]
    pub level: NotificationLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Status carried by the synthetic `connection` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatusKind {
    Connected,
    Failed,
}

impl ConnectionStatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => connection_status::CONNECTED,
            Self::Failed => connection_status::FAILED,
        }
    }
}

/// Payload of the synthetic `connection` event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionStatus {
    pub status: ConnectionStatusKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConnectionStatus {
    pub fn connected() -> Self {
        Self {
            status: ConnectionStatusKind::Connected,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: ConnectionStatusKind::Failed,
            message: Some(message.into()),
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        let mut value = serde_json::json!({ "status": self.status.as_str() });
        if let Some(message) = &self.message {
            value["message"] = serde_json::Value::String(message.clone());
        }
        value
    }
}

/// Notification created on the client without involving the server,
/// e.g. to confirm a user action in the same feed as pushed events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocalNotification {
    /// Milliseconds since the Unix epoch at creation time
    pub id: i64,
    pub title: String,
    pub message: String,
    pub level: NotificationLevel,
    pub timestamp: DateTime<Utc>,
}

impl LocalNotification {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        level: NotificationLevel,
    ) -> Self {
        let timestamp = Utc::now();
        Self {
            id: timestamp.timestamp_millis(),
            title: title.into(),
            message: message.into(),
            level,
            timestamp,
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NotificationLevel::Info)
    }
}
