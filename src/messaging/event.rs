use crate::types::constants::{audience_prefixes, event_types};
use serde::{Deserialize, Serialize};

/// Type-safe event type names
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    /// Untagged stream messages
    Message,

    /// Synthetic connection lifecycle events
    Connection,

    /// Product stock alerts
    StockAlert,

    /// Order status changes
    OrderNotification,

    /// Payment status changes
    PaymentNotification,

    /// Platform-wide announcements
    SystemNotification,

    /// Any other tag, including audience-scoped ones like `user_42`
    Custom(String),
}

impl EventType {
    /// Parse a string into an EventType
    pub fn parse(s: &str) -> Self {
        match s {
            event_types::MESSAGE => Self::Message,
            event_types::CONNECTION => Self::Connection,
            event_types::STOCK_ALERT => Self::StockAlert,
            event_types::ORDER_NOTIFICATION => Self::OrderNotification,
            event_types::PAYMENT_NOTIFICATION => Self::PaymentNotification,
            event_types::SYSTEM_NOTIFICATION => Self::SystemNotification,
            _ => Self::Custom(s.to_string()),
        }
    }

    /// Convert event type to string representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Message => event_types::MESSAGE,
            Self::Connection => event_types::CONNECTION,
            Self::StockAlert => event_types::STOCK_ALERT,
            Self::OrderNotification => event_types::ORDER_NOTIFICATION,
            Self::PaymentNotification => event_types::PAYMENT_NOTIFICATION,
            Self::SystemNotification => event_types::SYSTEM_NOTIFICATION,
            Self::Custom(s) => s,
        }
    }

    /// Events addressed to a single user
    pub fn user(user_id: u64) -> Self {
        Self::Custom(format!("{}{}", audience_prefixes::USER, user_id))
    }

    /// Events addressed to a branch
    pub fn branch(branch_id: u64) -> Self {
        Self::Custom(format!("{}{}", audience_prefixes::BRANCH, branch_id))
    }

    /// Events addressed to every user holding a role
    pub fn role(role: &str) -> Self {
        Self::Custom(format!("{}{}", audience_prefixes::ROLE, role))
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().trim().is_empty()
    }
}

impl From<&str> for EventType {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for EventType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<EventType> for String {
    fn from(event: EventType) -> Self {
        event.as_str().to_string()
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who a notification is addressed to.
///
/// The backend publishes scoped copies of order, payment and system
/// notifications under tags such as `user_42`, `branch_3` or `role_admin`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Audience {
    /// The unscoped reserved event type
    #[default]
    Everyone,
    User(u64),
    Branch(u64),
    Role(String),
}

impl Audience {
    /// Resolve the event type to subscribe to, given the unscoped default.
    pub fn event_type(&self, everyone: EventType) -> EventType {
        match self {
            Self::Everyone => everyone,
            Self::User(id) => EventType::user(*id),
            Self::Branch(id) => EventType::branch(*id),
            Self::Role(role) => EventType::role(role),
        }
    }
}
