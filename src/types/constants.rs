/// Reserved event type names (magic strings layer)
pub mod event_types {
    pub const MESSAGE: &str = "message";
    pub const CONNECTION: &str = "connection";
    pub const STOCK_ALERT: &str = "stock_alert";
    pub const ORDER_NOTIFICATION: &str = "order_notification";
    pub const PAYMENT_NOTIFICATION: &str = "payment_notification";
    pub const SYSTEM_NOTIFICATION: &str = "system_notification";
}

/// Prefixes of audience-scoped event types published by the backend
pub mod audience_prefixes {
    pub const USER: &str = "user_";
    pub const BRANCH: &str = "branch_";
    pub const ROLE: &str = "role_";
}

/// Values of the `status` field on `connection` events
pub mod connection_status {
    pub const CONNECTED: &str = "connected";
    pub const FAILED: &str = "failed";
}

/// SSE content type
pub const EVENT_STREAM_CONTENT_TYPE: &str = "text/event-stream";

/// Default stream endpoint when none is configured
pub const DEFAULT_STREAM_URL: &str = "http://localhost:5000/stream";

/// Environment variable holding the stream endpoint
pub const STREAM_URL_ENV: &str = "NOTIFICATION_STREAM_URL";

/// Environment variable holding the bearer token sent with the stream request
pub const ACCESS_TOKEN_ENV: &str = "NOTIFICATION_ACCESS_TOKEN";

/// Fixed delay before a reconnect attempt (milliseconds)
pub const RECONNECT_DELAY: u64 = 3000;

/// Reconnect attempts allowed before the client gives up
pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;
