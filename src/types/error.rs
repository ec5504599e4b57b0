use thiserror::Error;

/// Errors that can occur when using the notification client.
#[derive(Error, Debug)]
pub enum NotificationError {
    /// General connection error with descriptive message
    #[error("Connection error: {0}")]
    Connection(String),

    /// HTTP transport error (request failed, body read failed, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The stream endpoint answered with a non-success status
    #[error("Stream endpoint returned status {0}")]
    Status(u16),

    /// The server ended the event stream
    #[error("Event stream closed by server")]
    StreamClosed,

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing error (malformed endpoint URL)
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Event type name rejected at subscription time
    #[error("Invalid event type: {0:?}")]
    InvalidEventType(String),

    /// The client was built outside of a tokio runtime
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Convenience type alias for `Result<T, NotificationError>`.
pub type Result<T> = std::result::Result<T, NotificationError>;
