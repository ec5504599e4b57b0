use super::{ClientState, NotificationClient};
use crate::infrastructure::ReconnectTimer;
use crate::transport::{HttpTransport, Transport};
use crate::types::{
    ACCESS_TOKEN_ENV, DEFAULT_STREAM_URL, MAX_RECONNECT_ATTEMPTS, NotificationError,
    RECONNECT_DELAY, Result, STREAM_URL_ENV,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use url::Url;

#[derive(Debug, Clone, Default)]
pub struct NotificationClientOptions {
    /// Sent as `Authorization: Bearer <token>` when opening the stream
    pub access_token: Option<String>,
    /// Delay before each reconnect attempt in milliseconds. Default: 3000.
    pub reconnect_delay: Option<u64>,
    /// Reconnect attempts before giving up. Default: 5.
    pub max_reconnect_attempts: Option<u32>,
}

/// Builder for NotificationClient that handles initialization
pub struct NotificationClientBuilder {
    endpoint: Url,
    options: NotificationClientOptions,
    transport: Option<Arc<dyn Transport>>,
}

impl NotificationClientBuilder {
    /// Create a new builder
    pub fn new(endpoint: impl AsRef<str>, options: NotificationClientOptions) -> Result<Self> {
        let endpoint = Url::parse(endpoint.as_ref())?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(NotificationError::Config(format!(
                "stream endpoint must be http or https, got '{}'",
                endpoint.scheme()
            )));
        }

        if options.access_token.as_deref() == Some("") {
            return Err(NotificationError::Config(
                "access token must not be empty".to_string(),
            ));
        }

        Ok(Self {
            endpoint,
            options,
            transport: None,
        })
    }

    /// Create a builder from `NOTIFICATION_STREAM_URL` and
    /// `NOTIFICATION_ACCESS_TOKEN`, falling back to the local development
    /// endpoint.
    pub fn from_env() -> Result<Self> {
        let endpoint =
            std::env::var(STREAM_URL_ENV).unwrap_or_else(|_| DEFAULT_STREAM_URL.to_string());
        let access_token = std::env::var(ACCESS_TOKEN_ENV)
            .ok()
            .filter(|token| !token.is_empty());

        tracing::debug!("Loaded stream endpoint {} from environment", endpoint);
        Self::new(
            endpoint,
            NotificationClientOptions {
                access_token,
                ..Default::default()
            },
        )
    }

    /// Replace the HTTP transport, e.g. with a scripted one in tests
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// Must be called from within a tokio runtime; background tasks are
    /// spawned on it.
    pub fn build(self) -> Result<NotificationClient> {
        let runtime = Handle::try_current()
            .map_err(|e| NotificationError::Runtime(format!("no tokio runtime: {}", e)))?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(
                self.endpoint.clone(),
                self.options.access_token.clone(),
            )),
        };

        let reconnect = ReconnectTimer::new(
            Duration::from_millis(self.options.reconnect_delay.unwrap_or(RECONNECT_DELAY)),
            self.options
                .max_reconnect_attempts
                .unwrap_or(MAX_RECONNECT_ATTEMPTS),
        );

        Ok(NotificationClient {
            endpoint: self.endpoint,
            options: self.options,
            transport,
            runtime,
            state: Arc::new(Mutex::new(ClientState::new(reconnect))),
        })
    }
}
