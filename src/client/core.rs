use super::{
    ClientState, NotificationClientBuilder, NotificationClientOptions, Subscription, lock_state,
};
use crate::messaging::{Audience, EventRouter, EventType, Handler, HandlerId};
use crate::transport::Transport;
use crate::types::{
    ConnectionStatus, InboundEvent, NotificationError, OrderNotification, PaymentNotification,
    Result, StockAlert, SystemNotification,
};
use futures::stream::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use url::Url;

/// The main entry point for receiving real-time notifications.
///
/// `NotificationClient` owns one server-push connection and a registry of
/// subscribers. The connection is opened lazily by the first subscription,
/// reopened after failures with a fixed delay up to a capped number of
/// attempts, and closed again when the last subscription goes away.
///
/// Lifecycle changes are reported on the `connection` event type with a
/// [`ConnectionStatus`] payload.
///
/// # Example
///
/// ```no_run
/// use notification_stream_rs::{EventType, NotificationClient, NotificationClientOptions};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = NotificationClient::new(
///     "https://shop.example.com/stream",
///     NotificationClientOptions::default(),
/// )?;
///
/// let subscription = client.subscribe(EventType::StockAlert, |payload| {
///     println!("stock alert: {}", payload);
/// })?;
///
/// // Later, when the widget goes away
/// subscription.unsubscribe();
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct NotificationClient {
    pub(crate) endpoint: Url,
    pub(crate) options: NotificationClientOptions,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) runtime: Handle,

    // Consolidated mutable state
    pub(crate) state: Arc<Mutex<ClientState>>,
}

impl NotificationClient {
    /// Creates a new client for the given stream endpoint.
    ///
    /// No connection is made until the first [`subscribe`](Self::subscribe).
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::UrlParse`] or [`NotificationError::Config`]
    /// for an unusable endpoint, and [`NotificationError::Runtime`] when called
    /// outside a tokio runtime.
    pub fn new(endpoint: impl AsRef<str>, options: NotificationClientOptions) -> Result<Self> {
        NotificationClientBuilder::new(endpoint, options)?.build()
    }

    /// Creates a builder, e.g. to plug in a custom [`Transport`].
    pub fn builder(
        endpoint: impl AsRef<str>,
        options: NotificationClientOptions,
    ) -> Result<NotificationClientBuilder> {
        NotificationClientBuilder::new(endpoint, options)
    }

    /// Creates a client configured from the environment.
    ///
    /// See [`NotificationClientBuilder::from_env`].
    pub fn from_env() -> Result<Self> {
        NotificationClientBuilder::from_env()?.build()
    }

    /// Registers `handler` for `event` and opens the connection if none
    /// exists.
    ///
    /// Registering the same closure twice keeps both registrations; each is
    /// invoked. Handlers for one event run in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::InvalidEventType`] for an empty event
    /// type name. Connection problems are never returned here; they arrive as
    /// `connection` events.
    pub fn subscribe<F>(&self, event: impl Into<EventType>, handler: F) -> Result<Subscription>
    where
        F: Fn(Value) + Send + Sync + 'static,
    {
        self.subscribe_handler(event, Arc::new(handler))
    }

    /// Same as [`subscribe`](Self::subscribe) for an already shared handler.
    pub fn subscribe_handler(
        &self,
        event: impl Into<EventType>,
        handler: Handler,
    ) -> Result<Subscription> {
        let event = event.into();
        if event.is_empty() {
            return Err(NotificationError::InvalidEventType(event.to_string()));
        }

        let mut state = lock_state(&self.state);
        let id = state.registry.register(event.clone(), handler);
        tracing::debug!("Subscribed handler {} to {}", id.as_u64(), event);

        self.ensure_connection(&mut state);
        drop(state);

        Ok(Subscription::new(self.clone(), event, id))
    }

    /// Subscribes with a payload decoded into `T`.
    ///
    /// A payload that does not fit `T` is logged and skipped for this
    /// handler only.
    pub fn subscribe_typed<T, F>(
        &self,
        event: impl Into<EventType>,
        handler: F,
    ) -> Result<Subscription>
    where
        T: DeserializeOwned + 'static,
        F: Fn(T) + Send + Sync + 'static,
    {
        let event = event.into();
        let name = event.to_string();
        self.subscribe(event, move |payload| {
            match serde_json::from_value::<T>(payload) {
                Ok(typed) => handler(typed),
                Err(e) => tracing::warn!(
                    "Dropping {} payload that does not match {}: {}",
                    name,
                    std::any::type_name::<T>(),
                    e
                ),
            }
        })
    }

    pub fn subscribe_stock_alerts<F>(&self, handler: F) -> Result<Subscription>
    where
        F: Fn(StockAlert) + Send + Sync + 'static,
    {
        self.subscribe_typed(EventType::StockAlert, handler)
    }

    /// Order updates for everyone, or the copies scoped to a user or branch.
    pub fn subscribe_order_notifications<F>(
        &self,
        audience: Audience,
        handler: F,
    ) -> Result<Subscription>
    where
        F: Fn(OrderNotification) + Send + Sync + 'static,
    {
        self.subscribe_typed(audience.event_type(EventType::OrderNotification), handler)
    }

    pub fn subscribe_payment_notifications<F>(
        &self,
        audience: Audience,
        handler: F,
    ) -> Result<Subscription>
    where
        F: Fn(PaymentNotification) + Send + Sync + 'static,
    {
        self.subscribe_typed(audience.event_type(EventType::PaymentNotification), handler)
    }

    pub fn subscribe_system_notifications<F>(
        &self,
        audience: Audience,
        handler: F,
    ) -> Result<Subscription>
    where
        F: Fn(SystemNotification) + Send + Sync + 'static,
    {
        self.subscribe_typed(audience.event_type(EventType::SystemNotification), handler)
    }

    /// Subscribes to `connected` / `failed` lifecycle notices.
    pub fn subscribe_connection_status<F>(&self, handler: F) -> Result<Subscription>
    where
        F: Fn(ConnectionStatus) + Send + Sync + 'static,
    {
        self.subscribe_typed(EventType::Connection, handler)
    }

    /// Removes one registration.
    ///
    /// Unknown ids are ignored. Removing the last handler of the last event
    /// type closes the connection and clears the reconnect state.
    pub fn unsubscribe(&self, event: &EventType, id: HandlerId) {
        let mut state = lock_state(&self.state);
        if !state.registry.remove(event, id) {
            tracing::debug!("Handler {} was not subscribed to {}", id.as_u64(), event);
            return;
        }
        tracing::debug!("Unsubscribed handler {} from {}", id.as_u64(), event);

        if state.registry.is_empty() {
            tracing::info!("Last subscriber removed, closing event stream");
            Self::teardown(&mut state);
        }
    }

    /// Checks whether the stream is currently open.
    pub fn is_connected(&self) -> bool {
        lock_state(&self.state).connection.is_connected()
    }

    /// Closes the stream and cancels any pending reconnect.
    ///
    /// Subscribers stay registered; the next [`subscribe`](Self::subscribe)
    /// reconnects with a fresh reconnect budget.
    pub fn disconnect(&self) {
        let mut state = lock_state(&self.state);
        Self::teardown(&mut state);
        tracing::info!("Disconnected from event stream");
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn options(&self) -> &NotificationClientOptions {
        &self.options
    }

    fn teardown(state: &mut ClientState) {
        state.task_manager.abort_all();
        state.connection.close();
        state.reconnect.reset();
    }

    /// Opens a connection unless one exists or a reconnect is already
    /// scheduled to open it
    fn ensure_connection(&self, state: &mut ClientState) {
        if state.connection.has_connection() || state.task_manager.has_pending() {
            return;
        }
        self.open(state);
    }

    fn open(&self, state: &mut ClientState) {
        let generation = state.connection.begin();
        tracing::info!("Connecting to {}", self.endpoint);

        let client = self.clone();
        let task = self
            .runtime
            .spawn(async move { client.run_connection(generation).await });
        state.connection.attach(task);
    }

    /// Drives one connection attempt from open to failure
    async fn run_connection(self, generation: u64) {
        let mut events = match self.transport.open().await {
            Ok(events) => events,
            Err(e) => {
                self.on_transport_error(generation, e);
                return;
            }
        };

        if !self.on_open(generation) {
            return;
        }

        let router = EventRouter::new_with_state(Arc::clone(&self.state));
        while let Some(item) = events.next().await {
            match item {
                Ok(raw) => {
                    if lock_state(&self.state).connection.generation() != generation {
                        tracing::debug!("Discarding event from a closed connection");
                        return;
                    }
                    tracing::debug!(
                        "Received {} event: {}",
                        raw.event.as_deref().unwrap_or("message"),
                        raw.data
                    );
                    router.route_raw(&raw);
                }
                Err(e) => {
                    self.on_transport_error(generation, e);
                    return;
                }
            }
        }

        self.on_transport_error(generation, NotificationError::StreamClosed);
    }

    fn on_open(&self, generation: u64) -> bool {
        {
            let mut state = lock_state(&self.state);
            if !state.connection.mark_connected(generation) {
                return false;
            }
            state.reconnect.reset();
        }

        tracing::info!("Connected to event stream at {}", self.endpoint);
        self.emit_status(ConnectionStatus::connected());
        true
    }

    fn on_transport_error(&self, generation: u64, error: NotificationError) {
        let failed = {
            let mut state = lock_state(&self.state);
            if !state.connection.release(generation) {
                tracing::debug!("Ignoring error from a closed connection: {}", error);
                return;
            }
            tracing::error!("Event stream error: {}", error);

            match state.reconnect.next_delay() {
                Some(delay) => {
                    tracing::warn!(
                        "Reconnecting in {:?} (attempt {}/{})",
                        delay,
                        state.reconnect.attempts(),
                        state.reconnect.max_attempts()
                    );
                    let client = self.clone();
                    state.task_manager.spawn(&self.runtime, async move {
                        tokio::time::sleep(delay).await;
                        client.reconnect(generation);
                    });
                    None
                }
                None => {
                    state.connection.fail();
                    Some(ConnectionStatus::failed(format!(
                        "Could not connect to the notification stream after {} attempts: {}",
                        state.reconnect.max_attempts(),
                        error
                    )))
                }
            }
        };

        if let Some(status) = failed {
            tracing::error!("Giving up on event stream, no more reconnect attempts");
            self.emit_status(status);
        }
    }

    /// Fired by the reconnect timer
    fn reconnect(&self, generation: u64) {
        let mut state = lock_state(&self.state);
        if state.connection.generation() != generation || state.connection.has_connection() {
            return;
        }
        if state.registry.is_empty() {
            tracing::debug!("No subscribers left, skipping reconnect");
            return;
        }
        tracing::info!("Attempting to reconnect...");
        self.open(&mut state);
    }

    fn emit_status(&self, status: ConnectionStatus) {
        EventRouter::new_with_state(Arc::clone(&self.state))
            .route(InboundEvent::new(EventType::Connection, status.to_value()));
    }
}
