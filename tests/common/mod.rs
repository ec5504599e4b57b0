#![allow(dead_code)]

use futures::channel::mpsc;
use futures::future::BoxFuture;
use futures::stream::StreamExt;
use notification_stream_rs::{
    EventStream, NotificationClient, NotificationClientOptions, NotificationError, SseEvent,
    Transport,
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc as tokio_mpsc;

enum Step {
    Fail(String),
    Open(mpsc::UnboundedReceiver<Result<SseEvent, NotificationError>>),
}

/// Transport that replays a script of connection outcomes.
///
/// Once the script runs out every further `open` fails.
#[derive(Default)]
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    opens: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_failure(&self, reason: &str) {
        self.steps
            .lock()
            .unwrap()
            .push_back(Step::Fail(reason.to_string()));
    }

    /// Script a successful open and return the server side of that stream
    pub fn push_stream(&self) -> ServerStream {
        let (tx, rx) = mpsc::unbounded();
        self.steps.lock().unwrap().push_back(Step::Open(rx));
        ServerStream { tx }
    }

    /// Number of times the client tried to open a connection
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

impl Transport for ScriptedTransport {
    fn open(&self) -> BoxFuture<'static, Result<EventStream, NotificationError>> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.lock().unwrap().pop_front();
        Box::pin(async move {
            match step {
                Some(Step::Open(rx)) => Ok(rx.boxed()),
                Some(Step::Fail(reason)) => Err(NotificationError::Connection(reason)),
                None => Err(NotificationError::Connection(
                    "connection refused".to_string(),
                )),
            }
        })
    }
}

/// Server end of a scripted stream. Dropping it closes the stream.
pub struct ServerStream {
    tx: mpsc::UnboundedSender<Result<SseEvent, NotificationError>>,
}

impl ServerStream {
    pub fn send(&self, event: Option<&str>, data: &str) {
        let _ = self.tx.unbounded_send(Ok(SseEvent {
            event: event.map(str::to_string),
            data: data.to_string(),
            id: None,
            retry: None,
        }));
    }

    pub fn fail(&self) {
        let _ = self
            .tx
            .unbounded_send(Err(NotificationError::Connection("connection reset".into())));
    }
}

pub fn client_with(transport: &Arc<ScriptedTransport>) -> NotificationClient {
    NotificationClient::builder(
        "http://localhost:5000/stream",
        NotificationClientOptions::default(),
    )
    .unwrap()
    .with_transport(transport.clone())
    .build()
    .unwrap()
}

/// Handler forwarding every payload into a channel
pub fn recorder() -> (
    impl Fn(Value) + Send + Sync + 'static,
    tokio_mpsc::UnboundedReceiver<Value>,
) {
    let (tx, rx) = tokio_mpsc::unbounded_channel();
    (
        move |payload: Value| {
            let _ = tx.send(payload);
        },
        rx,
    )
}

/// Typed variant of [`recorder`]
pub fn typed_recorder<T: Send + 'static>() -> (
    impl Fn(T) + Send + Sync + 'static,
    tokio_mpsc::UnboundedReceiver<T>,
) {
    let (tx, rx) = tokio_mpsc::unbounded_channel();
    (
        move |payload: T| {
            let _ = tx.send(payload);
        },
        rx,
    )
}

/// Lets every runnable task run to idle
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

pub async fn next<T>(rx: &mut tokio_mpsc::UnboundedReceiver<T>) -> T {
    tokio::time::timeout(Duration::from_secs(60), rx.recv())
        .await
        .expect("timed out waiting for an event")
        .expect("recorder channel closed")
}

pub fn drain<T>(rx: &mut tokio_mpsc::UnboundedReceiver<T>) -> Vec<T> {
    let mut items = Vec::new();
    while let Ok(item) = rx.try_recv() {
        items.push(item);
    }
    items
}
