// Transport module - Wire decoding and the stream connection seam
pub mod http;
pub mod sse;

pub use http::HttpTransport;
pub use sse::{SseDecoder, SseEvent};

use crate::types::Result;
use futures::future::BoxFuture;
use futures::stream::BoxStream;

/// Events read from one open connection. The stream ending means the server
/// closed the connection.
pub type EventStream = BoxStream<'static, Result<SseEvent>>;

/// Opens server-push connections.
///
/// The client holds at most one open stream at a time and calls `open` again
/// only when reconnecting.
pub trait Transport: Send + Sync {
    fn open(&self) -> BoxFuture<'static, Result<EventStream>>;
}
