use super::{EventStream, SseDecoder, SseEvent, Transport};
use crate::types::{EVENT_STREAM_CONTENT_TYPE, NotificationError, Result};
use futures::future::{self, BoxFuture};
use futures::stream::{self, StreamExt};
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use url::Url;

/// Opens the event stream with a long-lived HTTP GET
pub struct HttpTransport {
    client: reqwest::Client,
    url: Url,
    access_token: Option<String>,
}

impl HttpTransport {
    pub fn new(url: Url, access_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            access_token,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Transport for HttpTransport {
    fn open(&self) -> BoxFuture<'static, Result<EventStream>> {
        let mut request = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, EVENT_STREAM_CONTENT_TYPE)
            .header(CACHE_CONTROL, "no-cache");

        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let url = self.url.clone();
        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| NotificationError::Connection(format!("Failed to open {}: {}", url, e)))?;

            let status = response.status();
            if !status.is_success() {
                return Err(NotificationError::Status(status.as_u16()));
            }

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            if !content_type.starts_with(EVENT_STREAM_CONTENT_TYPE) {
                tracing::warn!(
                    "Stream endpoint answered with content type '{}', expected '{}'",
                    content_type,
                    EVENT_STREAM_CONTENT_TYPE
                );
            }

            let events = response
                .bytes_stream()
                .scan(SseDecoder::new(), |decoder, chunk| {
                    let batch: Vec<Result<SseEvent>> = match chunk {
                        Ok(bytes) => decoder.feed(&bytes).into_iter().map(Ok).collect(),
                        Err(e) => vec![Err(NotificationError::from(e))],
                    };
                    future::ready(Some(stream::iter(batch)))
                })
                .flatten()
                .boxed();

            Ok(events)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::GET;
    use httpmock::MockServer;

    #[tokio::test]
    async fn test_open_decodes_stream_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/stream")
                    .header("accept", "text/event-stream")
                    .header("authorization", "Bearer secret");
                then.status(200)
                    .header("content-type", "text/event-stream")
                    .body("event: stock_alert\ndata: {\"product_id\":7,\"current_stock\":0}\n\ndata: {}\n\n");
            })
            .await;

        let url = Url::parse(&server.url("/stream")).unwrap();
        let transport = HttpTransport::new(url, Some("secret".to_string()));
        let events: Vec<_> = transport.open().await.unwrap().collect().await;

        mock.assert_async().await;
        assert_eq!(events.len(), 2);
        let first = events[0].as_ref().unwrap();
        assert_eq!(first.event.as_deref(), Some("stock_alert"));
        assert_eq!(events[1].as_ref().unwrap().event, None);
    }

    #[tokio::test]
    async fn test_open_rejects_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/stream");
                then.status(503);
            })
            .await;

        let url = Url::parse(&server.url("/stream")).unwrap();
        let transport = HttpTransport::new(url, None);
        let result = transport.open().await;

        assert!(matches!(result, Err(NotificationError::Status(503))));
    }
}
