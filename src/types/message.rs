use serde::{Deserialize, Serialize};

use crate::messaging::EventType;
use crate::transport::SseEvent;
use crate::types::Result;

/// A decoded event ready for dispatch to subscribers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InboundEvent {
    pub event: EventType,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl InboundEvent {
    pub fn new(event: EventType, payload: serde_json::Value) -> Self {
        Self { event, payload }
    }

    /// Decode the data field of a wire event.
    ///
    /// Events without an `event:` field are generic messages and map to
    /// [`EventType::Message`].
    pub fn decode(raw: &SseEvent) -> Result<Self> {
        let event = raw
            .event
            .as_deref()
            .map(EventType::parse)
            .unwrap_or(EventType::Message);
        let payload = serde_json::from_str(&raw.data)?;
        Ok(Self { event, payload })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(event: Option<&str>, data: &str) -> SseEvent {
        SseEvent {
            event: event.map(str::to_string),
            data: data.to_string(),
            id: None,
            retry: None,
        }
    }

    #[test]
    fn test_untagged_event_is_generic_message() {
        let decoded = InboundEvent::decode(&raw(None, r#"{"hello":"world"}"#)).unwrap();
        assert_eq!(decoded.event, EventType::Message);
        assert_eq!(decoded.payload, json!({"hello": "world"}));
    }

    #[test]
    fn test_tagged_event_keeps_its_type() {
        let decoded = InboundEvent::decode(&raw(
            Some("stock_alert"),
            r#"{"product_id":7,"current_stock":0}"#,
        ))
        .unwrap();
        assert_eq!(decoded.event, EventType::StockAlert);
        assert_eq!(decoded.payload, json!({"product_id": 7, "current_stock": 0}));
    }

    #[test]
    fn test_malformed_data_is_an_error() {
        let result = InboundEvent::decode(&raw(Some("payment_notification"), "{not json"));
        assert!(matches!(
            result,
            Err(crate::types::NotificationError::Serialization(_))
        ));
    }

    #[test]
    fn test_scalar_payloads_decode() {
        let decoded = InboundEvent::decode(&raw(Some("custom"), "42")).unwrap();
        assert_eq!(decoded.event, EventType::Custom("custom".to_string()));
        assert_eq!(decoded.payload, json!(42));
    }
}
