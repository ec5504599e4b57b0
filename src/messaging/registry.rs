use super::EventType;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Subscriber callback invoked with a decoded payload
pub type Handler = Arc<dyn Fn(Value) + Send + Sync + 'static>;

/// Identity of one registration.
///
/// Registering the same closure twice yields two ids, and removing one leaves
/// the other in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

impl HandlerId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

struct Binding {
    id: HandlerId,
    handler: Handler,
}

/// Maps event types to their handlers in registration order
#[derive(Default)]
pub struct SubscriberRegistry {
    next_id: u64,
    bindings: HashMap<EventType, Vec<Binding>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler to the list for `event`
    pub fn register(&mut self, event: EventType, handler: Handler) -> HandlerId {
        self.next_id += 1;
        let id = HandlerId(self.next_id);
        self.bindings
            .entry(event)
            .or_default()
            .push(Binding { id, handler });
        id
    }

    /// Remove a handler by identity. Returns false when it was not registered.
    pub fn remove(&mut self, event: &EventType, id: HandlerId) -> bool {
        let Some(list) = self.bindings.get_mut(event) else {
            return false;
        };
        let before = list.len();
        list.retain(|binding| binding.id != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.bindings.remove(event);
        }
        removed
    }

    /// Copy of the current handler list for `event`
    pub fn snapshot(&self, event: &EventType) -> Vec<Handler> {
        self.bindings
            .get(event)
            .map(|list| list.iter().map(|b| Arc::clone(&b.handler)).collect())
            .unwrap_or_default()
    }

    pub fn handler_count(&self, event: &EventType) -> usize {
        self.bindings.get(event).map_or(0, Vec::len)
    }

    /// True when no event type has any handler left
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn event_types(&self) -> impl Iterator<Item = &EventType> {
        self.bindings.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> Handler {
        let log = Arc::clone(log);
        Arc::new(move |_| log.lock().unwrap().push(name))
    }

    #[test]
    fn test_snapshot_keeps_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = SubscriberRegistry::new();
        registry.register(EventType::Message, recorder(&log, "a"));
        registry.register(EventType::Message, recorder(&log, "b"));
        registry.register(EventType::StockAlert, recorder(&log, "c"));

        for handler in registry.snapshot(&EventType::Message) {
            handler(Value::Null);
        }
        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_registrations_are_kept() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let handler = recorder(&log, "dup");
        let mut registry = SubscriberRegistry::new();
        let first = registry.register(EventType::Message, Arc::clone(&handler));
        let second = registry.register(EventType::Message, handler);

        assert_ne!(first, second);
        assert_eq!(registry.handler_count(&EventType::Message), 2);

        assert!(registry.remove(&EventType::Message, first));
        assert_eq!(registry.handler_count(&EventType::Message), 1);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut registry = SubscriberRegistry::new();
        let id = registry.register(EventType::Message, Arc::new(|_| {}));

        assert!(!registry.remove(&EventType::StockAlert, id));
        assert!(registry.remove(&EventType::Message, id));
        assert!(!registry.remove(&EventType::Message, id));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_last_removal_empties_registry() {
        let mut registry = SubscriberRegistry::new();
        let a = registry.register(EventType::Message, Arc::new(|_| {}));
        let b = registry.register(EventType::Connection, Arc::new(|_| {}));

        registry.remove(&EventType::Message, a);
        assert!(!registry.is_empty());
        assert_eq!(registry.event_types().count(), 1);

        registry.remove(&EventType::Connection, b);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_snapshot_is_detached_from_registry() {
        let mut registry = SubscriberRegistry::new();
        let id = registry.register(EventType::Message, Arc::new(|_| {}));
        let snapshot = registry.snapshot(&EventType::Message);

        registry.remove(&EventType::Message, id);
        assert_eq!(snapshot.len(), 1);
        assert!(registry.snapshot(&EventType::Message).is_empty());
    }
}
