use super::NotificationClient;
use crate::messaging::{EventType, HandlerId};
use std::sync::atomic::{AtomicBool, Ordering};

/// Handle returned by [`NotificationClient::subscribe`].
///
/// Dropping it does not unsubscribe; call [`unsubscribe`](Self::unsubscribe).
pub struct Subscription {
    client: NotificationClient,
    event: EventType,
    id: HandlerId,
    active: AtomicBool,
}

impl Subscription {
    pub(crate) fn new(client: NotificationClient, event: EventType, id: HandlerId) -> Self {
        Self {
            client,
            event,
            id,
            active: AtomicBool::new(true),
        }
    }

    /// Removes the handler. Calling this more than once is a no-op.
    pub fn unsubscribe(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            self.client.unsubscribe(&self.event, self.id);
        }
    }

    pub fn event(&self) -> &EventType {
        &self.event
    }

    pub fn id(&self) -> HandlerId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event)
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
