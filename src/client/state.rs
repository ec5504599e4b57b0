use super::connection::ConnectionManager;
use crate::infrastructure::{ReconnectTimer, TaskManager};
use crate::messaging::SubscriberRegistry;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Consolidated mutable state for NotificationClient.
///
/// Guarded by one lock that is never held across an `.await` or while a
/// handler runs.
#[derive(Default)]
pub struct ClientState {
    /// Handlers by event type
    pub registry: SubscriberRegistry,

    /// The single stream connection
    pub connection: ConnectionManager,

    /// Reconnect attempt counter and delay
    pub reconnect: ReconnectTimer,

    /// Pending reconnect tasks
    pub task_manager: TaskManager,
}

impl ClientState {
    pub fn new(reconnect: ReconnectTimer) -> Self {
        Self {
            registry: SubscriberRegistry::new(),
            connection: ConnectionManager::new(),
            reconnect,
            task_manager: TaskManager::new(),
        }
    }
}

/// Locks the client state.
///
/// Handlers run outside the lock, so a poisoned lock still holds consistent
/// state and is recovered.
pub(crate) fn lock_state(state: &Mutex<ClientState>) -> MutexGuard<'_, ClientState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
