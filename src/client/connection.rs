use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    /// Reconnect budget exhausted; stays here until torn down or resubscribed
    Failed,
}

/// Owns the single connection task and its lifecycle state.
///
/// Every connection attempt gets a new generation number. Callbacks from a
/// task whose generation is no longer current are stale and must be ignored.
#[derive(Debug, Default)]
pub struct ConnectionManager {
    state: ConnectionState,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the current connection state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Checks if currently connected
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while a connection task exists, whether connecting or connected
    pub fn has_connection(&self) -> bool {
        self.task.is_some()
    }

    /// Starts a new attempt and returns its generation
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = ConnectionState::Connecting;
        self.generation
    }

    /// Stores the task driving the current attempt
    pub fn attach(&mut self, task: JoinHandle<()>) {
        self.task = Some(task);
    }

    /// Marks the attempt as open. Returns false for a stale generation.
    pub fn mark_connected(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.task.is_none() {
            return false;
        }
        self.state = ConnectionState::Connected;
        true
    }

    /// Drops the connection after a transport error. Returns false for a
    /// stale generation.
    pub fn release(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.task.is_none() {
            return false;
        }
        // The task is the caller and finishes on its own.
        self.task = None;
        self.state = ConnectionState::Disconnected;
        true
    }

    pub fn fail(&mut self) {
        self.state = ConnectionState::Failed;
    }

    /// Aborts the connection task and invalidates its generation
    pub fn close(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation += 1;
        self.state = ConnectionState::Disconnected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lifecycle_transitions() {
        let mut connection = ConnectionManager::new();
        assert_eq!(connection.state(), ConnectionState::Disconnected);

        let generation = connection.begin();
        connection.attach(tokio::spawn(async {}));
        assert_eq!(connection.state(), ConnectionState::Connecting);
        assert!(connection.has_connection());

        assert!(connection.mark_connected(generation));
        assert!(connection.is_connected());

        assert!(connection.release(generation));
        assert!(!connection.has_connection());
        assert_eq!(connection.state(), ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_stale_generation_is_ignored() {
        let mut connection = ConnectionManager::new();
        let old = connection.begin();
        connection.attach(tokio::spawn(async {}));
        connection.close();

        assert!(!connection.mark_connected(old));
        assert!(!connection.release(old));
        assert!(!connection.is_connected());
    }

    #[tokio::test]
    async fn test_close_aborts_task() {
        let mut connection = ConnectionManager::new();
        connection.begin();
        let task = tokio::spawn(futures::future::pending::<()>());
        let abort = task.abort_handle();
        connection.attach(task);

        connection.close();
        tokio::task::yield_now().await;
        assert!(abort.is_finished());
        assert!(!connection.has_connection());
    }
}
