use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Tracks scheduled background tasks (pending reconnects)
pub struct TaskManager {
    handles: Vec<JoinHandle<()>>,
}

impl TaskManager {
    /// Create a new empty task manager
    pub fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    /// Spawn a task on `runtime` and track it
    pub fn spawn<F>(&mut self, runtime: &Handle, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        self.handles.retain(|handle| !handle.is_finished());
        let handle = runtime.spawn(future);
        self.handles.push(handle);
    }

    /// True while any tracked task has not finished
    pub fn has_pending(&mut self) -> bool {
        self.handles.retain(|handle| !handle.is_finished());
        !self.handles.is_empty()
    }

    /// Abort all tasks without waiting
    pub fn abort_all(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
        self.handles.clear();
    }
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new()
    }
}
