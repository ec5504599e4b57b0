// Module declarations
mod builder;
mod connection;
mod core;
mod state;
mod subscription;

// Public API exports
pub use builder::{NotificationClientBuilder, NotificationClientOptions};
pub use connection::{ConnectionManager, ConnectionState};
pub use self::core::NotificationClient;
pub use state::ClientState;
pub(crate) use state::lock_state;
pub use subscription::Subscription;
