// Messaging module - Event types, subscriber registry and dispatch
pub mod event;
pub mod registry;
pub mod router;

pub use event::{Audience, EventType};
pub use registry::{Handler, HandlerId, SubscriberRegistry};
pub use router::EventRouter;
