//! Controller-owned session state.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `chat`, `context`, `request`) so the
//! controller and its tests can work with small focused models. Nothing here
//! is persisted; the backend session is the durable store.

pub mod auth;
pub mod chat;
pub mod context;
pub mod request;

pub use auth::AuthState;
pub use chat::ChatExchange;
pub use context::{ContextUsage, MeterTier};
pub use request::{Interaction, PendingToken, RequestTracker};
