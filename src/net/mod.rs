//! Backend contract: wire types and the HTTP client.

pub mod api;
pub mod types;

pub use api::{Backend, HttpBackend};

// =============================================================================
// TEST HELPERS
// =============================================================================
