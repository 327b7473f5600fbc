//! Data models
//!
//! Shared between the client library and any front-end rendering it.
//! All IDs are `i64` and are assigned by the backend.
//! Field names are camelCase on the wire.

pub mod customer;
pub mod dining_table;
pub mod occupancy;
pub mod zone;

// Re-exports
pub use customer::*;
pub use dining_table::*;
pub use occupancy::*;
pub use zone::*;
