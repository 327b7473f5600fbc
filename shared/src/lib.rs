//! Shared types for the floor management client
//!
//! Wire-level shapes of the zones / tables / customers API together with
//! the create and update payloads the client sends back.

pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::*;
