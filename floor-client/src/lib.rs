//! Floor Client - client library for the restaurant floor backend
//!
//! Provides the REST adapter, one service per entity, an observable store
//! that every view reads from, and headless view-models for the admin
//! pages (zones, zone detail, tables) with their cards and forms.

pub mod config;
pub mod error;
pub mod http;
pub mod notify;
pub mod services;
pub mod store;
pub mod views;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use notify::{Notification, NotificationCenter, NotificationLevel};
pub use store::{Collection, FloorStore, LoadState};

// Re-export shared types for convenience
pub use shared::models;
