//! HTTP API handlers organized by concern.

pub mod analyze;
pub mod auth;
pub mod health;
pub mod images;

// Re-export all handlers for use in routing
pub(crate) use analyze::analyze;
pub(crate) use auth::{login, register};
pub(crate) use health::health;
pub(crate) use images::list_images;
