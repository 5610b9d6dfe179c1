//! plantscan: demo backend for plant disease photo uploads.
//!
//! Accepts a plant photo, answers with a mock diagnosis drawn from a fixed
//! catalog, and keeps a record of every analysis. Authentication endpoints
//! are mocks that accept any well-formed credentials.
//!
//! - [`diagnosis`] - Mock diagnosis generator
//! - [`auth`] - Credential presence checks and demo tokens
//! - [`store`] - Diagnosis record persistence
//! - [`uploads`] - Upload byte storage
//! - [`http`] - Router, handlers and server loop
//! - [`config`] - Layered configuration

pub mod auth;
pub mod config;
pub mod constants;
pub mod diagnosis;
pub mod http;
pub mod random;
pub mod store;
pub mod uploads;
