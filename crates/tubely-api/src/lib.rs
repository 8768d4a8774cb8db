//! Tubely HTTP API
//!
//! Exposes the upload, thumbnail and retrieval endpoints over axum and wires the
//! metadata store, object store and ingest pipeline together at startup.

pub mod auth;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod utils;
