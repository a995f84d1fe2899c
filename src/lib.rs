//! Library crate for mdb-back, exposing modules for binaries and integration tests.

/// Environment-driven runtime configuration.
pub mod config;
/// Storage core: player stats, question pool and their persistence.
pub mod dao;
/// Request and response payloads.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// HTTP routers.
pub mod routes;
/// Command handlers, persistence and documentation.
pub mod services;
/// Shared application state.
pub mod state;
