/// Question, answer and stats command handlers.
pub mod command_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Saving stats on demand and on a timer.
pub mod persistence;
