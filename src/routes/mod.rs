use axum::Router;

use crate::state::SharedState;

/// Operator endpoints.
pub mod admin;
/// Question and answer commands.
pub mod commands;
/// Swagger UI.
pub mod docs;
/// Health check.
pub mod health;
/// Player stats.
pub mod players;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(commands::router())
        .merge(players::router())
        .merge(admin::router())
        .merge(docs::router());

    api_router.with_state(state)
}
