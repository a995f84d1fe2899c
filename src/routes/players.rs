use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::{
    dto::{stats::StatsResponse, validation::validate_identifier},
    error::AppError,
    services::command_service,
    state::SharedState,
};

/// Per-player read endpoints.
pub fn router() -> Router<SharedState> {
    Router::new().route("/players/{player_id}/stats", get(player_stats))
}

/// Answers and running total of a player.
#[utoipa::path(
    get,
    path = "/players/{player_id}/stats",
    tag = "players",
    params(("player_id" = String, Path, description = "Platform identifier of the player")),
    responses(
        (status = 200, description = "Player stats, empty for unknown players", body = StatsResponse),
        (status = 400, description = "Malformed player id")
    )
)]
pub async fn player_stats(
    State(state): State<SharedState>,
    Path(player_id): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    validate_identifier(&player_id)
        .map_err(|err| AppError::BadRequest(format!("invalid player id: {err}")))?;
    Ok(Json(command_service::player_stats(state.storage(), &player_id)))
}
