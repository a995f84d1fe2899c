use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::stats::SaveResponse, error::AppError, services::persistence, state::SharedState,
};

/// Operator endpoints.
pub fn router() -> Router<SharedState> {
    Router::new().route("/admin/save", post(save_stats))
}

/// Persist player stats to the configured file right away.
#[utoipa::path(
    post,
    path = "/admin/save",
    tag = "admin",
    responses(
        (status = 200, description = "Stats saved", body = SaveResponse),
        (status = 409, description = "Stats file exists and overwriting is disabled"),
        (status = 500, description = "Stats could not be written")
    )
)]
pub async fn save_stats(State(state): State<SharedState>) -> Result<Json<SaveResponse>, AppError> {
    Ok(Json(persistence::save_now(&state).await?))
}
