use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::commands::{AnswerRequest, AnswerResponse, QuestionResponse},
    error::AppError,
    services::command_service,
    state::SharedState,
};

/// Routes backing the `/question` and `/answer` chat commands.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/commands/question", post(ask_question))
        .route("/commands/answer", post(answer))
        .route("/questions/{id}", get(get_question))
}

/// Draw a question that has not been asked yet.
#[utoipa::path(
    post,
    path = "/commands/question",
    tag = "commands",
    responses(
        (status = 200, description = "Fresh question", body = QuestionResponse),
        (status = 410, description = "Every question has already been asked")
    )
)]
pub async fn ask_question(
    State(state): State<SharedState>,
) -> Result<Json<QuestionResponse>, AppError> {
    Ok(Json(command_service::ask_question(state.storage())?))
}

/// Record a player's answer to an asked question.
#[utoipa::path(
    post,
    path = "/commands/answer",
    tag = "commands",
    request_body = AnswerRequest,
    responses(
        (status = 200, description = "Answer recorded", body = AnswerResponse),
        (status = 400, description = "Invalid answer payload"),
        (status = 404, description = "Question never asked")
    )
)]
pub async fn answer(
    State(state): State<SharedState>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    payload.validate()?;
    Ok(Json(command_service::answer(state.storage(), payload)?))
}

/// Look up any question of the corpus by id.
#[utoipa::path(
    get,
    path = "/questions/{id}",
    tag = "commands",
    params(("id" = String, Path, description = "Identifier of the question")),
    responses(
        (status = 200, description = "Question", body = QuestionResponse),
        (status = 404, description = "Unknown question id")
    )
)]
pub async fn get_question(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<QuestionResponse>, AppError> {
    Ok(Json(command_service::get_question(state.storage(), &id)?))
}
