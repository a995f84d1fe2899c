use crate::{
    dto::{format_system_time, health::HealthResponse},
    state::SharedState,
};

/// Report how many questions are left and when stats were last written.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let storage = state.local_storage();
    let last_saved_at = state.last_saved().await.map(format_system_time);

    HealthResponse::ok(storage.question_count(), storage.remaining_questions())
        .with_last_saved_at(last_saved_at)
}
