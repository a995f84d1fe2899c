use serde::Serialize;
use utoipa::ToSchema;

/// Health payload returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status, always "ok" once the service is serving.
    pub status: String,
    /// Number of questions in the corpus.
    pub questions_total: usize,
    /// Number of questions that can still be asked.
    pub questions_remaining: usize,
    /// RFC 3339 timestamp of the last successful save, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_saved_at: Option<String>,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(questions_total: usize, questions_remaining: usize) -> Self {
        Self {
            status: "ok".to_string(),
            questions_total,
            questions_remaining,
            last_saved_at: None,
        }
    }

    /// Attach the RFC 3339 time of the last save.
    pub fn with_last_saved_at(mut self, last_saved_at: Option<String>) -> Self {
        self.last_saved_at = last_saved_at;
        self
    }
}
