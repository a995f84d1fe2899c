use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the million dollars bot backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::commands::ask_question,
        crate::routes::commands::get_question,
        crate::routes::commands::answer,
        crate::routes::players::player_stats,
        crate::routes::admin::save_stats,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::commands::AnswerChoice,
            crate::dto::commands::AnswerRequest,
            crate::dto::commands::AnswerResponse,
            crate::dto::commands::QuestionResponse,
            crate::dto::stats::StatsResponse,
            crate::dto::stats::SaveResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "commands", description = "Chat commands relayed by the platform adapter"),
        (name = "players", description = "Per-player statistics"),
        (name = "admin", description = "Operator actions"),
    )
)]
pub struct ApiDoc;
