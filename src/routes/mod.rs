//! Router assembly: HTTP endpoints, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - REST API under `/api/v1/...`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers) – adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    // Static files with SPA fallback
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        .route("/api/v1/health", get(http::http_health))
        // Users
        .route("/api/v1/users", post(http::http_create_user))
        .route("/api/v1/users/:id", get(http::http_get_user))
        .route("/api/v1/users/:id", patch(http::http_update_user))
        .route("/api/v1/users/email/:email", get(http::http_get_user_by_email))
        // Progress
        .route("/api/v1/users/:id/progress", get(http::http_list_progress))
        .route("/api/v1/users/:id/progress/:module", get(http::http_module_progress))
        .route("/api/v1/progress", post(http::http_upsert_progress))
        // Quizzes
        .route("/api/v1/quiz", get(http::http_get_quiz))
        .route("/api/v1/quiz-attempts", post(http::http_submit_quiz_attempt))
        .route("/api/v1/users/:id/quiz-attempts", get(http::http_list_quiz_attempts))
        .route(
            "/api/v1/users/:id/quiz-attempts/:module",
            get(http::http_list_quiz_attempts_by_module),
        )
        // Games
        .route("/api/v1/games/:game_type/session", get(http::http_game_session))
        .route("/api/v1/games/budget/score", post(http::http_score_budget))
        .route("/api/v1/games/investment/score", post(http::http_score_investment))
        .route("/api/v1/game-scores", post(http::http_submit_game_score))
        .route("/api/v1/users/:id/game-scores", get(http::http_list_game_scores))
        .route(
            "/api/v1/users/:id/game-scores/:game_type/best",
            get(http::http_best_game_score),
        )
        // Dashboard extras
        .route("/api/v1/regional-data/:region", get(http::http_regional_data))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}
