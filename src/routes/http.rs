//! HTTP endpoint handlers. These are thin wrappers that forward to core logic
//! and the in-memory stores; each handler is instrumented and logs basic
//! result info. Errors come back as `{ "error": ... }` with a 4xx status.

use std::sync::Arc;

use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use rand::thread_rng;
use tracing::{info, instrument};

use crate::catalog::{regional_snapshot, MONTHLY_INCOME};
use crate::domain::{Difficulty, GameType};
use crate::logic::{
  game_session, select_quiz, submit_game_score, submit_quiz_attempt, validate_allocations,
  validate_budget_items, validate_game_score, validate_quiz_attempt,
};
use crate::protocol::*;
use crate::scoring::{score_budget, score_investment};
use crate::state::AppState;

fn not_found(message: &str) -> (StatusCode, Json<ErrorOut>) {
  (StatusCode::NOT_FOUND, Json(ErrorOut { error: message.into() }))
}

fn bad_request(message: String) -> (StatusCode, Json<ErrorOut>) {
  (StatusCode::BAD_REQUEST, Json(ErrorOut { error: message }))
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

// -------- users --------

#[instrument(level = "info", skip(state, body), fields(username = %body.username))]
pub async fn http_create_user(
  State(state): State<Arc<AppState>>,
  Json(body): Json<NewUserIn>,
) -> impl IntoResponse {
  let user = state.create_user(body).await;
  info!(target: "finlit_backend", id = user.id, "User created");
  Json(user)
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_user(
  State(state): State<Arc<AppState>>,
  Path(id): Path<i64>,
) -> impl IntoResponse {
  match state.get_user(id).await {
    Some(user) => Json(user).into_response(),
    None => not_found("User not found").into_response(),
  }
}

#[instrument(level = "info", skip(state, email))]
pub async fn http_get_user_by_email(
  State(state): State<Arc<AppState>>,
  Path(email): Path<String>,
) -> impl IntoResponse {
  match state.get_user_by_email(&email).await {
    Some(user) => Json(user).into_response(),
    None => not_found("User not found").into_response(),
  }
}

#[instrument(level = "info", skip(state, body), fields(%id))]
pub async fn http_update_user(
  State(state): State<Arc<AppState>>,
  Path(id): Path<i64>,
  Json(body): Json<UserUpdateIn>,
) -> impl IntoResponse {
  match state.update_user(id, body).await {
    Some(user) => Json(user).into_response(),
    None => not_found("User not found").into_response(),
  }
}

// -------- progress --------

#[instrument(level = "info", skip(state), fields(user_id = %id))]
pub async fn http_list_progress(
  State(state): State<Arc<AppState>>,
  Path(id): Path<i64>,
) -> impl IntoResponse {
  Json(state.progress_for_user(id).await)
}

#[instrument(level = "info", skip(state), fields(user_id = %id, %module))]
pub async fn http_module_progress(
  State(state): State<Arc<AppState>>,
  Path((id, module)): Path<(i64, String)>,
) -> impl IntoResponse {
  // Mirrors the client contract: unknown module progress is `null`, not 404.
  Json(state.progress_for_module(id, &module).await)
}

#[instrument(level = "info", skip(state, body), fields(user_id = body.user_id, module = %body.module))]
pub async fn http_upsert_progress(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ProgressIn>,
) -> impl IntoResponse {
  let row = state
    .upsert_progress(body.user_id, &body.module, body.completed_lessons, body.total_lessons)
    .await;
  Json(row)
}

// -------- quizzes --------

#[instrument(level = "info", skip(state, q), fields(module = %q.module))]
pub async fn http_get_quiz(
  State(state): State<Arc<AppState>>,
  Query(q): Query<QuizQuery>,
) -> impl IntoResponse {
  let level = q.level.unwrap_or(Difficulty::Advanced);
  let count = q.count.unwrap_or(5);
  let questions = select_quiz(&state, &q.module, level, count).await;
  Json(questions)
}

#[instrument(level = "info", skip(state, body), fields(user_id = body.user_id, module = %body.module))]
pub async fn http_submit_quiz_attempt(
  State(state): State<Arc<AppState>>,
  Json(body): Json<QuizAttemptIn>,
) -> impl IntoResponse {
  if let Err(e) = validate_quiz_attempt(&body) {
    return bad_request(e).into_response();
  }
  let (attempt, points_earned) = submit_quiz_attempt(&state, body).await;
  Json(QuizAttemptOut { attempt, points_earned }).into_response()
}

#[instrument(level = "info", skip(state), fields(user_id = %id))]
pub async fn http_list_quiz_attempts(
  State(state): State<Arc<AppState>>,
  Path(id): Path<i64>,
) -> impl IntoResponse {
  Json(state.quiz_attempts_for_user(id).await)
}

#[instrument(level = "info", skip(state), fields(user_id = %id, %module))]
pub async fn http_list_quiz_attempts_by_module(
  State(state): State<Arc<AppState>>,
  Path((id, module)): Path<(i64, String)>,
) -> impl IntoResponse {
  Json(state.quiz_attempts_for_module(id, &module).await)
}

// -------- games --------

#[instrument(level = "info", fields(?game_type))]
pub async fn http_game_session(Path(game_type): Path<GameType>) -> impl IntoResponse {
  Json(game_session(game_type, &mut thread_rng()))
}

#[instrument(level = "info", skip(body), fields(items = body.items.len()))]
pub async fn http_score_budget(Json(body): Json<BudgetScoreIn>) -> impl IntoResponse {
  if let Err(e) = validate_budget_items(&body.items) {
    return bad_request(e).into_response();
  }
  let income = body.monthly_income.unwrap_or(MONTHLY_INCOME);
  if income <= 0.0 {
    return bad_request("monthlyIncome must be positive".into()).into_response();
  }
  let score = score_budget(&body.items, income);
  info!(target: "game", score, "Budget scored");
  Json(ScoreOut { score }).into_response()
}

#[instrument(level = "info", skip(body), fields(options = body.options.len(), market = ?body.market_condition))]
pub async fn http_score_investment(Json(body): Json<InvestmentScoreIn>) -> impl IntoResponse {
  if let Err(e) = validate_allocations(&body.options) {
    return bad_request(e).into_response();
  }
  let score = score_investment(&body.options, body.market_condition);
  info!(target: "game", score, "Portfolio scored");
  Json(ScoreOut { score }).into_response()
}

#[instrument(level = "info", skip(state, body), fields(user_id = body.user_id, game_type = ?body.game_type))]
pub async fn http_submit_game_score(
  State(state): State<Arc<AppState>>,
  Json(body): Json<GameScoreIn>,
) -> impl IntoResponse {
  if let Err(e) = validate_game_score(&body) {
    return bad_request(e).into_response();
  }
  let (game_score, points_earned) = submit_game_score(&state, body).await;
  Json(GameScoreOut { game_score, points_earned }).into_response()
}

#[instrument(level = "info", skip(state), fields(user_id = %id))]
pub async fn http_list_game_scores(
  State(state): State<Arc<AppState>>,
  Path(id): Path<i64>,
) -> impl IntoResponse {
  Json(state.game_scores_for_user(id).await)
}

#[instrument(level = "info", skip(state), fields(user_id = %id, ?game_type))]
pub async fn http_best_game_score(
  State(state): State<Arc<AppState>>,
  Path((id, game_type)): Path<(i64, GameType)>,
) -> impl IntoResponse {
  // `null` when the user has no rounds of this game yet.
  Json(state.best_game_score(id, game_type).await)
}

// -------- dashboard extras --------

#[instrument(level = "info", fields(%region))]
pub async fn http_regional_data(Path(region): Path<String>) -> impl IntoResponse {
  match regional_snapshot(&region) {
    Some(snapshot) => Json(snapshot).into_response(),
    None => not_found("Regional data not found").into_response(),
  }
}
