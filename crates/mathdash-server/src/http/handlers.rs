//! HTTP request handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mathdash_common::new_id;
use mathdash_ledger::clamp_limit;

use super::error::ApiError;
use super::state::ApiState;
use super::types::*;
use crate::validation::{parse_answer, validate_email, validate_username};

/// Handler for `GET /health`.
pub async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// Handler for `GET /api/question`.
pub async fn question_handler(State(state): State<ApiState>) -> impl IntoResponse {
    Json(QuestionResponse {
        question: state.controller.current_question(),
        round: state.controller.round_info(),
    })
}

/// Handler for `POST /api/answer`.
pub async fn answer_handler(
    State(state): State<ApiState>,
    Json(req): Json<AnswerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = validate_username(&req.username)?;
    let answer = parse_answer(&req.answer)?;
    let user_id = req
        .user_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(new_id);

    let result = state.controller.submit_answer(&user_id, &username, answer);
    Ok(Json(result))
}

/// Handler for `GET /api/leaderboard?limit=N`.
pub async fn leaderboard_handler(
    State(state): State<ApiState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = clamp_limit(query.limit);
    let entries = state.ledger.leaderboard(limit).await?;
    Ok(Json(LeaderboardResponse { limit, entries }))
}

/// Handler for `POST /api/users`.
pub async fn create_user_handler(
    State(state): State<ApiState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = validate_username(&req.username)?;
    let email = match req.email.as_deref().filter(|e| !e.trim().is_empty()) {
        Some(raw) => Some(validate_email(raw)?),
        None => None,
    };

    let user = state
        .ledger
        .register_user(&username, email.as_deref())
        .await?;
    tracing::info!(user_id = %user.user_id, username = %user.username, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Handler for `GET /api/stats`.
pub async fn stats_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let stats = state.controller.stats();
    Json(StatsResponse {
        connected_count: stats.connected_count,
        is_active: stats.is_active,
        current_winner: stats.current_winner,
        rounds_started: stats.rounds_started,
        rounds_won: stats.rounds_won,
    })
}

/// Handler for `POST /api/admin/start`: start a round now.
pub async fn admin_start_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let question = state.controller.force_start();
    tracing::info!(question_id = %question.id, "Round started by admin");
    Json(QuestionResponse {
        question: Some(question.to_public()),
        round: state.controller.round_info(),
    })
}

/// Handler for `POST /api/admin/reset`.
pub async fn admin_reset_handler(State(state): State<ApiState>) -> impl IntoResponse {
    state.controller.reset();
    Json(ResetResponse {
        status: "reset".to_string(),
        round: state.controller.round_info(),
    })
}
