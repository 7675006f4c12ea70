//! Route configuration for the HTTP API.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::*;
use super::state::ApiState;

/// Create the full router with all routes.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<ApiState> {
    Router::new()
        .route("/question", get(question_handler))
        .route("/answer", post(answer_handler))
        .route("/leaderboard", get(leaderboard_handler))
        .route("/users", post(create_user_handler))
        .route("/stats", get(stats_handler))
        .route("/admin/start", post(admin_start_handler))
        .route("/admin/reset", post(admin_reset_handler))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use mathdash_common::EventBus;
    use mathdash_engine::SessionController;
    use mathdash_ledger::{MemoryLedger, ScoreLedger};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn create_test_state() -> (ApiState, Arc<MemoryLedger>) {
        let ledger = Arc::new(MemoryLedger::new());
        let controller = SessionController::from_config(
            &Default::default(),
            ledger.clone(),
            Arc::new(EventBus::default()),
        );
        (ApiState::new(controller, ledger.clone()), ledger)
    }

    async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (state, _) = create_test_state();
        let (status, body) = call(create_router(state), get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert!(body["uptimeSecs"].is_u64());
    }

    #[tokio::test]
    async fn test_question_before_any_round() {
        let (state, _) = create_test_state();
        let (status, body) = call(create_router(state), get_req("/api/question")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["question"].is_null());
        assert_eq!(body["round"]["isActive"], false);
    }

    #[tokio::test]
    async fn test_admin_start_then_question() {
        let (state, _) = create_test_state();
        let app = create_router(state.clone());

        let (status, started) = call(app.clone(), post_json("/api/admin/start", json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(started["round"]["isActive"], true);
        assert_eq!(started["question"]["difficulty"], "easy");
        assert!(started["question"].get("answer").is_none());

        let (_, body) = call(app, get_req("/api/question")).await;
        assert_eq!(body["question"]["id"], started["question"]["id"]);
        state.controller.cancel_pending_advance();
    }

    #[tokio::test]
    async fn test_answer_flow() {
        let (state, ledger) = create_test_state();
        let app = create_router(state.clone());
        state.controller.force_start();
        let truth = state.controller.snapshot().question.unwrap().answer;

        let (status, body) = call(
            app.clone(),
            post_json("/api/answer", json!({"username": "alice", "answer": truth + 5.0})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isCorrect"], false);

        let (_, body) = call(
            app.clone(),
            post_json(
                "/api/answer",
                json!({"username": "alice", "answer": truth, "userId": "u-1"}),
            ),
        )
        .await;
        assert_eq!(body["isCorrect"], true);
        assert_eq!(body["isWinner"], true);

        let (_, body) = call(
            app.clone(),
            post_json("/api/answer", json!({"username": "bob", "answer": truth})),
        )
        .await;
        assert_eq!(body["isCorrect"], true);
        assert_eq!(body["isWinner"], false);

        let (_, stats) = call(app, get_req("/api/stats")).await;
        assert_eq!(stats["isActive"], false);
        assert_eq!(stats["currentWinner"]["username"], "alice");
        state.controller.cancel_pending_advance();

        for _ in 0..10 {
            if ledger.score("alice").await.is_some() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(ledger.score("alice").await.unwrap().wins, 1);
    }

    #[tokio::test]
    async fn test_answer_validation() {
        let (state, _) = create_test_state();
        let app = create_router(state);

        let (status, body) = call(
            app.clone(),
            post_json("/api/answer", json!({"username": "a", "answer": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("username"));

        let (status, _) = call(
            app,
            post_json("/api/answer", json!({"username": "alice", "answer": "twelve"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_answer_without_round() {
        let (state, _) = create_test_state();
        let (status, body) = call(
            create_router(state),
            post_json("/api/answer", json!({"username": "alice", "answer": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isCorrect"], false);
        assert_eq!(body["isWinner"], false);
        assert_eq!(body["timeTaken"], 0);
    }

    #[tokio::test]
    async fn test_leaderboard_limit_is_clamped() {
        let (state, ledger) = create_test_state();
        for i in 0..60 {
            ledger.record_win(&format!("player{i:02}"), i + 1).await.unwrap();
        }
        let app = create_router(state);

        let (status, body) = call(app.clone(), get_req("/api/leaderboard?limit=200")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["limit"], 50);
        assert_eq!(body["entries"].as_array().unwrap().len(), 50);
        assert_eq!(body["entries"][0]["username"], "player59");
        assert_eq!(body["entries"][0]["highScore"], 60);

        let (_, body) = call(app.clone(), get_req("/api/leaderboard")).await;
        assert_eq!(body["entries"].as_array().unwrap().len(), 10);

        let (_, body) = call(app, get_req("/api/leaderboard?limit=0")).await;
        assert_eq!(body["limit"], 1);
    }

    #[tokio::test]
    async fn test_register_user() {
        let (state, _) = create_test_state();
        let app = create_router(state);

        let (status, body) = call(
            app.clone(),
            post_json("/api/users", json!({"username": " alice ", "email": "a@b.co"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["username"], "alice");
        assert_eq!(body["email"], "a@b.co");
        assert!(body["userId"].is_string());

        let (status, _) = call(
            app.clone(),
            post_json("/api/users", json!({"username": "ALICE"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = call(
            app.clone(),
            post_json("/api/users", json!({"username": "bob", "email": "not-an-email"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(app, post_json("/api/users", json!({"username": "x"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_admin_reset_closes_round() {
        let (state, _) = create_test_state();
        state.controller.force_start();
        let (status, body) = call(
            create_router(state.clone()),
            post_json("/api/admin/reset", json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "reset");
        assert_eq!(body["round"]["isActive"], false);
        assert!(!state.controller.has_pending_advance());
    }
}
