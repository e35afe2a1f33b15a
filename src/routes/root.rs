use crate::config::leaderboard_config::LeaderboardConfig;
use crate::db::database::Database;
use crate::handler::leaderboard_handler;
use crate::repository::activity_repository::ActivityStore;
use crate::routes::leaderboard;
use crate::state::leaderboard_state::LeaderboardState;
use axum::routing::{get, IntoMakeService};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn routes(db_conn: Arc<Database>, config: LeaderboardConfig) -> IntoMakeService<Router> {
    let leaderboard_state = LeaderboardState::new(&db_conn, config);
    app(leaderboard_state).into_make_service()
}

pub fn app<S: ActivityStore + 'static>(leaderboard_state: LeaderboardState<S>) -> Router {
    let merged_router = Router::new()
        .merge(leaderboard::routes().with_state(leaderboard_state))
        .merge(Router::new().route("/health", get(leaderboard_handler::health)));

    Router::new()
        .nest("/api", merged_router)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::activity::ClassInfo;
    use crate::repository::activity_repository::MockActivityStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn router(store: MockActivityStore) -> Router {
        app(LeaderboardState::with_store(
            Arc::new(store),
            LeaderboardConfig::default(),
        ))
    }

    async fn call(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn store_with_empty_class() -> MockActivityStore {
        let mut store = MockActivityStore::new();
        store.expect_fetch_owned_classes().returning(|_| {
            Ok(vec![ClassInfo {
                id: "c1".to_string(),
                name: "7B".to_string(),
            }])
        });
        store.expect_fetch_enrollments().returning(|_| Ok(vec![]));
        store
    }

    #[tokio::test]
    async fn leaderboards_are_wrapped_in_success_envelope() {
        let (status, body) = call(
            router(store_with_empty_class()),
            "/api/leaderboards?requesterId=t1&limit=5",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], 0);
        assert_eq!(body["msg"], "success");
        let data = &body["data"];
        assert_eq!(data["students"], Value::Array(vec![]));
        assert_eq!(data["classes"][0]["classId"], "c1");
        assert_eq!(data["classes"][0]["totalPoints"], 0);
        assert_eq!(data["classes"][0]["rank"], 1);
        assert!(data["classes"][0].get("topStudent").is_none());
        assert_eq!(data["summary"]["totalXP"], 0);
        assert_eq!(data["summary"]["timePeriod"], "weekly");
        assert_eq!(data["crossLeaderboard"], Value::Array(vec![]));
    }

    #[tokio::test]
    async fn unknown_time_period_means_all_time() {
        let (status, body) = call(
            router(store_with_empty_class()),
            "/api/leaderboards?requesterId=t1&timePeriod=yearly",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["summary"]["timePeriod"], "all_time");
    }

    #[tokio::test]
    async fn out_of_range_limit_is_rejected() {
        let (status, body) = call(
            router(MockActivityStore::new()),
            "/api/leaderboards?requesterId=t1&limit=0",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 20001);
    }

    #[tokio::test]
    async fn missing_requester_is_rejected() {
        let (status, body) = call(router(MockActivityStore::new()), "/api/leaderboards").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 20002);
    }

    #[tokio::test]
    async fn upstream_failure_is_internal_error() {
        let mut store = MockActivityStore::new();
        store
            .expect_fetch_owned_classes()
            .returning(|_| Err(sqlx::Error::PoolTimedOut));
        let (status, body) = call(router(store), "/api/leaderboards?requesterId=t1").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], 13001);
    }

    #[tokio::test]
    async fn health_check() {
        let response = router(MockActivityStore::new())
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"Healthy...");
    }
}
