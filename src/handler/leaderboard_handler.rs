use crate::dto::leaderboard_dto::{LeaderboardReq, LeaderboardResponse};
use crate::error::{api_error::ApiError, request_error::ValidatedQuery};
use crate::repository::activity_repository::ActivityStore;
use crate::response::api_response::ApiSuccessResponse;
use crate::state::leaderboard_state::LeaderboardState;
use axum::{extract::State, Json};
use axum_macros::debug_handler;

pub async fn get_leaderboards<S: ActivityStore + 'static>(
    State(state): State<LeaderboardState<S>>,
    ValidatedQuery(payload): ValidatedQuery<LeaderboardReq>,
) -> Result<Json<ApiSuccessResponse<LeaderboardResponse>>, ApiError> {
    let res = state.leaderboard_service.get_leaderboards(&payload).await?;
    Ok(Json(ApiSuccessResponse::send(res)))
}

#[debug_handler]
pub async fn health() -> &'static str {
    "Healthy..."
}
