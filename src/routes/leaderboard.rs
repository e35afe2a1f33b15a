use crate::handler::leaderboard_handler;
use crate::repository::activity_repository::ActivityStore;
use crate::state::leaderboard_state::LeaderboardState;
use axum::{routing::get, Router};

pub fn routes<S: ActivityStore + 'static>() -> Router<LeaderboardState<S>> {
    Router::new().route(
        "/leaderboards",
        get(leaderboard_handler::get_leaderboards::<S>),
    )
}
