use crate::config::leaderboard_config::LeaderboardConfig;
use crate::db::database::Database;
use crate::repository::activity_repository::{ActivityRepository, ActivityStore};
use crate::service::leaderboard_service::LeaderboardService;
use std::sync::Arc;

pub struct LeaderboardState<S: ActivityStore> {
    pub leaderboard_service: Arc<LeaderboardService<S>>,
}

// 手写 Clone，避免 derive 要求 S: Clone
impl<S: ActivityStore> Clone for LeaderboardState<S> {
    fn clone(&self) -> Self {
        Self {
            leaderboard_service: Arc::clone(&self.leaderboard_service),
        }
    }
}

impl LeaderboardState<ActivityRepository> {
    pub fn new(db_conn: &Arc<Database>, config: LeaderboardConfig) -> Self {
        Self::with_store(Arc::new(ActivityRepository::new(db_conn)), config)
    }
}

impl<S: ActivityStore> LeaderboardState<S> {
    pub fn with_store(store: Arc<S>, config: LeaderboardConfig) -> Self {
        Self {
            leaderboard_service: Arc::new(LeaderboardService::new(store, config)),
        }
    }
}
