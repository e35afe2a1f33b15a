pub mod leaderboard_service;
pub mod scope_resolver;
