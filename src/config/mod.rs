pub mod leaderboard_config;
pub mod parameter;
