pub mod activity;
pub mod leaderboard;
