pub mod leaderboard_state;
