pub mod leaderboard_handler;
