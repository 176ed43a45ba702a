pub mod leaderboard;
pub mod scores;
pub mod settlement;
