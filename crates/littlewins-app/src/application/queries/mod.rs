mod win_queries;

pub use win_queries::{get_streak_stats, get_win_history};
