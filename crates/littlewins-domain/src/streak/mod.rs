mod cache;
mod calculator;


pub use cache::StreakCache;
pub use calculator::{
    current_streak, has_entry_today, last_win_date, longest_streak, streak_from_dates, StreakSummary,
};
