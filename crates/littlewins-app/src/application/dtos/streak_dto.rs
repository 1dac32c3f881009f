use serde::{Deserialize, Serialize};

use littlewins_domain::streak::StreakSummary;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreakDto {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_win_days: u32,
    pub last_win_date: Option<String>, // ISO 8601 date (YYYY-MM-DD)
    pub has_entry_today: bool,
}

impl From<StreakSummary> for StreakDto {
    fn from(summary: StreakSummary) -> Self {
        Self {
            current_streak: summary.current_streak,
            longest_streak: summary.longest_streak,
            total_win_days: summary.total_win_days,
            last_win_date: summary
                .last_win_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
            has_entry_today: summary.has_entry_today,
        }
    }
}
