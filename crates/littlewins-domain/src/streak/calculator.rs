use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::win::WinCollection;

/// Consecutive days with at least one win, ending at the anchor day.
///
/// The anchor is `today` when today has a win, otherwise yesterday when
/// yesterday has one. With neither, the streak is broken and the result is 0.
/// Only the set of dates matters; ids, texts and times of day are ignored.
pub fn streak_from_dates(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let anchor = if dates.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if dates.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    let mut day = anchor;
    while dates.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// Current streak for a collection as of `today`
pub fn current_streak(wins: &WinCollection, today: NaiveDate) -> u32 {
    if wins.is_empty() {
        return 0;
    }
    streak_from_dates(&wins.dates(), today)
}

pub fn has_entry_today(wins: &WinCollection, today: NaiveDate) -> bool {
    wins.has_entry_on(today)
}

/// Most recent win day that is not after `today`. Future-dated days are
/// ignored, the same way the streak ignores them.
pub fn last_win_date(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> Option<NaiveDate> {
    dates.range(..=today).next_back().copied()
}

/// Longest run of consecutive days anywhere in history
pub fn longest_streak(dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for &date in dates {
        run = match prev {
            Some(p) if (date - p).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }

    longest
}

/// Everything the history panel shows about streaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_win_days: u32,
    pub last_win_date: Option<NaiveDate>,
    pub has_entry_today: bool,
}

impl StreakSummary {
    pub fn compute(wins: &WinCollection, today: NaiveDate) -> Self {
        let dates = wins.dates();

        Self {
            current_streak: streak_from_dates(&dates, today),
            longest_streak: longest_streak(&dates),
            total_win_days: dates.len() as u32,
            last_win_date: last_win_date(&dates, today),
            has_entry_today: dates.contains(&today),
        }
    }
}
