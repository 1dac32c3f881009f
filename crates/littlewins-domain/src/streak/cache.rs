use chrono::NaiveDate;

/// Incrementally maintained streak counter.
///
/// Only a cache over [`streak_from_dates`](super::streak_from_dates): an entry
/// is valid for the single day it was computed on, a recorded win bumps it
/// the same way a fresh recomputation would, and anything else (deletion,
/// reload, sign-out) drops it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreakCache {
    entry: Option<CachedStreak>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CachedStreak {
    computed_for: NaiveDate,
    streak: u32,
    last_win_date: Option<NaiveDate>,
}

impl StreakCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached streak, if it was computed for `today`
    pub fn get(&self, today: NaiveDate) -> Option<u32> {
        self.entry
            .filter(|e| e.computed_for == today)
            .map(|e| e.streak)
    }

    pub fn store(&mut self, today: NaiveDate, streak: u32, last_win_date: Option<NaiveDate>) {
        self.entry = Some(CachedStreak {
            computed_for: today,
            streak,
            last_win_date,
        });
    }

    /// Account for a win dated `date` recorded on `today`.
    ///
    /// The first win of the day extends the streak by one; later wins on the
    /// same day leave it alone. Anything the counter cannot reason about
    /// invalidates the cache.
    pub fn record_win(&mut self, date: NaiveDate, today: NaiveDate) {
        let Some(mut entry) = self.entry.filter(|e| e.computed_for == today) else {
            self.entry = None;
            return;
        };

        if date != today {
            self.entry = None;
            return;
        }

        if entry.last_win_date != Some(today) {
            entry.streak += 1;
            entry.last_win_date = Some(today);
        }
        self.entry = Some(entry);
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_valid_for(&self, today: NaiveDate) -> bool {
        self.get(today).is_some()
    }
}
