use log::debug;

use crate::application::dtos::{StreakDto, WinDto};
use crate::application::services::WinStore;

/// Streak statistics as of today.
///
/// The current streak goes through the store's cache; everything else is
/// recomputed from the collection.
pub fn get_streak_stats(store: &mut WinStore) -> StreakDto {
    let current_streak = store.current_streak();
    let mut dto = StreakDto::from(store.summary());
    dto.current_streak = current_streak;

    debug!(
        "[streak] get_streak_stats current={} longest={} total={} today={}",
        dto.current_streak, dto.longest_streak, dto.total_win_days, dto.has_entry_today
    );

    dto
}

/// Win history, most recent first
pub fn get_win_history(store: &WinStore) -> Vec<WinDto> {
    let today = store.today();
    store
        .wins()
        .iter()
        .map(|win| WinDto::from_record(win, today))
        .collect()
}
