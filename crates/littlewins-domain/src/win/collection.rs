use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::WinRecord;
use crate::shared::WinId;

/// The current user's wins, most recent first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WinCollection {
    wins: Vec<WinRecord>,
}

impl WinCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from stored records in any order
    pub fn from_records(mut wins: Vec<WinRecord>) -> Self {
        wins.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Self { wins }
    }

    pub fn len(&self) -> usize {
        self.wins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WinRecord> {
        self.wins.iter()
    }

    pub fn get(&self, id: &WinId) -> Option<&WinRecord> {
        self.wins.iter().find(|w| w.id() == id)
    }

    pub fn latest(&self) -> Option<&WinRecord> {
        self.wins.first()
    }

    /// Distinct calendar days that hold at least one win
    pub fn dates(&self) -> BTreeSet<NaiveDate> {
        self.wins.iter().map(WinRecord::date).collect()
    }

    pub fn has_entry_on(&self, date: NaiveDate) -> bool {
        self.wins.iter().any(|w| w.date() == date)
    }

    /// Put a freshly recorded win in front of the others
    pub fn prepend(&mut self, win: WinRecord) {
        self.wins.insert(0, win);
    }

    /// Remove the win with `id`; a missing id leaves the collection as is
    pub fn remove(&mut self, id: &WinId) -> Option<WinRecord> {
        let index = self.wins.iter().position(|w| w.id() == id)?;
        Some(self.wins.remove(index))
    }

    pub fn clear(&mut self) {
        self.wins.clear();
    }
}

impl<'a> IntoIterator for &'a WinCollection {
    type Item = &'a WinRecord;
    type IntoIter = std::slice::Iter<'a, WinRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.wins.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn win(id: &str, y: i32, m: u32, d: u32, h: u32) -> WinRecord {
        WinRecord::restore(
            WinId::from_string(id),
            format!("win {id}"),
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_from_records_orders_most_recent_first() {
        let collection = WinCollection::from_records(vec![
            win("a", 2026, 10, 17, 8),
            win("c", 2026, 10, 19, 8),
            win("b", 2026, 10, 19, 7),
        ]);

        let ids: Vec<&str> = collection.iter().map(|w| w.id().as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
        assert_eq!(collection.latest().map(|w| w.id().as_str()), Some("c"));
    }

    #[test]
    fn test_dates_collapse_same_day() {
        let collection = WinCollection::from_records(vec![
            win("a", 2026, 10, 19, 8),
            win("b", 2026, 10, 19, 9),
            win("c", 2026, 10, 18, 9),
        ]);
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.dates().len(), 2);
        assert!(collection.has_entry_on(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()));
        assert!(!collection.has_entry_on(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()));
    }

    #[test]
    fn test_prepend_and_remove() {
        let mut collection = WinCollection::from_records(vec![win("a", 2026, 10, 18, 8)]);
        collection.prepend(win("b", 2026, 10, 19, 8));
        assert_eq!(collection.latest().map(|w| w.id().as_str()), Some("b"));

        let removed = collection.remove(&WinId::from_string("a"));
        assert!(removed.is_some());
        assert!(collection.remove(&WinId::from_string("missing")).is_none());
        assert_eq!(collection.len(), 1);
    }
}
