use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use littlewins_domain::win::WinRecord;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinDto {
    pub id: String,
    pub text: String,
    pub date: String,         // YYYY-MM-DD
    pub display_date: String, // "Oct 19", or "Oct 19, 2025" outside the current year
    pub created_at: String,   // RFC 3339, UTC
}

impl WinDto {
    pub fn from_record(win: &WinRecord, today: NaiveDate) -> Self {
        Self {
            id: win.id().as_str().to_string(),
            text: win.text().to_string(),
            date: win.date().format("%Y-%m-%d").to_string(),
            display_date: display_date(win.date(), today),
            created_at: win.created_at().to_rfc3339(),
        }
    }
}

/// Short month and day; the year is added only when it is not the current one
pub fn display_date(date: NaiveDate, today: NaiveDate) -> String {
    if date.year() == today.year() {
        date.format("%b %-d").to_string()
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_display_date_omits_current_year() {
        assert_eq!(display_date(day(2026, 10, 19), day(2026, 10, 19)), "Oct 19");
        assert_eq!(display_date(day(2026, 3, 5), day(2026, 10, 19)), "Mar 5");
    }

    #[test]
    fn test_display_date_shows_other_years() {
        assert_eq!(
            display_date(day(2025, 12, 31), day(2026, 1, 1)),
            "Dec 31, 2025"
        );
    }

    #[test]
    fn test_from_record_uses_local_date() {
        let now = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 19, 0, 30, 0)
            .unwrap();
        let win = WinRecord::new("Early bird", now).unwrap();

        let dto = WinDto::from_record(&win, day(2026, 10, 19));

        assert_eq!(dto.date, "2026-10-19");
        assert_eq!(dto.display_date, "Oct 19");
        assert!(dto.created_at.starts_with("2026-10-18T22:30:00"));
    }
}
