use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::to_utc;
use crate::shared::{DomainError, WinId};

/// One user-submitted achievement, attributed to a calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinRecord {
    id: WinId,
    text: String,
    date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl WinRecord {
    /// Create a new win submitted at `now` (observer local time).
    ///
    /// The text is trimmed; `date` is the local calendar day of `now` and is
    /// never recomputed afterwards.
    pub fn new(text: &str, now: DateTime<FixedOffset>) -> Result<Self, DomainError> {
        let text = validate_win_text(text)?;

        Ok(Self {
            id: WinId::new(),
            text,
            date: now.date_naive(),
            created_at: to_utc(now),
        })
    }

    /// Restore a win from persistence
    pub fn restore(id: WinId, text: String, date: NaiveDate, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            date,
            created_at,
        }
    }

    pub fn id(&self) -> &WinId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Trim `text` and reject it if nothing is left
pub fn validate_win_text(text: &str) -> Result<String, DomainError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(
            "Win text cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
