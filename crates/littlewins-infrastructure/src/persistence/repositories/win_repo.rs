use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;
use tracing::debug;

use crate::persistence::SqliteRepositoryBase;
use littlewins_domain::shared::{DomainError, UserId, WinId};
use littlewins_domain::win::{WinRecord, WinRepository};

#[derive(FromRow)]
struct WinRow {
    id: String,
    text: String,
    date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl WinRow {
    fn into_record(self) -> WinRecord {
        WinRecord::restore(
            WinId::from_string(&self.id),
            self.text,
            self.date,
            self.created_at,
        )
    }
}

pub struct SqliteWinRepository {
    base: SqliteRepositoryBase,
}

impl SqliteWinRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl WinRepository for SqliteWinRepository {
    async fn fetch_all(&self, user_id: &UserId) -> Result<Vec<WinRecord>, DomainError> {
        let query = r#"
            SELECT id, text, date, created_at
            FROM wins
            WHERE user_id = ?1
            ORDER BY created_at DESC
        "#;

        let rows: Vec<WinRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query).bind(user_id.as_str()),
                "Fetch wins",
            )
            .await?;

        debug!(user_id = %user_id, count = rows.len(), "Fetched wins");
        Ok(rows.into_iter().map(WinRow::into_record).collect())
    }

    async fn insert(&self, user_id: &UserId, win: &WinRecord) -> Result<WinRecord, DomainError> {
        let query = r#"
            INSERT INTO wins (id, user_id, text, date, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, text, date, created_at
        "#;

        let row: WinRow = self
            .base
            .fetch_one(
                sqlx::query_as(query)
                    .bind(win.id().as_str())
                    .bind(user_id.as_str())
                    .bind(win.text())
                    .bind(win.date())
                    .bind(win.created_at()),
                "Insert win",
            )
            .await?;

        Ok(row.into_record())
    }

    async fn delete(&self, id: &WinId, user_id: &UserId) -> Result<(), DomainError> {
        let result = self
            .base
            .execute(
                sqlx::query("DELETE FROM wins WHERE id = ?1 AND user_id = ?2")
                    .bind(id.as_str())
                    .bind(user_id.as_str()),
                "Delete win",
            )
            .await?;

        if result.rows_affected() == 0 {
            debug!(win_id = %id, user_id = %user_id, "Delete matched no rows");
        }

        Ok(())
    }
}
