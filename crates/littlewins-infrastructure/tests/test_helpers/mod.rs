use chrono::{DateTime, FixedOffset, TimeZone};
use sqlx::SqlitePool;

use littlewins_infrastructure::persistence::Database;

/// Fresh in-memory database with the schema applied
pub async fn setup_in_memory_db() -> SqlitePool {
    let db = Database::in_memory().await.expect("open in-memory db");
    db.run_migrations().await.expect("run migrations");
    db.pool().clone()
}

/// Local time at UTC+2 on 2026-10-`day`
pub fn local(day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2026, 10, day, hour, minute, 0)
        .unwrap()
}
