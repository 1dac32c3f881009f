use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::application::config::AppConfig;
use crate::application::services::{SessionController, WinStore};
use crate::presentation::state::AppState;
use littlewins_domain::clock::{Clock, SystemClock};
use littlewins_domain::feedback::{CelebrationEffect, MessageSelector};
use littlewins_domain::shared::UserId;
use littlewins_domain::win::WinRepository;
use littlewins_infrastructure::feedback::{
    RandomMessageSelector, SeededMessageSelector, TerminalCelebration,
};
use littlewins_infrastructure::identity::LocalIdentity;
use littlewins_infrastructure::persistence::{
    repositories::{InMemoryWinRepository, SqliteWinRepository},
    Database,
};

/// Where wins are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Sqlite,
    InMemory,
}

pub async fn build_app_state(
    config: AppConfig,
    storage: Storage,
) -> Result<AppState, Box<dyn std::error::Error>> {
    build_app_state_with(
        config,
        storage,
        Arc::new(SystemClock),
        Arc::new(TerminalCelebration::stdout()),
    )
    .await
}

/// Like [`build_app_state`] with the clock and celebration supplied
pub async fn build_app_state_with(
    config: AppConfig,
    storage: Storage,
    clock: Arc<dyn Clock>,
    celebration: Arc<dyn CelebrationEffect>,
) -> Result<AppState, Box<dyn std::error::Error>> {
    let startup_started_at = Instant::now();

    let (repo, db): (Arc<dyn WinRepository>, Option<Arc<Database>>) = match storage {
        Storage::Sqlite => {
            let started_at = Instant::now();
            let db_path = config.database_path();
            let db_path_str = db_path.to_str().ok_or("Invalid database path")?;
            info!("Database path: {}", db_path_str);

            let db = Database::new(db_path_str).await?;
            db.run_migrations().await?;
            info!(
                "✓ Database ready ({}ms)",
                started_at.elapsed().as_millis()
            );

            let pool = Arc::new(db.pool().clone());
            (Arc::new(SqliteWinRepository::new(pool)), Some(Arc::new(db)))
        }
        Storage::InMemory => {
            info!("Using in-memory storage, wins will not be kept");
            (Arc::new(InMemoryWinRepository::new()), None)
        }
    };

    let identity = Arc::new(LocalIdentity::new(
        config.user_id.as_deref().map(UserId::from_string),
    ));
    if config.user_id.is_none() {
        warn!("No user configured, running an anonymous session");
    }

    let selector: Box<dyn MessageSelector> = match config.message_seed {
        Some(seed) => Box::new(SeededMessageSelector::new(seed)),
        None => Box::new(RandomMessageSelector),
    };
    let session = SessionController::new(celebration, selector, config.message_pool()?)
        .with_visible_duration(config.message_duration());

    let mut store = WinStore::new(repo, identity.clone(), clock);
    store.load().await?;

    info!(
        "✓ Startup complete ({}ms, {} wins)",
        startup_started_at.elapsed().as_millis(),
        store.wins().len()
    );

    Ok(AppState {
        config,
        identity,
        store,
        session,
        db,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use littlewins_domain::clock::FixedClock;
    use littlewins_domain::win::WinRecord;

    struct Quiet;

    impl CelebrationEffect for Quiet {
        fn celebrate(&self, _win: &WinRecord) {}
    }

    fn clock() -> Arc<FixedClock> {
        Arc::new(FixedClock::at_noon(
            chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        ))
    }

    #[tokio::test]
    async fn test_wins_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            database_path: Some(dir.path().join("data").join("wins.db")),
            user_id: Some("alice".to_string()),
            ..AppConfig::default()
        };

        let mut state = build_app_state_with(
            config.clone(),
            Storage::Sqlite,
            clock(),
            Arc::new(Quiet),
        )
        .await
        .unwrap();
        state.store.add_win("Fixed the leaky tap").await.unwrap();
        drop(state);

        let state = build_app_state_with(config, Storage::Sqlite, clock(), Arc::new(Quiet))
            .await
            .unwrap();
        assert_eq!(state.store.wins().len(), 1);
        assert_eq!(
            state.store.wins().latest().unwrap().text(),
            "Fixed the leaky tap"
        );
        assert!(state.db.is_some());
    }

    #[tokio::test]
    async fn test_in_memory_session_starts_empty() {
        let config = AppConfig {
            user_id: Some("alice".to_string()),
            message_visible_ms: 1500,
            ..AppConfig::default()
        };

        let state = build_app_state_with(config, Storage::InMemory, clock(), Arc::new(Quiet))
            .await
            .unwrap();

        assert!(state.store.wins().is_empty());
        assert!(state.db.is_none());
        assert_eq!(
            state.session.visible_duration(),
            std::time::Duration::from_millis(1500)
        );
    }

    #[tokio::test]
    async fn test_empty_custom_messages_fail_startup() {
        let config = AppConfig {
            messages: Some(vec!["  ".to_string()]),
            ..AppConfig::default()
        };

        let result =
            build_app_state_with(config, Storage::InMemory, clock(), Arc::new(Quiet)).await;
        assert!(result.is_err());
    }
}
