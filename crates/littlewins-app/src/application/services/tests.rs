use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, FixedOffset, TimeZone};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::application::config::DEFAULT_MESSAGE_VISIBLE_MS;
use crate::application::services::{FeedbackState, SessionController, WinStore};
use littlewins_domain::clock::FixedClock;
use littlewins_domain::feedback::{
    CelebrationEffect, MessagePool, MessageSelector, DEFAULT_MESSAGES,
};
use littlewins_domain::shared::{DomainError, ErrorCode, UserId, WinId};
use littlewins_domain::streak;
use littlewins_domain::win::{WinRecord, WinRepository};
use littlewins_infrastructure::identity::LocalIdentity;

// Mock repositories and collaborators for testing

struct MockWinRepository {
    rows: tokio::sync::RwLock<HashMap<String, Vec<WinRecord>>>,
    insert_calls: AtomicUsize,
    failing: AtomicBool,
}

impl MockWinRepository {
    fn new() -> Self {
        Self {
            rows: tokio::sync::RwLock::new(HashMap::new()),
            insert_calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    fn fail_from_now_on(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    async fn stored_for(&self, user: &UserId) -> usize {
        let rows = self.rows.read().await;
        rows.get(user.as_str()).map_or(0, Vec::len)
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::Storage("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl WinRepository for MockWinRepository {
    async fn fetch_all(&self, user_id: &UserId) -> Result<Vec<WinRecord>, DomainError> {
        self.check()?;
        let rows = self.rows.read().await;
        let mut wins = rows.get(user_id.as_str()).cloned().unwrap_or_default();
        wins.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(wins)
    }

    async fn insert(&self, user_id: &UserId, win: &WinRecord) -> Result<WinRecord, DomainError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut rows = self.rows.write().await;
        rows.entry(user_id.as_str().to_string())
            .or_default()
            .push(win.clone());
        Ok(win.clone())
    }

    async fn delete(&self, id: &WinId, user_id: &UserId) -> Result<(), DomainError> {
        self.check()?;
        let mut rows = self.rows.write().await;
        if let Some(wins) = rows.get_mut(user_id.as_str()) {
            wins.retain(|w| w.id() != id);
        }
        Ok(())
    }
}

mockall::mock! {
    pub FlakyRepo {}

    #[async_trait]
    impl WinRepository for FlakyRepo {
        async fn fetch_all(&self, user_id: &UserId) -> Result<Vec<WinRecord>, DomainError>;
        async fn insert(&self, user_id: &UserId, win: &WinRecord) -> Result<WinRecord, DomainError>;
        async fn delete(&self, id: &WinId, user_id: &UserId) -> Result<(), DomainError>;
    }
}

#[derive(Default)]
struct CountingCelebration {
    count: AtomicUsize,
}

impl CountingCelebration {
    fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl CelebrationEffect for CountingCelebration {
    fn celebrate(&self, _win: &WinRecord) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

struct Always(usize);

impl MessageSelector for Always {
    fn select(&mut self, _len: usize) -> usize {
        self.0
    }
}

/// 2026-10-`day` at `hour`:`minute` in UTC+2
fn local(day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2026, 10, day, hour, minute, 0)
        .unwrap()
}

struct Fixture {
    repo: Arc<MockWinRepository>,
    identity: Arc<LocalIdentity>,
    clock: Arc<FixedClock>,
    store: WinStore,
}

fn fixture(user: Option<&str>) -> Fixture {
    let repo = Arc::new(MockWinRepository::new());
    let identity = Arc::new(LocalIdentity::new(user.map(UserId::from_string)));
    let clock = Arc::new(FixedClock::new(local(19, 10, 0)));
    let store = WinStore::new(repo.clone(), identity.clone(), clock.clone());
    Fixture {
        repo,
        identity,
        clock,
        store,
    }
}

fn controller(celebration: Arc<CountingCelebration>, pick: usize) -> SessionController {
    SessionController::new(celebration, Box::new(Always(pick)), MessagePool::default())
}

// WinStore

#[tokio::test]
async fn test_load_without_user_yields_empty_collection() {
    let mut f = fixture(None);

    f.store.load().await.unwrap();

    assert!(f.store.is_loaded());
    assert!(f.store.wins().is_empty());
    assert!(f.store.owner().is_none());
    assert_eq!(f.store.current_streak(), 0);
}

#[tokio::test]
async fn test_add_win_without_user_is_rejected() {
    let mut f = fixture(None);

    let err = f.store.add_win("Went for a run").await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::Unauthenticated);
    assert_eq!(f.repo.insert_calls(), 0);
    assert!(f.store.wins().is_empty());
}

#[tokio::test]
async fn test_blank_text_is_rejected_before_store_call() {
    let mut f = fixture(Some("alice"));
    f.store.load().await.unwrap();

    for text in ["", "   ", "\t\n"] {
        let err = f.store.add_win(text).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    assert_eq!(f.repo.insert_calls(), 0);
    assert!(f.store.wins().is_empty());
}

#[tokio::test]
async fn test_add_win_prepends_trimmed_record_dated_today() {
    let mut f = fixture(Some("alice"));
    f.store.load().await.unwrap();

    let first = f.store.add_win("  Drank water  ").await.unwrap();
    f.clock.advance(ChronoDuration::minutes(5));
    let second = f.store.add_win("Read a chapter").await.unwrap();

    assert_eq!(first.text(), "Drank water");
    assert_eq!(first.date(), local(19, 0, 0).date_naive());
    assert_eq!(f.store.wins().len(), 2);
    assert_eq!(f.store.wins().latest().unwrap().id(), second.id());
    assert_eq!(f.repo.stored_for(&UserId::from_string("alice")).await, 2);
}

#[tokio::test]
async fn test_late_evening_win_keeps_local_date() {
    let mut f = fixture(Some("alice"));
    f.clock.set(local(19, 23, 30));
    f.store.load().await.unwrap();

    let win = f.store.add_win("Late night journaling").await.unwrap();

    // 21:30 UTC, still the 19th locally
    assert_eq!(win.date(), local(19, 0, 0).date_naive());
    assert!(f.store.has_entry_today());
}

#[tokio::test]
async fn test_two_wins_same_day_count_once() {
    let mut f = fixture(Some("alice"));
    f.store.load().await.unwrap();

    f.store.add_win("Morning walk").await.unwrap();
    assert_eq!(f.store.current_streak(), 1);
    f.store.add_win("Cooked dinner").await.unwrap();

    assert_eq!(f.store.wins().len(), 2);
    assert_eq!(f.store.current_streak(), 1);
    assert!(f.store.has_entry_today());
}

#[tokio::test]
async fn test_failed_insert_leaves_collection_untouched() {
    let existing = WinRecord::new("Yesterday's win", local(18, 9, 0)).unwrap();
    let mut repo = MockFlakyRepo::new();
    let seeded = existing.clone();
    repo.expect_fetch_all()
        .returning(move |_| Ok(vec![seeded.clone()]));
    repo.expect_insert()
        .times(1)
        .returning(|_, _| Err(DomainError::Storage("disk full".to_string())));
    repo.expect_delete().never();

    let identity = Arc::new(LocalIdentity::new(Some(UserId::from_string("alice"))));
    let clock = Arc::new(FixedClock::new(local(19, 10, 0)));
    let mut store = WinStore::new(Arc::new(repo), identity, clock);
    store.load().await.unwrap();
    assert_eq!(store.current_streak(), 1);

    let err = store.add_win("Will not be saved").await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::StorageError);
    assert!(err.message().contains("disk full"));
    assert_eq!(store.wins().len(), 1);
    assert_eq!(store.wins().latest().unwrap().id(), existing.id());
    assert_eq!(store.current_streak(), 1);
    assert!(!store.has_entry_today());
}

#[tokio::test]
async fn test_failed_load_keeps_previous_view() {
    let mut f = fixture(Some("alice"));
    f.store.load().await.unwrap();
    f.store.add_win("Stretching").await.unwrap();

    f.repo.fail_from_now_on();
    let err = f.store.refresh().await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::StorageError);
    assert_eq!(f.store.wins().len(), 1);
}

#[tokio::test]
async fn test_delete_unknown_id_is_a_noop_success() {
    let mut f = fixture(Some("alice"));
    f.store.load().await.unwrap();
    f.store.add_win("Meditated").await.unwrap();

    f.store.delete_win(&WinId::new()).await.unwrap();

    assert_eq!(f.store.wins().len(), 1);
}

#[tokio::test]
async fn test_delete_twice_is_idempotent() {
    let mut f = fixture(Some("alice"));
    f.store.load().await.unwrap();
    let win = f.store.add_win("Meditated").await.unwrap();

    f.store.delete_win(win.id()).await.unwrap();
    f.store.delete_win(win.id()).await.unwrap();

    assert!(f.store.wins().is_empty());
    assert_eq!(f.repo.stored_for(&UserId::from_string("alice")).await, 0);
}

#[tokio::test]
async fn test_failed_delete_keeps_record() {
    let mut f = fixture(Some("alice"));
    f.store.load().await.unwrap();
    let win = f.store.add_win("Called a friend").await.unwrap();

    f.repo.fail_from_now_on();
    let err = f.store.delete_win(win.id()).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::StorageError);
    assert!(f.store.wins().get(win.id()).is_some());
    assert_eq!(f.store.current_streak(), 1);
}

#[tokio::test]
async fn test_deleting_todays_only_win_drops_streak() {
    let mut f = fixture(Some("alice"));
    f.store.load().await.unwrap();

    f.clock.set(local(18, 9, 0));
    f.store.add_win("Yesterday").await.unwrap();
    f.clock.set(local(19, 9, 0));
    let today = f.store.add_win("Today").await.unwrap();
    assert_eq!(f.store.current_streak(), 2);

    f.store.delete_win(today.id()).await.unwrap();

    // Yesterday still anchors the streak
    assert_eq!(f.store.current_streak(), 1);
    assert!(!f.store.has_entry_today());
}

#[tokio::test]
async fn test_cached_streak_matches_recomputation() {
    let mut f = fixture(Some("alice"));
    f.store.load().await.unwrap();

    for day in [15, 16, 18, 19] {
        f.clock.set(local(day, 8, 0));
        f.store.add_win("Morning pages").await.unwrap();
        let cached = f.store.current_streak();
        f.store.add_win("Evening walk").await.unwrap();

        let today = f.store.today();
        assert_eq!(cached, streak::current_streak(f.store.wins(), today));
        assert_eq!(
            f.store.current_streak(),
            streak::current_streak(f.store.wins(), today)
        );
    }

    assert_eq!(f.store.current_streak(), 2);
    assert_eq!(f.store.summary().longest_streak, 2);
    assert_eq!(f.store.summary().total_win_days, 4);
}

#[tokio::test]
async fn test_identity_switch_scopes_collection() {
    let mut f = fixture(Some("alice"));
    f.store.load().await.unwrap();
    f.store.add_win("Alice's win").await.unwrap();

    f.identity.sign_in(UserId::from_string("bob"));
    f.store.add_win("Bob's win").await.unwrap();

    assert_eq!(f.store.owner().map(UserId::as_str), Some("bob"));
    assert_eq!(f.store.wins().len(), 1);
    assert_eq!(f.store.wins().latest().unwrap().text(), "Bob's win");

    f.identity.sign_in(UserId::from_string("alice"));
    f.store.load().await.unwrap();
    assert_eq!(f.store.wins().len(), 1);
    assert_eq!(f.store.wins().latest().unwrap().text(), "Alice's win");
}

#[tokio::test]
async fn test_sign_out_discards_collection() {
    let mut f = fixture(Some("alice"));
    f.store.load().await.unwrap();
    f.store.add_win("Finished a puzzle").await.unwrap();

    f.identity.sign_out();
    f.store.load().await.unwrap();

    assert!(f.store.wins().is_empty());
    assert_eq!(f.store.current_streak(), 0);
    assert!(f.store.add_win("Anonymous").await.is_err());
}

// SessionController

#[tokio::test(start_paused = true)]
async fn test_submit_shows_message_immediately() {
    let mut f = fixture(Some("alice"));
    f.store.load().await.unwrap();
    let celebration = Arc::new(CountingCelebration::default());
    let mut session = controller(celebration.clone(), 2);

    assert_eq!(session.state(), FeedbackState::Idle);
    let outcome = session.submit(&mut f.store, "Cleaned my desk").await.unwrap();

    assert!(session.is_message_visible());
    assert_eq!(outcome.message, DEFAULT_MESSAGES[2]);
    assert_eq!(session.state().message(), Some(DEFAULT_MESSAGES[2]));
    assert_eq!(outcome.streak, 1);
    assert_eq!(outcome.win.text(), "Cleaned my desk");
    assert_eq!(celebration.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_message_hides_after_visible_window() {
    let mut f = fixture(Some("alice"));
    f.store.load().await.unwrap();
    let mut session = controller(Arc::new(CountingCelebration::default()), 0);

    session.submit(&mut f.store, "Paid a bill").await.unwrap();

    tokio::time::sleep(Duration::from_millis(DEFAULT_MESSAGE_VISIBLE_MS - 1)).await;
    assert!(session.is_message_visible());

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(!session.is_message_visible());
    assert_eq!(session.state(), FeedbackState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_resubmit_restarts_window() {
    let mut f = fixture(Some("alice"));
    f.store.load().await.unwrap();
    let celebration = Arc::new(CountingCelebration::default());
    let mut session = controller(celebration.clone(), 1);

    session.submit(&mut f.store, "First").await.unwrap();
    tokio::time::sleep(Duration::from_millis(3000)).await;
    session.submit(&mut f.store, "Second").await.unwrap();

    // Past the first window, inside the second
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(session.is_message_visible());
    assert!(matches!(
        session.state(),
        FeedbackState::MessageVisible { generation: 2, .. }
    ));

    tokio::time::sleep(Duration::from_millis(2600)).await;
    assert!(!session.is_message_visible());
    assert_eq!(celebration.count(), 2);
    assert_eq!(f.store.wins().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_failed_submit_from_idle_shows_nothing() {
    let mut f = fixture(None);
    f.store.load().await.unwrap();
    let celebration = Arc::new(CountingCelebration::default());
    let mut session = controller(celebration.clone(), 0);

    let err = session.submit(&mut f.store, "No one is signed in").await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::Unauthenticated);
    assert_eq!(session.state(), FeedbackState::Idle);
    assert_eq!(celebration.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_failed_submit_keeps_visible_message_and_timer() {
    let mut f = fixture(Some("alice"));
    f.store.load().await.unwrap();
    let celebration = Arc::new(CountingCelebration::default());
    let mut session = controller(celebration.clone(), 4);

    session.submit(&mut f.store, "Took vitamins").await.unwrap();
    let before = session.state();

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert!(session.submit(&mut f.store, "   ").await.is_err());

    assert_eq!(session.state(), before);
    assert_eq!(celebration.count(), 1);

    // The original window still closes on time
    tokio::time::sleep(Duration::from_millis(3001)).await;
    assert_eq!(session.state(), FeedbackState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_subscriber_sees_show_and_hide() {
    let mut f = fixture(Some("alice"));
    f.store.load().await.unwrap();
    let mut session = controller(Arc::new(CountingCelebration::default()), 0)
        .with_visible_duration(Duration::from_millis(500));
    let mut rx = session.subscribe();

    session.submit(&mut f.store, "Watered plants").await.unwrap();
    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().message().is_some());

    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow(), FeedbackState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_dismiss_hides_and_cancels_timer() {
    let mut f = fixture(Some("alice"));
    f.store.load().await.unwrap();
    let mut session = controller(Arc::new(CountingCelebration::default()), 0);

    session.submit(&mut f.store, "Sent the email").await.unwrap();
    session.dismiss();
    assert_eq!(session.state(), FeedbackState::Idle);

    tokio::time::sleep(Duration::from_millis(DEFAULT_MESSAGE_VISIBLE_MS + 1)).await;
    assert_eq!(session.state(), FeedbackState::Idle);
}
