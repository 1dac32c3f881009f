use chrono::NaiveDate;
use log::{debug, error, info};
use std::sync::Arc;

use littlewins_domain::clock::Clock;
use littlewins_domain::identity::IdentityProvider;
use littlewins_domain::shared::{DomainError, UserId, WinId};
use littlewins_domain::streak::{self, StreakCache, StreakSummary};
use littlewins_domain::win::{validate_win_text, WinCollection, WinRecord, WinRepository};

/// Authoritative in-memory view of the signed-in user's wins.
///
/// Mutations go to the repository first; the view changes only after the
/// round trip succeeded, so a failed call leaves everything as it was.
pub struct WinStore {
    repo: Arc<dyn WinRepository>,
    identity: Arc<dyn IdentityProvider>,
    clock: Arc<dyn Clock>,
    wins: WinCollection,
    owner: Option<UserId>,
    streak_cache: StreakCache,
    loaded: bool,
}

impl WinStore {
    pub fn new(
        repo: Arc<dyn WinRepository>,
        identity: Arc<dyn IdentityProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            identity,
            clock,
            wins: WinCollection::new(),
            owner: None,
            streak_cache: StreakCache::new(),
            loaded: false,
        }
    }

    /// Read-only view, most recent first
    pub fn wins(&self) -> &WinCollection {
        &self.wins
    }

    /// User the current view was loaded for
    pub fn owner(&self) -> Option<&UserId> {
        self.owner.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Fetch every win of the current user.
    ///
    /// Without a signed-in user the view becomes empty. On failure the
    /// previous view is kept and the error is returned.
    pub async fn load(&mut self) -> Result<(), DomainError> {
        let Some(user) = self.identity.current_user() else {
            debug!("No signed-in user, starting with an empty win list");
            self.discard();
            self.loaded = true;
            return Ok(());
        };

        let records = self.repo.fetch_all(&user).await.map_err(|e| {
            error!("Error loading wins for {}: {}", user, e.format_with_code());
            e
        })?;

        info!("Loaded {} wins for user {}", records.len(), user);
        self.wins = WinCollection::from_records(records);
        self.owner = Some(user);
        self.streak_cache.invalidate();
        self.loaded = true;
        Ok(())
    }

    /// Reload from storage
    pub async fn refresh(&mut self) -> Result<(), DomainError> {
        self.load().await
    }

    /// Record a win for today and return the stored record
    pub async fn add_win(&mut self, text: &str) -> Result<WinRecord, DomainError> {
        validate_win_text(text)?;
        let user = self.signed_in_user().await?;

        let record = WinRecord::new(text, self.clock.now())?;
        let stored = self.repo.insert(&user, &record).await.map_err(|e| {
            error!("Error adding win: {}", e.format_with_code());
            e
        })?;

        let today = self.clock.today();
        self.streak_cache.record_win(stored.date(), today);
        self.wins.prepend(stored.clone());

        info!(
            "Win recorded: {} on {} ({} total)",
            stored.id(),
            stored.date(),
            self.wins.len()
        );
        Ok(stored)
    }

    /// Delete a win. Unknown ids succeed without touching anything.
    pub async fn delete_win(&mut self, id: &WinId) -> Result<(), DomainError> {
        let user = self.signed_in_user().await?;

        self.repo.delete(id, &user).await.map_err(|e| {
            error!("Error deleting win {}: {}", id, e.format_with_code());
            e
        })?;

        if self.wins.remove(id).is_some() {
            self.streak_cache.invalidate();
            info!("Win deleted: {}", id);
        } else {
            debug!("Delete of unknown win {} ignored", id);
        }
        Ok(())
    }

    /// Current streak as of today
    pub fn current_streak(&mut self) -> u32 {
        let today = self.clock.today();
        if let Some(cached) = self.streak_cache.get(today) {
            return cached;
        }

        let dates = self.wins.dates();
        let current = streak::streak_from_dates(&dates, today);
        let last_win_date = streak::last_win_date(&dates, today);
        self.streak_cache.store(today, current, last_win_date);
        current
    }

    pub fn has_entry_today(&self) -> bool {
        streak::has_entry_today(&self.wins, self.clock.today())
    }

    /// Full streak statistics, recomputed from the view
    pub fn summary(&self) -> StreakSummary {
        StreakSummary::compute(&self.wins, self.clock.today())
    }

    /// Drop the view, e.g. on sign-out
    pub fn discard(&mut self) {
        self.wins.clear();
        self.owner = None;
        self.streak_cache.invalidate();
    }

    /// The current user, reloading first if the identity changed since the
    /// last load
    async fn signed_in_user(&mut self) -> Result<UserId, DomainError> {
        let user = self.identity.current_user().ok_or_else(|| {
            DomainError::Unauthenticated("Sign in to record wins".to_string())
        })?;

        if self.owner.as_ref() != Some(&user) {
            info!("Identity changed to {}, reloading wins", user);
            self.load().await?;
        }
        Ok(user)
    }
}
