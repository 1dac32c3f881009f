use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use littlewins_domain::shared::{DomainError, UserId, WinId};
use littlewins_domain::win::{WinRecord, WinRepository};

/// Process-local row store for sessions that should leave nothing behind
#[derive(Default)]
pub struct InMemoryWinRepository {
    rows: RwLock<HashMap<UserId, Vec<WinRecord>>>,
}

impl InMemoryWinRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl WinRepository for InMemoryWinRepository {
    async fn fetch_all(&self, user_id: &UserId) -> Result<Vec<WinRecord>, DomainError> {
        let rows = self.rows.read().await;
        let mut wins = rows.get(user_id).cloned().unwrap_or_default();
        wins.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(wins)
    }

    async fn insert(&self, user_id: &UserId, win: &WinRecord) -> Result<WinRecord, DomainError> {
        let mut rows = self.rows.write().await;
        let wins = rows.entry(user_id.clone()).or_default();
        if wins.iter().any(|w| w.id() == win.id()) {
            return Err(DomainError::Storage(format!(
                "Insert win: duplicate id {}",
                win.id()
            )));
        }
        wins.push(win.clone());
        Ok(win.clone())
    }

    async fn delete(&self, id: &WinId, user_id: &UserId) -> Result<(), DomainError> {
        let mut rows = self.rows.write().await;
        if let Some(wins) = rows.get_mut(user_id) {
            wins.retain(|w| w.id() != id);
        }
        Ok(())
    }
}
