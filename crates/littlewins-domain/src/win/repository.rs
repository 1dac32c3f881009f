use async_trait::async_trait;

use super::WinRecord;
use crate::shared::{DomainError, UserId, WinId};

/// Row store holding every user's wins.
///
/// One call is one round trip; callers never batch or queue operations.
#[async_trait]
pub trait WinRepository: Send + Sync {
    /// All wins owned by `user_id`, most recent first.
    async fn fetch_all(&self, user_id: &UserId) -> Result<Vec<WinRecord>, DomainError>;

    /// Persist `win` for `user_id` and return the stored row.
    async fn insert(&self, user_id: &UserId, win: &WinRecord) -> Result<WinRecord, DomainError>;

    /// Delete the win with `id` if it belongs to `user_id`.
    ///
    /// Deleting a row that does not exist is not an error.
    async fn delete(&self, id: &WinId, user_id: &UserId) -> Result<(), DomainError>;
}
