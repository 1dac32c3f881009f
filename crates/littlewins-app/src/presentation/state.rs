use std::sync::Arc;

use crate::application::config::AppConfig;
use crate::application::services::{SessionController, WinStore};
use littlewins_infrastructure::identity::LocalIdentity;
use littlewins_infrastructure::persistence::Database;

/// Everything one CLI invocation works with
pub struct AppState {
    pub config: AppConfig,
    pub identity: Arc<LocalIdentity>,
    pub store: WinStore,
    pub session: SessionController,
    /// `None` for in-memory sessions
    pub db: Option<Arc<Database>>,
}
