use std::sync::RwLock;
use tracing::info;

use littlewins_domain::identity::IdentityProvider;
use littlewins_domain::shared::UserId;

/// Identity held for the lifetime of one process
#[derive(Debug, Default)]
pub struct LocalIdentity {
    current: RwLock<Option<UserId>>,
}

impl LocalIdentity {
    pub fn new(user: Option<UserId>) -> Self {
        Self {
            current: RwLock::new(user),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, user: UserId) {
        info!(user_id = %user, "Signed in");
        if let Ok(mut current) = self.current.write() {
            *current = Some(user);
        }
    }

    pub fn sign_out(&self) {
        if let Ok(mut current) = self.current.write() {
            if let Some(user) = current.take() {
                info!(user_id = %user, "Signed out");
            }
        }
    }
}

impl IdentityProvider for LocalIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.current.read().ok().and_then(|current| current.clone())
    }
}
