use crate::shared::UserId;

/// Who is signed in right now.
///
/// Every Win Store operation is scoped to the returned user. `None` means the
/// session is anonymous: the collection is empty and mutations are rejected.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<UserId>;
}
