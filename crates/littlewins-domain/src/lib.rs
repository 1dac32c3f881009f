// Domain layer - Pure business logic
// No dependencies on infrastructure or presentation layers

pub mod clock;
pub mod feedback;
pub mod identity;
pub mod shared;
pub mod streak;
pub mod win;

// Re-exports for convenience
pub use shared::{DomainError, UserId, WinId};
