mod celebration;
mod selector;

pub use celebration::{CelebrationPattern, TerminalCelebration};
pub use selector::{RandomMessageSelector, SeededMessageSelector};
