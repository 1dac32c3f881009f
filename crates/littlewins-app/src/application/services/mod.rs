mod session_controller;
mod win_store;

pub use session_controller::{FeedbackState, SessionController, SubmitOutcome};
pub use win_store::WinStore;

#[cfg(test)]
mod tests;
