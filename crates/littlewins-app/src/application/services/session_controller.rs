use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use littlewins_domain::feedback::{CelebrationEffect, MessagePool, MessageSelector};
use littlewins_domain::shared::DomainError;
use littlewins_domain::win::WinRecord;

use super::WinStore;
use crate::application::config::DEFAULT_MESSAGE_VISIBLE_MS;

/// What the feedback area currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedbackState {
    #[default]
    Idle,
    MessageVisible {
        message: String,
        /// Bumped on every successful submit, so a stale hide timer can
        /// tell its message was replaced
        generation: u64,
    },
}

impl FeedbackState {
    pub fn message(&self) -> Option<&str> {
        match self {
            FeedbackState::Idle => None,
            FeedbackState::MessageVisible { message, .. } => Some(message),
        }
    }
}

/// Result of a successful submit
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub win: WinRecord,
    pub message: String,
    pub streak: u32,
}

/// Orchestrates one interaction: record a win, celebrate, show a message for
/// a bounded time, then go back to idle.
///
/// Must be driven from inside a tokio runtime; the hide timer is a spawned
/// task that is aborted whenever a newer message replaces it.
pub struct SessionController {
    celebration: Arc<dyn CelebrationEffect>,
    selector: Box<dyn MessageSelector>,
    pool: MessagePool,
    visible_for: Duration,
    state_tx: Arc<watch::Sender<FeedbackState>>,
    hide_task: Option<JoinHandle<()>>,
    generation: u64,
}

impl SessionController {
    pub fn new(
        celebration: Arc<dyn CelebrationEffect>,
        selector: Box<dyn MessageSelector>,
        pool: MessagePool,
    ) -> Self {
        let (state_tx, _) = watch::channel(FeedbackState::Idle);
        Self {
            celebration,
            selector,
            pool,
            visible_for: Duration::from_millis(DEFAULT_MESSAGE_VISIBLE_MS),
            state_tx: Arc::new(state_tx),
            hide_task: None,
            generation: 0,
        }
    }

    pub fn with_visible_duration(mut self, visible_for: Duration) -> Self {
        self.visible_for = visible_for;
        self
    }

    pub fn visible_duration(&self) -> Duration {
        self.visible_for
    }

    /// Record `text` as a win and show a feedback message.
    ///
    /// On failure nothing changes here: no celebration, no message, and the
    /// current state (including a pending hide timer) is left alone.
    pub async fn submit(
        &mut self,
        store: &mut WinStore,
        text: &str,
    ) -> Result<SubmitOutcome, DomainError> {
        let win = store.add_win(text).await?;

        self.celebration.celebrate(&win);
        let message = self.pool.pick(self.selector.as_mut()).to_string();
        self.show(message.clone());

        let streak = store.current_streak();
        info!(win_id = %win.id(), streak, "Win submitted");

        Ok(SubmitOutcome {
            win,
            message,
            streak,
        })
    }

    pub fn state(&self) -> FeedbackState {
        self.state_tx.borrow().clone()
    }

    pub fn is_message_visible(&self) -> bool {
        matches!(*self.state_tx.borrow(), FeedbackState::MessageVisible { .. })
    }

    /// Receiver that observes every state change
    pub fn subscribe(&self) -> watch::Receiver<FeedbackState> {
        self.state_tx.subscribe()
    }

    /// Hide the message now and cancel the pending timer
    pub fn dismiss(&mut self) {
        self.cancel_hide_timer();
        self.state_tx.send_if_modified(|state| {
            if *state == FeedbackState::Idle {
                return false;
            }
            *state = FeedbackState::Idle;
            true
        });
    }

    fn show(&mut self, message: String) {
        self.cancel_hide_timer();
        self.generation += 1;
        let generation = self.generation;

        self.state_tx.send_replace(FeedbackState::MessageVisible {
            message,
            generation,
        });

        let tx = Arc::clone(&self.state_tx);
        let deadline = Instant::now() + self.visible_for;
        self.hide_task = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let hidden = tx.send_if_modified(|state| {
                let current = matches!(
                    state,
                    FeedbackState::MessageVisible { generation: g, .. } if *g == generation
                );
                if current {
                    *state = FeedbackState::Idle;
                }
                current
            });
            if hidden {
                debug!(generation, "Feedback message hidden");
            }
        }));
    }

    fn cancel_hide_timer(&mut self) {
        if let Some(task) = self.hide_task.take() {
            task.abort();
        }
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.cancel_hide_timer();
    }
}
