use serde::{Deserialize, Serialize};

use crate::shared::DomainError;
use crate::win::WinRecord;

/// Messages shown after a win is recorded
pub const DEFAULT_MESSAGES: [&str; 10] = [
    "You're absolutely amazing! 🌟",
    "Keep crushing it! 💪",
    "Small wins lead to big victories! 🏆",
    "You're building momentum! 🚀",
    "Every step counts! 👏",
    "Celebrate this moment! 🎉",
    "You're doing great! ✨",
    "Progress is progress! 📈",
    "Your effort matters! 💖",
    "Keep shining! ☀️",
];

/// Fixed, non-empty, ordered list of feedback messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePool {
    messages: Vec<String>,
}

impl MessagePool {
    pub fn new(messages: Vec<String>) -> Result<Self, DomainError> {
        let messages: Vec<String> = messages
            .into_iter()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();

        if messages.is_empty() {
            return Err(DomainError::Validation(
                "Message pool cannot be empty".to_string(),
            ));
        }

        Ok(Self { messages })
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.messages.get(index).map(String::as_str)
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Pick one message through `selector`. Out-of-range picks wrap around.
    pub fn pick(&self, selector: &mut dyn MessageSelector) -> &str {
        let index = selector.select(self.messages.len()) % self.messages.len();
        &self.messages[index]
    }
}

impl Default for MessagePool {
    fn default() -> Self {
        Self {
            messages: DEFAULT_MESSAGES.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Chooses an index in `0..len`. Implementations should be uniform.
pub trait MessageSelector: Send {
    fn select(&mut self, len: usize) -> usize;
}

/// Celebratory side effect fired once per recorded win.
///
/// Fire-and-forget: there is nothing to return and no failure to handle.
pub trait CelebrationEffect: Send + Sync {
    fn celebrate(&self, win: &WinRecord);
}
