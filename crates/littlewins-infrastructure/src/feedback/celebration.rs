use std::io::Write;
use std::sync::Mutex;
use tracing::{debug, warn};

use littlewins_domain::feedback::{CelebrationEffect, MessageSelector};
use littlewins_domain::win::WinRecord;

use super::RandomMessageSelector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelebrationPattern {
    SideBurst,
    Fireworks,
    RainbowCascade,
    HeartBurst,
    Spiral,
    GoldenShower,
}

impl CelebrationPattern {
    pub const ALL: [CelebrationPattern; 6] = [
        CelebrationPattern::SideBurst,
        CelebrationPattern::Fireworks,
        CelebrationPattern::RainbowCascade,
        CelebrationPattern::HeartBurst,
        CelebrationPattern::Spiral,
        CelebrationPattern::GoldenShower,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CelebrationPattern::SideBurst => "side-burst",
            CelebrationPattern::Fireworks => "fireworks",
            CelebrationPattern::RainbowCascade => "rainbow-cascade",
            CelebrationPattern::HeartBurst => "heart-burst",
            CelebrationPattern::Spiral => "spiral",
            CelebrationPattern::GoldenShower => "golden-shower",
        }
    }

    pub fn render(&self) -> &'static str {
        match self {
            CelebrationPattern::SideBurst => "🎉 ✨ 🎊        🎊 ✨ 🎉",
            CelebrationPattern::Fireworks => "   🎆  💥  🎇  💥  🎆",
            CelebrationPattern::RainbowCascade => "🟥 🟧 🟨 🟩 🟦 🟪",
            CelebrationPattern::HeartBurst => "💖 💕 💗 💓 💗 💕 💖",
            CelebrationPattern::Spiral => "🌀 ✨ 🌟 ✨ 🌀",
            CelebrationPattern::GoldenShower => "🌟 ⭐ 🏆 ⭐ 🌟",
        }
    }
}

/// Confetti for the terminal: one randomly picked pattern per win
pub struct TerminalCelebration {
    out: Mutex<Box<dyn Write + Send>>,
    selector: Mutex<Box<dyn MessageSelector>>,
}

impl TerminalCelebration {
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(std::io::stdout()), Box::new(RandomMessageSelector))
    }

    pub fn with_writer(out: Box<dyn Write + Send>, selector: Box<dyn MessageSelector>) -> Self {
        Self {
            out: Mutex::new(out),
            selector: Mutex::new(selector),
        }
    }

    fn pick_pattern(&self) -> CelebrationPattern {
        let index = match self.selector.lock() {
            Ok(mut selector) => selector.select(CelebrationPattern::ALL.len()),
            Err(_) => 0,
        };
        CelebrationPattern::ALL[index % CelebrationPattern::ALL.len()]
    }
}

impl CelebrationEffect for TerminalCelebration {
    fn celebrate(&self, win: &WinRecord) {
        let pattern = self.pick_pattern();
        debug!(win_id = %win.id(), pattern = pattern.name(), "Celebrating win");

        let Ok(mut out) = self.out.lock() else {
            return;
        };
        if let Err(e) = writeln!(out, "{}", pattern.render()).and_then(|_| out.flush()) {
            warn!(error = %e, "Failed to draw celebration");
        }
    }
}
