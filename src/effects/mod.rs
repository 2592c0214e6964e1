//! Decorative particle models: floating background icons, the pointer heart
//! trail, the Yes confetti burst and the fixed celebration ornaments.
//!
//! Everything here is plain data advanced by the animation frame loop in
//! `app`; nothing touches the DOM, so the motion rules are host-testable.

mod confetti;
mod floating;
mod hearts;

pub use confetti::{Confetti, ConfettiPiece};
pub use floating::{FloatingIcon, IconField, scatter};
pub use hearts::{HEART_LIFETIME_MS, Heart, HeartTrail};

pub const CELEBRATION_SLOTS: usize = 12;
const CELEBRATION_HEARTS: &[&str] = &["💖", "💕", "💗", "💓"];

/// A fixed ornament on the Yes screen, positioned in percent of the card.
#[derive(Clone, Debug, PartialEq)]
pub struct Ornament {
    pub left_pct: f64,
    pub top_pct: f64,
    pub delay_s: f64,
    pub glyph: &'static str,
    /// Horizontal drift in px over one cycle (hearts only).
    pub drift_x: f64,
}

/// Twinkling sparkles laid out on a 12-column, 3-row stagger.
pub fn sparkles() -> Vec<Ornament> {
    (0..CELEBRATION_SLOTS)
        .map(|i| Ornament {
            left_pct: 5.0 + i as f64 * 8.0,
            top_pct: 10.0 + (i % 3) as f64 * 30.0,
            delay_s: 0.5 + i as f64 * 0.15,
            glyph: "✨",
            drift_x: 0.0,
        })
        .collect()
}

/// Hearts rising from the bottom of the card, alternating drift direction.
pub fn rising_hearts() -> Vec<Ornament> {
    (0..CELEBRATION_SLOTS)
        .map(|i| Ornament {
            left_pct: 5.0 + i as f64 * 8.0,
            top_pct: 100.0,
            delay_s: 1.5 + i as f64 * 0.2,
            glyph: CELEBRATION_HEARTS[i % CELEBRATION_HEARTS.len()],
            drift_x: if i % 2 == 0 { 30.0 } else { -30.0 },
        })
        .collect()
}
