// Floating background icons drifting up the viewport.
use crate::ICON_GLYPHS;

#[derive(Clone, Debug, PartialEq)]
pub struct FloatingIcon {
    pub left_pct: f64,
    pub size: f64,
    pub duration_s: f64,
    pub delay_s: f64,
    pub opacity: f64,
    pub rotate_deg: f64,
    pub glyph: &'static str,
}

impl FloatingIcon {
    /// Vertical offset (px from the top) at `t_s` seconds after mount, for a
    /// viewport `height` tall. `None` while the icon is still waiting out its delay.
    pub fn y_at(&self, t_s: f64, height: f64) -> Option<f64> {
        let elapsed = t_s - self.delay_s;
        if elapsed < 0.0 || self.duration_s <= 0.0 {
            return None;
        }
        let progress = (elapsed % self.duration_s) / self.duration_s;
        let travel = height + 2.0 * self.size;
        Some(height + self.size - progress * travel)
    }
}

pub fn scatter(count: usize, rng: &mut fastrand::Rng) -> Vec<FloatingIcon> {
    (0..count)
        .map(|i| FloatingIcon {
            left_pct: rng.f64() * 100.0,
            size: 20.0 + rng.f64() * 20.0,
            duration_s: 8.0 + rng.f64() * 10.0,
            delay_s: rng.f64() * 6.0,
            opacity: 0.35 + rng.f64() * 0.55,
            rotate_deg: -8.0 + rng.f64() * 16.0,
            glyph: ICON_GLYPHS[i % ICON_GLYPHS.len()],
        })
        .collect()
}

/// Icon parameters memoized by count; a resize that keeps the same density
/// tier keeps the same icons.
#[derive(Debug, Default)]
pub struct IconField {
    icons: Vec<FloatingIcon>,
    count: Option<usize>,
}

impl IconField {
    pub fn icons(&self) -> &[FloatingIcon] {
        &self.icons
    }

    /// Returns true when the icons were regenerated.
    pub fn ensure(&mut self, count: usize, rng: &mut fastrand::Rng) -> bool {
        if self.count == Some(count) {
            return false;
        }
        self.icons = scatter(count, rng);
        self.count = Some(count);
        true
    }
}
