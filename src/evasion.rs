//! Evasive No button.
//!
//! Placement is a pure function of the container measurement, the button
//! footprint, the edge padding and an injected RNG, so the geometry can be
//! exercised natively with a seeded `fastrand::Rng`. `Evasion` owns the
//! per-session counters and decides which raw pointer inputs count as an
//! attempt.

/// Measured size of the response-button container (px).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

/// Rendered size of the No button (px).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
}

/// Offset of the No button's top-left corner within its container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub left: f64,
    pub top: f64,
}

impl Position {
    pub const INITIAL: Position = Position {
        left: 220.0,
        top: 120.0,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvasionParams {
    pub padding: f64,
    pub footprint: Footprint,
    pub scale_step: f64,
    pub scale_max: f64,
}

impl Default for EvasionParams {
    fn default() -> Self {
        Self {
            padding: 12.0,
            footprint: Footprint {
                width: 140.0,
                height: 52.0,
            },
            scale_step: 0.08,
            scale_max: 1.6,
        }
    }
}

/// Pick a new top-left corner for the No button.
///
/// Returns `None` when the container is not measurable yet (unmounted, or a
/// zero/non-finite size), in which case the caller keeps the old position.
/// Containers too small to hold the footprint collapse the range to the
/// padding corner rather than producing negative offsets.
pub fn relocate(
    container: Option<Bounds>,
    footprint: Footprint,
    padding: f64,
    rng: &mut fastrand::Rng,
) -> Option<Position> {
    let rect = container?;
    if !(rect.width > 0.0 && rect.height > 0.0) || !rect.width.is_finite() || !rect.height.is_finite() {
        return None;
    }
    let max_left = padding.max(rect.width - footprint.width - padding);
    let max_top = padding.max(rect.height - footprint.height - padding);
    Some(Position {
        left: padding + rng.f64() * (max_left - padding),
        top: padding + rng.f64() * (max_top - padding),
    })
}

/// Yes button scale after `attempts` failed No attempts.
pub fn yes_scale(attempts: u32, step: f64, max: f64) -> f64 {
    (1.0 + attempts as f64 * step).min(max)
}

/// Index of the taunt to display, `None` before the first attempt. Clamps at
/// the last entry once the list is exhausted.
pub fn taunt_index(attempts: u32, len: usize) -> Option<usize> {
    if attempts == 0 || len == 0 {
        return None;
    }
    Some((attempts as usize - 1).min(len - 1))
}

/// Raw inputs arriving at the No button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoInput {
    /// Pointer entered the button's hover region.
    Hover,
    /// Press started; `touch` is true for touch pointers.
    PressStart { touch: bool },
    /// A completed click / activation.
    Click,
    /// The press will not complete as a click on the button (the pointer was
    /// cancelled, or the activation came from the keyboard).
    Cancel,
}

/// What the controller did with an input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reaction {
    /// Button moved, attempt counter untouched.
    Dodged,
    /// Counted as a failed No attempt and the button moved.
    Attempt,
    /// Nothing to do (mouse press-start, a cancelled press, or the click
    /// completing a touch press that was already counted).
    Ignored,
}

/// Per-session evasion state.
#[derive(Clone, Debug)]
pub struct Evasion {
    params: EvasionParams,
    attempts: u32,
    position: Position,
    // Set by a touch press-start; swallows the click the browser synthesizes
    // once the finger lifts so one tap is one attempt.
    swallow_click: bool,
}

impl Evasion {
    pub fn new(params: EvasionParams) -> Self {
        Self {
            params,
            attempts: 0,
            position: Position::INITIAL,
            swallow_click: false,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn params(&self) -> &EvasionParams {
        &self.params
    }

    pub fn yes_scale(&self) -> f64 {
        yes_scale(self.attempts, self.params.scale_step, self.params.scale_max)
    }

    /// Move the button without counting an attempt.
    pub fn dodge(&mut self, container: Option<Bounds>, rng: &mut fastrand::Rng) {
        if let Some(pos) = relocate(container, self.params.footprint, self.params.padding, rng) {
            self.position = pos;
        }
    }

    /// Count a failed No attempt and move the button.
    pub fn attempt(&mut self, container: Option<Bounds>, rng: &mut fastrand::Rng) {
        self.attempts = self.attempts.saturating_add(1);
        self.dodge(container, rng);
    }

    pub fn handle(
        &mut self,
        input: NoInput,
        container: Option<Bounds>,
        rng: &mut fastrand::Rng,
    ) -> Reaction {
        match input {
            NoInput::Hover => {
                self.dodge(container, rng);
                Reaction::Dodged
            }
            NoInput::PressStart { touch: true } => {
                // Re-armed for every tap; a stale flag from an abandoned tap
                // never carries over to a different interaction.
                self.swallow_click = true;
                self.attempt(container, rng);
                Reaction::Attempt
            }
            NoInput::PressStart { touch: false } | NoInput::Cancel => {
                self.swallow_click = false;
                Reaction::Ignored
            }
            NoInput::Click if self.swallow_click => {
                self.swallow_click = false;
                Reaction::Ignored
            }
            NoInput::Click => {
                self.attempt(container, rng);
                Reaction::Attempt
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX: Bounds = Bounds {
        width: 360.0,
        height: 220.0,
    };

    #[test]
    fn relocate_is_noop_without_container() {
        let mut rng = fastrand::Rng::with_seed(7);
        let fp = EvasionParams::default().footprint;
        assert_eq!(relocate(None, fp, 12.0, &mut rng), None);
        let flat = Bounds {
            width: 0.0,
            height: 200.0,
        };
        assert_eq!(relocate(Some(flat), fp, 12.0, &mut rng), None);
    }

    #[test]
    fn relocate_is_deterministic_for_a_seed() {
        let fp = EvasionParams::default().footprint;
        let a = relocate(Some(BOX), fp, 12.0, &mut fastrand::Rng::with_seed(42));
        let b = relocate(Some(BOX), fp, 12.0, &mut fastrand::Rng::with_seed(42));
        assert_eq!(a, b);
    }

    #[test]
    fn relocate_pins_to_padding_in_tiny_container() {
        let mut rng = fastrand::Rng::with_seed(3);
        let fp = EvasionParams::default().footprint;
        let tiny = Bounds {
            width: 100.0,
            height: 40.0,
        };
        let pos = relocate(Some(tiny), fp, 12.0, &mut rng).unwrap();
        assert_eq!(pos, Position { left: 12.0, top: 12.0 });
    }

    #[test]
    fn scale_grows_linearly_then_caps() {
        assert_eq!(yes_scale(0, 0.08, 1.6), 1.0);
        assert!((yes_scale(3, 0.08, 1.6) - 1.24).abs() < 1e-9);
        assert_eq!(yes_scale(8, 0.08, 1.6), 1.6);
        assert_eq!(yes_scale(500, 0.08, 1.6), 1.6);
    }

    #[test]
    fn taunt_index_clamps() {
        assert_eq!(taunt_index(0, 8), None);
        assert_eq!(taunt_index(1, 8), Some(0));
        assert_eq!(taunt_index(8, 8), Some(7));
        assert_eq!(taunt_index(9, 8), Some(7));
        assert_eq!(taunt_index(u32::MAX, 8), Some(7));
        assert_eq!(taunt_index(3, 0), None);
    }

    #[test]
    fn hover_moves_without_counting() {
        let mut rng = fastrand::Rng::with_seed(11);
        let mut ev = Evasion::new(EvasionParams::default());
        assert_eq!(ev.handle(NoInput::Hover, Some(BOX), &mut rng), Reaction::Dodged);
        assert_eq!(ev.attempts(), 0);
        assert_ne!(ev.position(), Position::INITIAL);
    }

    #[test]
    fn touch_tap_counts_once() {
        let mut rng = fastrand::Rng::with_seed(5);
        let mut ev = Evasion::new(EvasionParams::default());
        let press = ev.handle(NoInput::PressStart { touch: true }, Some(BOX), &mut rng);
        let click = ev.handle(NoInput::Click, Some(BOX), &mut rng);
        assert_eq!((press, click), (Reaction::Attempt, Reaction::Ignored));
        assert_eq!(ev.attempts(), 1);
        // The next genuine click counts again.
        assert_eq!(ev.handle(NoInput::Click, Some(BOX), &mut rng), Reaction::Attempt);
        assert_eq!(ev.attempts(), 2);
    }

    #[test]
    fn cancelled_touch_does_not_swallow_next_click() {
        let mut rng = fastrand::Rng::with_seed(9);
        let mut ev = Evasion::new(EvasionParams::default());
        assert_eq!(
            ev.handle(NoInput::PressStart { touch: true }, Some(BOX), &mut rng),
            Reaction::Attempt
        );
        assert_eq!(ev.handle(NoInput::Cancel, Some(BOX), &mut rng), Reaction::Ignored);
        assert_eq!(ev.attempts(), 1);
        // Keyboard activation after the abandoned tap is its own attempt.
        assert_eq!(ev.handle(NoInput::Click, Some(BOX), &mut rng), Reaction::Attempt);
        assert_eq!(ev.attempts(), 2);
    }

    #[test]
    fn second_tap_counts_after_abandoned_tap() {
        let mut rng = fastrand::Rng::with_seed(9);
        let mut ev = Evasion::new(EvasionParams::default());
        ev.handle(NoInput::PressStart { touch: true }, Some(BOX), &mut rng);
        ev.handle(NoInput::PressStart { touch: true }, Some(BOX), &mut rng);
        assert_eq!(ev.handle(NoInput::Click, Some(BOX), &mut rng), Reaction::Ignored);
        assert_eq!(ev.attempts(), 2);
    }

    #[test]
    fn mouse_press_defers_to_click() {
        let mut rng = fastrand::Rng::with_seed(5);
        let mut ev = Evasion::new(EvasionParams::default());
        assert_eq!(
            ev.handle(NoInput::PressStart { touch: false }, Some(BOX), &mut rng),
            Reaction::Ignored
        );
        assert_eq!(ev.handle(NoInput::Click, Some(BOX), &mut rng), Reaction::Attempt);
        assert_eq!(ev.attempts(), 1);
    }

    #[test]
    fn attempt_without_container_still_counts() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut ev = Evasion::new(EvasionParams::default());
        ev.attempt(None, &mut rng);
        assert_eq!(ev.attempts(), 1);
        assert_eq!(ev.position(), Position::INITIAL);
    }
}
