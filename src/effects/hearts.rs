// Heart trail following the pointer.
use std::collections::VecDeque;

use crate::HEART_GLYPHS;

pub const HEART_LIFETIME_MS: f64 = 3000.0;
const BURST_SIZE: u32 = 5;
const BURST_STAGGER_MS: f64 = 50.0;
// Velocities are expressed per 60 Hz frame.
const FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Heart {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub vx: f64,
    pub vy: f64,
    pub rotation_deg: f64,
    pub glyph: &'static str,
    pub born_ms: f64,
}

impl Heart {
    pub fn opacity(&self, now: f64) -> f64 {
        (1.0 - (now - self.born_ms) / HEART_LIFETIME_MS).clamp(0.0, 1.0)
    }
}

#[derive(Debug)]
pub struct HeartTrail {
    hearts: VecDeque<Heart>,
    // Burst hearts not yet released: (due_ms, x, y)
    pending: Vec<(f64, f64, f64)>,
    cap: usize,
    next_id: u64,
    last_tick_ms: Option<f64>,
}

impl HeartTrail {
    pub fn new(cap: usize) -> Self {
        Self {
            hearts: VecDeque::with_capacity(cap + 1),
            pending: Vec::new(),
            cap,
            next_id: 0,
            last_tick_ms: None,
        }
    }

    pub fn hearts(&self) -> impl Iterator<Item = &Heart> {
        self.hearts.iter()
    }

    pub fn len(&self) -> usize {
        self.hearts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hearts.is_empty() && self.pending.is_empty()
    }

    /// Pointer moved: spawn a heart half of the time.
    pub fn on_pointer_move(&mut self, x: f64, y: f64, now: f64, rng: &mut fastrand::Rng) {
        if rng.f64() > 0.5 {
            self.spawn(x, y, now, rng);
        }
    }

    /// Click: queue a short staggered burst at the click point.
    pub fn on_click(&mut self, x: f64, y: f64, now: f64) {
        for i in 0..BURST_SIZE {
            self.pending.push((now + i as f64 * BURST_STAGGER_MS, x, y));
        }
    }

    pub fn spawn(&mut self, x: f64, y: f64, now: f64, rng: &mut fastrand::Rng) {
        // Keep the newest `cap` before adding, so the trail tops out at cap + 1.
        while self.hearts.len() > self.cap {
            self.hearts.pop_front();
        }
        let heart = Heart {
            id: self.next_id,
            x,
            y,
            size: rng.f64() * 30.0 + 30.0,
            vx: (rng.f64() - 0.5) * 3.0,
            vy: -rng.f64() * 4.0 - 3.0,
            rotation_deg: rng.f64() * 360.0,
            glyph: HEART_GLYPHS[rng.usize(..HEART_GLYPHS.len())],
            born_ms: now,
        };
        self.next_id += 1;
        self.hearts.push_back(heart);
    }

    /// Release due burst hearts, move everything, and drop expired hearts.
    pub fn tick(&mut self, now: f64, rng: &mut fastrand::Rng) {
        let mut due = Vec::new();
        self.pending.retain(|&(at, x, y)| {
            if at <= now {
                due.push((at, x, y));
                false
            } else {
                true
            }
        });
        for (at, x, y) in due {
            self.spawn(x, y, at, rng);
        }

        let frames = self
            .last_tick_ms
            .map(|last| ((now - last) / FRAME_MS).max(0.0))
            .unwrap_or(0.0);
        self.last_tick_ms = Some(now);
        for h in self.hearts.iter_mut() {
            h.x += h.vx * frames;
            h.y += h.vy * frames;
        }
        self.hearts.retain(|h| now - h.born_ms < HEART_LIFETIME_MS);
    }
}
