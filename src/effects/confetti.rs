// One-shot confetti burst over the whole viewport when the answer is Yes.

const GRAVITY: f64 = 0.12;
const PALETTE: &[&str] = &[
    "#ff4d88", "#ff98c3", "#ffd1e3", "#ff5c93", "#ffffff", "#ffb3c6", "#f9c74f",
];

#[derive(Clone, Debug)]
pub struct ConfettiPiece {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub w: f64,
    pub h: f64,
    pub angle: f64,
    pub spin: f64,
    pub color: &'static str,
}

#[derive(Debug)]
pub struct Confetti {
    pieces: Vec<ConfettiPiece>,
    width: f64,
    height: f64,
}

impl Confetti {
    /// Pieces start spread across the top edge and slightly above it.
    pub fn burst(count: usize, width: f64, height: f64, rng: &mut fastrand::Rng) -> Self {
        let pieces = (0..count)
            .map(|_| ConfettiPiece {
                x: rng.f64() * width,
                y: -rng.f64() * height * 0.25,
                vx: (rng.f64() - 0.5) * 8.0,
                vy: rng.f64() * 4.0 + 1.0,
                w: 6.0 + rng.f64() * 6.0,
                h: 10.0 + rng.f64() * 8.0,
                angle: rng.f64() * std::f64::consts::TAU,
                spin: (rng.f64() - 0.5) * 0.3,
                color: PALETTE[rng.usize(..PALETTE.len())],
            })
            .collect();
        Self {
            pieces,
            width,
            height,
        }
    }

    pub fn pieces(&self) -> &[ConfettiPiece] {
        &self.pieces
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn is_finished(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Advance by `frames` 60 Hz frames; pieces that fall out of view are dropped.
    pub fn step(&mut self, frames: f64) {
        for p in self.pieces.iter_mut() {
            p.vy += GRAVITY * frames;
            p.vx *= 0.99_f64.powf(frames);
            p.x += p.vx * frames;
            p.y += p.vy * frames;
            p.angle += p.spin * frames;
        }
        let (w, h) = (self.width, self.height);
        self.pieces
            .retain(|p| p.y < h + p.h && p.x > -w * 0.5 && p.x < w * 1.5);
    }
}
