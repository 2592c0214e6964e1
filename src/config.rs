//! Tunables for the card. Defaults give the standard card; a host
//! page may overlay a JSON object (feature `serde_json`) to adjust any subset.

use crate::error::{AppError, AppResult};
use crate::evasion::{EvasionParams, Footprint};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AppConfig {
    /// Gap kept between the No button and the edges of its container (px).
    pub padding: f64,
    pub no_button_width: f64,
    pub no_button_height: f64,
    /// Yes button growth per failed No attempt.
    pub yes_scale_step: f64,
    pub yes_scale_max: f64,
    pub copied_reset_ms: u32,
    pub message_max_chars: usize,
    /// Viewport width below which the sparse decoration tier is used.
    pub narrow_breakpoint: f64,
    pub icons_narrow: usize,
    pub icons_wide: usize,
    pub confetti_pieces: usize,
    pub heart_trail_cap: usize,
    pub sound: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            padding: 12.0,
            no_button_width: 140.0,
            no_button_height: 52.0,
            yes_scale_step: 0.08,
            yes_scale_max: 1.6,
            copied_reset_ms: 3000,
            message_max_chars: 100,
            narrow_breakpoint: 600.0,
            icons_narrow: 14,
            icons_wide: 22,
            confetti_pieces: 240,
            heart_trail_cap: 30,
            sound: true,
        }
    }
}

impl AppConfig {
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> AppResult<Self> {
        let cfg: AppConfig =
            serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    // Negated comparisons so NaN is rejected too.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> AppResult<()> {
        if !(self.padding >= 0.0) {
            return Err(AppError::Config("padding must be non-negative".into()));
        }
        if !(self.no_button_width > 0.0 && self.no_button_height > 0.0) {
            return Err(AppError::Config("no button footprint must be positive".into()));
        }
        if !(self.yes_scale_step >= 0.0) || !(self.yes_scale_max >= 1.0) {
            return Err(AppError::Config(
                "yes scale step must be non-negative and max at least 1".into(),
            ));
        }
        if self.message_max_chars == 0 {
            return Err(AppError::Config("message_max_chars must be positive".into()));
        }
        Ok(())
    }

    pub fn evasion(&self) -> EvasionParams {
        EvasionParams {
            padding: self.padding,
            footprint: Footprint {
                width: self.no_button_width,
                height: self.no_button_height,
            },
            scale_step: self.yes_scale_step,
            scale_max: self.yes_scale_max,
        }
    }

    /// Floating icon count for a viewport of the given width.
    pub fn icon_count(&self, viewport_width: f64) -> usize {
        if viewport_width < self.narrow_breakpoint {
            self.icons_narrow
        } else {
            self.icons_wide
        }
    }
}
