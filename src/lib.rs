//! Valentine proposal card core crate.
//!
//! The sender fills in names and an optional message and gets a self-describing
//! share link; the recipient opens it and is asked the question with a Yes
//! button that keeps growing and a No button that runs away. All state lives in
//! the page (`flow::Session`) and the link itself; there is no backend.
//!
//! Pure pieces (`link`, `flow`, `evasion`, `effects`) compile and test on the
//! host. `app` wires them to the DOM and is only exercised in the browser.

use wasm_bindgen::prelude::*;

pub mod app;
pub mod audio;
pub mod config;
pub mod effects;
pub mod error;
pub mod evasion;
pub mod flow;
pub mod link;
mod logger;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use flow::{Session, Stage};
pub use link::Invitation;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init();
}

// -----------------------------------------------------------------------------
// Copy datasets
// -----------------------------------------------------------------------------

/// Escalating replies to the No button, shown in order and clamped at the last.
pub const TAUNTS: &[&str] = &[
    "Are you sure? My heart is waiting... 💕",
    "Think again… You make my world brighter! ✨",
    "You know you want to click Yes 😏",
    "Don't be shy, say yes 💘",
    "My heart says Yes. Yours? 💓",
    "Every moment with you is special 🌹",
    "You're the reason I smile every day 😊",
    "Please? You mean everything to me! 💝",
];

/// Glyphs cycled through by the floating background icons.
pub const ICON_GLYPHS: &[&str] = &[
    "🫶", "❤️", "🤝", "💓", "💗", "💬", "💌", "✉️", "✨", "🎁", "😊", "🍀",
];

/// Glyphs picked at random for the pointer heart trail.
pub const HEART_GLYPHS: &[&str] = &["💖", "💕", "💗", "💓", "💝", "💘", "❤️", "🩷"];

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_app() -> Result<(), JsValue> {
    app::mount(AppConfig::default()).map_err(JsValue::from)
}

/// Boot with a JSON overlay on top of the default configuration.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_app_with_config(config_json: &str) -> Result<(), JsValue> {
    let cfg = AppConfig::from_json(config_json)?;
    app::mount(cfg).map_err(JsValue::from)
}

/// Build a share link without mounting the app (for host pages with their own UI).
#[wasm_bindgen]
pub fn encode_link(origin: &str, from: &str, to: &str, message: &str) -> String {
    link::encode(origin, from, to, message)
}

#[wasm_bindgen]
pub fn yes_scale(no_attempts: u32) -> f64 {
    let params = AppConfig::default().evasion();
    evasion::yes_scale(no_attempts, params.scale_step, params.scale_max)
}

/// Taunt shown after `no_attempts` failed No attempts (empty before the first).
#[wasm_bindgen]
pub fn taunt_for(no_attempts: u32) -> String {
    evasion::taunt_index(no_attempts, TAUNTS.len())
        .map(|i| TAUNTS[i].to_string())
        .unwrap_or_default()
}
