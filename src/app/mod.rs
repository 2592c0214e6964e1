//! Browser shell: builds the page, routes DOM events into the `Session`, and
//! drives the decoration canvas from a `requestAnimationFrame` loop.
//!
//! State lives in a thread-local cell owned by the UI thread. Handlers borrow it
//! for the duration of one event and never across an await point; the async
//! share/clipboard paths re-enter through `with_state` when their promise
//! settles.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, MouseEvent, PointerEvent, window};

use crate::audio::{self, Cue};
use crate::config::AppConfig;
use crate::effects::{Confetti, HeartTrail, IconField};
use crate::error::{AppError, AppResult};
use crate::evasion::{Bounds, NoInput, Reaction};
use crate::flow::{SHARE_TITLE, Session, Stage};

mod dom;
mod listeners;
mod share;

use dom::{Ui, set_visible};
use listeners::Listener;
use share::ShareRequest;

// Frame deltas are normalized to 60 Hz so particle speeds stay per-frame.
const FRAME_MS: f64 = 1000.0 / 60.0;
// Long pauses (background tab) should not fling particles across the screen.
const MAX_FRAMES_PER_TICK: f64 = 4.0;

pub(crate) struct AppState {
    cfg: AppConfig,
    pub(crate) session: Session,
    rng: fastrand::Rng,
    origin: String,
    ui: Ui,
    icons: IconField,
    trail: HeartTrail,
    confetti: Option<Confetti>,
    viewport: (f64, f64),
    mounted_ms: f64,
    last_frame_ms: Option<f64>,
    // Identifies the frame loop that belongs to this mount.
    mount_id: u64,
    // Dropped together with the state; dropping removes the DOM listeners.
    listeners: Vec<Listener>,
}

impl AppState {
    pub(crate) fn cue(&self, cue: Cue) {
        if self.cfg.sound {
            audio::play(cue);
        }
    }

    fn container(&self) -> Option<Bounds> {
        if !self.ui.button_area.is_connected() {
            return None;
        }
        let rect = self.ui.button_area.get_bounding_client_rect();
        Some(Bounds {
            width: rect.width(),
            height: rect.height(),
        })
    }
}

thread_local! {
    static APP_STATE: RefCell<Option<AppState>> = const { RefCell::new(None) };
    static MOUNT_COUNTER: std::cell::Cell<u64> = const { std::cell::Cell::new(0) };
}

/// Run `f` against the mounted app, if any. Re-entrant calls (an event fired
/// synchronously from inside another handler) are dropped.
pub(crate) fn with_state<R>(f: impl FnOnce(&mut AppState) -> R) -> Option<R> {
    APP_STATE.with(|cell| {
        let mut guard = cell.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    })
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn viewport() -> (f64, f64) {
    let Some(win) = window() else {
        return (0.0, 0.0);
    };
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (dim(win.inner_width()), dim(win.inner_height()))
}

#[cfg(feature = "rng")]
fn seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(err) => {
            log::debug!("getrandom unavailable ({err}); seeding from clock");
            clock_seed()
        }
    }
}

#[cfg(not(feature = "rng"))]
fn seed() -> u64 {
    clock_seed()
}

fn clock_seed() -> u64 {
    // Sub-millisecond bits of performance.now() vary enough between page loads.
    (now_ms() * 1000.0) as u64 ^ 0x9E37_79B9_7F4A_7C15
}

/// Build the page and start the app. Mounting again replaces the previous
/// instance (and releases its listeners).
pub fn mount(cfg: AppConfig) -> AppResult<()> {
    cfg.validate()?;
    let win = window().ok_or(AppError::NoWindow)?;
    let doc = win.document().ok_or(AppError::NoDocument)?;
    let location = win.location();
    let query = location.search()?;
    let origin = location.origin()?;

    unmount();

    let ui = dom::build(&doc)?;
    let session = Session::from_query(&query, cfg.evasion(), cfg.message_max_chars);
    log::info!("mounted in {:?} stage", session.stage());

    let mut rng = fastrand::Rng::with_seed(seed());
    let (vw, vh) = viewport();
    let mut icons = IconField::default();
    icons.ensure(cfg.icon_count(vw), &mut rng);
    ui.fx_canvas.set_width(vw.max(0.0) as u32);
    ui.fx_canvas.set_height(vh.max(0.0) as u32);

    let listeners = attach_listeners(&win, &ui)?;
    let trail = HeartTrail::new(cfg.heart_trail_cap);
    let mount_id = MOUNT_COUNTER.with(|c| {
        c.set(c.get() + 1);
        c.get()
    });
    let mut state = AppState {
        cfg,
        session,
        rng,
        origin,
        ui,
        icons,
        trail,
        confetti: None,
        viewport: (vw, vh),
        mounted_ms: now_ms(),
        last_frame_ms: None,
        mount_id,
        listeners,
    };
    render(&mut state);
    APP_STATE.with(|cell| cell.replace(Some(state)));
    start_frame_loop(mount_id);
    Ok(())
}

/// Tear down the mounted app: listeners are released and the page removed.
pub fn unmount() {
    let previous = APP_STATE.with(|cell| cell.borrow_mut().take());
    if let Some(state) = previous {
        state.ui.root.remove();
        log::debug!("unmounted ({} listeners released)", state.listeners.len());
    }
}

#[wasm_bindgen]
pub fn stop_app() {
    unmount();
}

fn attach_listeners(win: &web_sys::Window, ui: &Ui) -> AppResult<Vec<Listener>> {
    let mut out = Vec::new();

    // Ambient: heart trail and viewport tracking.
    out.push(Listener::new(win, "pointermove", |evt: PointerEvent| {
        let (x, y) = (evt.client_x() as f64, evt.client_y() as f64);
        with_state(|s| s.trail.on_pointer_move(x, y, now_ms(), &mut s.rng));
    })?);
    out.push(Listener::new(win, "click", |evt: MouseEvent| {
        let (x, y) = (evt.client_x() as f64, evt.client_y() as f64);
        with_state(|s| s.trail.on_click(x, y, now_ms()));
    })?);
    out.push(Listener::new(win, "resize", |_: Event| {
        with_state(on_resize);
    })?);

    // Generate stage.
    out.push(Listener::new(&ui.from_input, "input", |_: Event| {
        with_state(|s| {
            let value = s.ui.from_input.value();
            s.session.set_from_name(&value);
        });
    })?);
    out.push(Listener::new(&ui.to_input, "input", |_: Event| {
        with_state(|s| {
            let value = s.ui.to_input.value();
            s.session.set_to_name(&value);
        });
    })?);
    out.push(Listener::new(&ui.message_input, "input", |_: Event| {
        with_state(|s| {
            let value = s.ui.message_input.value();
            if s.session.set_message(&value) && s.session.message() != value {
                let capped = s.session.message().to_string();
                s.ui.message_input.set_value(&capped);
            }
        });
    })?);
    out.push(Listener::new(&ui.generate_btn, "click", |_: MouseEvent| {
        with_state(|s| {
            let origin = s.origin.clone();
            if s.session.generate(&origin).is_some() {
                s.cue(Cue::Click);
                render(s);
            }
        });
    })?);
    out.push(Listener::new(&ui.copy_btn, "click", |_: MouseEvent| {
        if let Some(Some((link, reset))) =
            with_state(|s| s.session.link().map(|l| (l.to_string(), s.cfg.copied_reset_ms)))
        {
            share::copy_link(link, reset);
        }
    })?);
    out.push(Listener::new(&ui.open_btn, "click", |_: MouseEvent| {
        if let Some(Some(link)) = with_state(|s| {
            let link = s.session.link().map(str::to_string);
            if link.is_some() {
                s.cue(Cue::Click);
            }
            link
        }) {
            share::open_link(&link);
        }
    })?);
    out.push(Listener::new(&ui.share_btn, "click", |_: MouseEvent| {
        let request = with_state(|s| {
            let url = s.session.link()?.to_string();
            s.cue(Cue::Click);
            Some((
                ShareRequest {
                    title: SHARE_TITLE.to_string(),
                    text: s.session.share_text(),
                    url,
                },
                s.cfg.copied_reset_ms,
            ))
        });
        if let Some(Some((req, reset))) = request {
            share::share_link(req, reset);
        }
    })?);
    out.push(Listener::new(&ui.continue_btn, "click", |_: MouseEvent| {
        with_state(|s| {
            if s.session.continue_to_ask() {
                render(s);
            }
        });
    })?);

    // Ask stage.
    out.push(Listener::new(&ui.yes_btn, "mouseenter", |_: MouseEvent| {
        with_state(|s| s.cue(Cue::Hover));
    })?);
    out.push(Listener::new(&ui.yes_btn, "click", |_: MouseEvent| {
        with_state(|s| {
            if s.session.answer_yes() {
                s.cue(Cue::Success);
                let (w, h) = s.viewport;
                s.confetti = Some(Confetti::burst(s.cfg.confetti_pieces, w, h, &mut s.rng));
                render(s);
            }
        });
    })?);
    out.push(Listener::new(&ui.no_btn, "mouseenter", |_: MouseEvent| {
        with_state(|s| on_no_input(s, NoInput::Hover));
    })?);
    out.push(Listener::new(&ui.no_btn, "pointerdown", |evt: PointerEvent| {
        let touch = evt.pointer_type() == "touch";
        if touch {
            // Keep the tap from landing as a press on the moved button.
            evt.prevent_default();
        }
        with_state(|s| on_no_input(s, NoInput::PressStart { touch }));
    })?);
    out.push(Listener::new(&ui.no_btn, "pointercancel", |_: PointerEvent| {
        with_state(|s| on_no_input(s, NoInput::Cancel));
    })?);
    out.push(Listener::new(&ui.no_btn, "click", |evt: MouseEvent| {
        with_state(|s| {
            // detail == 0: keyboard activation, never the end of a tap.
            if evt.detail() == 0 {
                on_no_input(s, NoInput::Cancel);
            }
            on_no_input(s, NoInput::Click);
        });
    })?);

    // Yes stage.
    out.push(Listener::new(&ui.celebrate_btn, "click", |_: MouseEvent| {
        with_state(|s| s.cue(Cue::Success));
    })?);

    Ok(out)
}

fn on_no_input(s: &mut AppState, input: NoInput) {
    let container = s.container();
    let reaction = s.session.no_input(input, container, &mut s.rng);
    if reaction == Reaction::Attempt {
        s.cue(Cue::Hover);
        log::debug!("no attempt #{}", s.session.no_attempts());
    }
    if reaction != Reaction::Ignored {
        render(s);
    }
}

fn on_resize(s: &mut AppState) {
    let (w, h) = viewport();
    s.viewport = (w, h);
    s.ui.fx_canvas.set_width(w.max(0.0) as u32);
    s.ui.fx_canvas.set_height(h.max(0.0) as u32);
    let count = s.cfg.icon_count(w);
    if s.icons.ensure(count, &mut s.rng) {
        log::debug!("decoration density now {count}");
    }
    if let Some(c) = s.confetti.as_mut() {
        c.resize(w, h);
    }
}

/// Sync the DOM with the session.
pub(crate) fn render(s: &mut AppState) {
    let stage = s.session.stage();
    set_visible(&s.ui.generate, stage == Stage::Generate);
    set_visible(&s.ui.ask, stage == Stage::Ask);
    set_visible(&s.ui.yes, stage == Stage::Yes);

    match stage {
        Stage::Generate => {
            let link = s.session.link();
            set_visible(&s.ui.link_area, link.is_some());
            s.ui.link_box.set_text_content(link);
            let label = if s.session.copied() {
                "✔ Copied!"
            } else {
                "📋 Copy Link"
            };
            s.ui.copy_btn.set_text_content(Some(label));
        }
        Stage::Ask => {
            let tag = format!("{} 💞", s.session.name_tag());
            s.ui.ask_tag.set_text_content(Some(&tag));
            s.ui.prompt.set_text_content(Some(s.session.prompt()));
            let _ = s
                .ui
                .yes_btn
                .style()
                .set_property("transform", &format!("scale({})", s.session.yes_scale()));
            let pos = s.session.evasion().position();
            let no_style = s.ui.no_btn.style();
            let _ = no_style.set_property("left", &format!("{}px", pos.left));
            let _ = no_style.set_property("top", &format!("{}px", pos.top));
            s.ui.taunt.set_text_content(s.session.taunt());
        }
        Stage::Yes => {
            let tag = format!("{} 💞", s.session.name_tag());
            s.ui.yes_tag.set_text_content(Some(&tag));
        }
    }
}

// --- Frame loop -------------------------------------------------------------

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(cb: &FrameCallback) {
    if let (Some(w), Some(closure)) = (window(), cb.borrow().as_ref()) {
        let _ = w.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}

fn start_frame_loop(mount_id: u64) -> FrameCallback {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        let alive = with_state(|s| {
            if s.mount_id != mount_id {
                return false;
            }
            frame_tick(s, ts);
            true
        });
        // Stop once unmounted or remounted; the new mount runs its own loop.
        // Dropping the closure breaks the `f` -> closure -> `f` cycle.
        if alive == Some(true) {
            request_frame(&f);
        } else if let Ok(mut slot) = f.try_borrow_mut() {
            slot.take();
        }
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
    g
}

fn frame_tick(s: &mut AppState, now: f64) {
    let frames = s
        .last_frame_ms
        .map(|last| ((now - last) / FRAME_MS).clamp(0.0, MAX_FRAMES_PER_TICK))
        .unwrap_or(0.0);
    s.last_frame_ms = Some(now);

    s.trail.tick(now, &mut s.rng);
    if let Some(c) = s.confetti.as_mut() {
        c.step(frames);
        if c.is_finished() {
            s.confetti = None;
        }
    }
    draw_fx(s, now);
}

fn draw_fx(s: &AppState, now: f64) {
    let ctx = &s.ui.fx_ctx;
    let (w, h) = s.viewport;
    ctx.clear_rect(0.0, 0.0, w, h);

    let t_s = (now - s.mounted_ms) / 1000.0;
    for icon in s.icons.icons() {
        let Some(y) = icon.y_at(t_s, h) else {
            continue;
        };
        let x = icon.left_pct / 100.0 * w;
        glyph(ctx, icon.glyph, x, y, icon.size, icon.rotate_deg, icon.opacity);
    }

    for heart in s.trail.hearts() {
        glyph(
            ctx,
            heart.glyph,
            heart.x,
            heart.y,
            heart.size,
            heart.rotation_deg,
            heart.opacity(now),
        );
    }

    if let Some(c) = &s.confetti {
        for p in c.pieces() {
            ctx.save();
            let _ = ctx.translate(p.x, p.y);
            let _ = ctx.rotate(p.angle);
            ctx.set_fill_style_str(p.color);
            ctx.fill_rect(-p.w / 2.0, -p.h / 2.0, p.w, p.h);
            ctx.restore();
        }
    }
    ctx.set_global_alpha(1.0);
}

fn glyph(
    ctx: &web_sys::CanvasRenderingContext2d,
    text: &str,
    x: f64,
    y: f64,
    size: f64,
    rotate_deg: f64,
    alpha: f64,
) {
    ctx.save();
    ctx.set_global_alpha(alpha);
    ctx.set_font(&format!("{size:.0}px serif"));
    let _ = ctx.translate(x, y);
    let _ = ctx.rotate(rotate_deg.to_radians());
    let _ = ctx.fill_text(text, 0.0, 0.0);
    ctx.restore();
}
