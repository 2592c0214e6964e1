// Static page skeleton: one section per stage, built once and toggled by `render`.
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, HtmlButtonElement, HtmlCanvasElement,
    HtmlElement, HtmlInputElement,
};

use crate::effects::{self, Ornament};
use crate::error::{AppError, AppResult};

const STYLESHEET: &str = r#"
#vp-root { position:relative; min-height:100vh; display:flex; align-items:center; justify-content:center;
  background:linear-gradient(135deg,#ffe1ec 0%,#ffc2d6 50%,#ffa3c0 100%); font-family:'Poppins','Segoe UI',sans-serif;
  overflow:hidden; }
#vp-fx { position:fixed; inset:0; pointer-events:none; z-index:5; }
.vp-card { position:relative; z-index:10; width:min(92vw,560px); padding:36px 28px; border-radius:28px;
  background:rgba(255,255,255,0.82); box-shadow:0 24px 60px rgba(255,77,136,0.25); text-align:center;
  animation:vp-enter 0.6s ease-out; }
.vp-eyebrow { margin:0 0 8px; color:#ff4d88; font-weight:600; letter-spacing:0.5px; }
.vp-card h1 { margin:0 0 12px; color:#3d1029; font-size:clamp(26px,5vw,38px); }
.vp-subtitle { margin:0 0 20px; color:#7a4860; }
.vp-row { display:flex; gap:12px; margin-bottom:12px; flex-wrap:wrap; }
.vp-input { flex:1; min-width:140px; padding:12px 14px; border-radius:14px; border:2px solid #ffc2d6; font-size:16px; }
.vp-btn { border:none; border-radius:999px; padding:12px 22px; font-size:16px; font-weight:600; cursor:pointer;
  transition:transform 0.15s ease; }
.vp-primary { background:#ff4d88; color:#fff; }
.vp-secondary { background:#fff; color:#ff4d88; border:2px solid #ff4d88; }
.vp-accent { background:#8e44ad; color:#fff; }
.vp-ghost { background:transparent; color:#ff4d88; margin-top:14px; }
.vp-link-box { margin:10px 0; padding:10px; border-radius:12px; background:#fff0f5; word-break:break-all;
  font-family:'Fira Code',monospace; font-size:13px; }
.vp-actions { display:flex; gap:10px; justify-content:center; flex-wrap:wrap; }
.vp-name-tag { display:inline-block; margin:0 0 14px; padding:6px 14px; border-radius:999px; background:#ffe1ec; color:#b0245a; }
#vp-button-area { position:relative; height:220px; margin-top:10px; }
#vp-yes { position:absolute; left:24%; top:40%; background:#ff4d88; color:#fff; transform-origin:center; }
#vp-no { position:absolute; width:140px; height:52px; background:#fff; color:#7a4860; border:2px solid #ffc2d6;
  transition:left 0.25s ease, top 0.25s ease; touch-action:none; }
.vp-message { min-height:24px; margin-top:12px; color:#b0245a; font-weight:600; }
.vp-ornaments { position:absolute; inset:0; pointer-events:none; overflow:hidden; border-radius:28px; }
.vp-sparkle { position:absolute; animation:vp-twinkle 2s ease-in-out infinite; opacity:0; }
.vp-rising { position:absolute; bottom:0; font-size:22px; animation:vp-rise 4s ease-out infinite; opacity:0; }
.vp-illustration svg { width:min(70vw,260px); height:auto; }
@keyframes vp-enter { from { opacity:0; transform:translateY(20px); } to { opacity:1; transform:none; } }
@keyframes vp-twinkle { 0%,100% { opacity:0; transform:scale(0) rotate(0deg); } 50% { opacity:1; transform:scale(1) rotate(180deg); } }
@keyframes vp-rise { 0% { opacity:0; transform:translate(0,-20px) rotate(0deg); } 50% { opacity:1; }
  100% { opacity:0; transform:translate(var(--drift),-120px) rotate(var(--turn)); } }
"#;

const ILLUSTRATION: &str = r##"<svg viewBox="0 0 360 260" role="img" aria-hidden="true">
<defs><linearGradient id="vpHeartGlow" x1="0" y1="0" x2="1" y2="1">
<stop offset="0%" stop-color="#ff98c3"/><stop offset="100%" stop-color="#ff4d88"/></linearGradient></defs>
<path d="M180 230c-58-38-120-82-120-138 0-34 24-58 56-58 22 0 40 12 52 30 12-18 30-30 52-30 32 0 56 24 56 58 0 56-62 100-120 138z" fill="url(#vpHeartGlow)"/>
<circle cx="120" cy="120" r="22" fill="#fff" opacity="0.8"/><circle cx="240" cy="120" r="22" fill="#fff" opacity="0.8"/>
<circle cx="120" cy="120" r="10" fill="#ff5c93"/><circle cx="240" cy="120" r="10" fill="#ff5c93"/>
<path d="M150 165c12 16 48 16 60 0" stroke="#fff" stroke-width="8" stroke-linecap="round" fill="none"/>
<path d="M92 64c10-14 36-18 52 0" stroke="#ffe6f0" stroke-width="10" stroke-linecap="round" fill="none" opacity="0.7"/>
<path d="M216 64c10-14 36-18 52 0" stroke="#ffe6f0" stroke-width="10" stroke-linecap="round" fill="none" opacity="0.7"/>
</svg>"##;

/// Handles to every element the app reads or updates after mount.
pub struct Ui {
    pub root: HtmlElement,
    pub fx_canvas: HtmlCanvasElement,
    pub fx_ctx: CanvasRenderingContext2d,
    // Generate
    pub generate: HtmlElement,
    pub from_input: HtmlInputElement,
    pub to_input: HtmlInputElement,
    pub message_input: HtmlInputElement,
    pub generate_btn: HtmlButtonElement,
    pub link_area: HtmlElement,
    pub link_box: HtmlElement,
    pub copy_btn: HtmlButtonElement,
    pub open_btn: HtmlButtonElement,
    pub share_btn: HtmlButtonElement,
    pub continue_btn: HtmlButtonElement,
    // Ask
    pub ask: HtmlElement,
    pub ask_tag: HtmlElement,
    pub prompt: HtmlElement,
    pub button_area: HtmlElement,
    pub yes_btn: HtmlButtonElement,
    pub no_btn: HtmlButtonElement,
    pub taunt: HtmlElement,
    // Yes
    pub yes: HtmlElement,
    pub yes_tag: HtmlElement,
    pub celebrate_btn: HtmlButtonElement,
}

fn create<T: JsCast>(doc: &Document, tag: &str) -> AppResult<T> {
    doc.create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| AppError::Dom(format!("<{tag}> has an unexpected element type")))
}

/// Create `tag` with a class list and optional text, appended to `parent`.
fn child<T: JsCast>(
    doc: &Document,
    parent: &Element,
    tag: &str,
    class: &str,
    text: Option<&str>,
) -> AppResult<T> {
    let el: Element = create(doc, tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    if text.is_some() {
        el.set_text_content(text);
    }
    parent.append_child(&el)?;
    el.dyn_into::<T>()
        .map_err(|_| AppError::Dom(format!("<{tag}> has an unexpected element type")))
}

fn button(doc: &Document, parent: &Element, class: &str, label: &str) -> AppResult<HtmlButtonElement> {
    let btn: HtmlButtonElement = child(doc, parent, "button", class, Some(label))?;
    btn.set_type("button");
    Ok(btn)
}

fn text_input(doc: &Document, parent: &Element, placeholder: &str) -> AppResult<HtmlInputElement> {
    let input: HtmlInputElement = child(doc, parent, "input", "vp-input", None)?;
    input.set_type("text");
    input.set_placeholder(placeholder);
    Ok(input)
}

fn section(doc: &Document, root: &Element, id: &str) -> AppResult<HtmlElement> {
    let sec: HtmlElement = child(doc, root, "section", "vp-card", None)?;
    sec.set_id(id);
    sec.style().set_property("display", "none")?;
    Ok(sec)
}

fn ornaments(doc: &Document, parent: &Element, items: &[Ornament], class: &str) -> AppResult<()> {
    let layer: Element = child(doc, parent, "div", "vp-ornaments", None)?;
    layer.set_attribute("aria-hidden", "true")?;
    for o in items {
        let span: HtmlElement = child(doc, &layer, "span", class, Some(o.glyph))?;
        let style = span.style();
        style.set_property("left", &format!("{}%", o.left_pct))?;
        if o.top_pct < 100.0 {
            style.set_property("top", &format!("{}%", o.top_pct))?;
        }
        style.set_property("animation-delay", &format!("{}s", o.delay_s))?;
        style.set_property("--drift", &format!("{}px", o.drift_x))?;
        let turn = if o.drift_x < 0.0 { -360 } else { 360 };
        style.set_property("--turn", &format!("{turn}deg"))?;
    }
    Ok(())
}

/// Build (or rebuild) the page under `<body>`.
pub fn build(doc: &Document) -> AppResult<Ui> {
    let body = doc.body().ok_or(AppError::NoBody)?;
    if let Some(old) = doc.get_element_by_id("vp-root") {
        old.remove();
    }

    if doc.get_element_by_id("vp-style").is_none() {
        let style: Element = create(doc, "style")?;
        style.set_id("vp-style");
        style.set_text_content(Some(STYLESHEET));
        match doc.head() {
            Some(head) => head.append_child(&style)?,
            None => body.append_child(&style)?,
        };
    }

    let root: HtmlElement = child(doc, &body, "div", "", None)?;
    root.set_id("vp-root");

    let fx_canvas: HtmlCanvasElement = child(doc, &root, "canvas", "", None)?;
    fx_canvas.set_id("vp-fx");
    fx_canvas.set_attribute("aria-hidden", "true")?;
    let fx_ctx: CanvasRenderingContext2d = fx_canvas
        .get_context("2d")?
        .ok_or_else(|| AppError::Dom("2d canvas context unavailable".into()))?
        .dyn_into()
        .map_err(|_| AppError::Dom("2d canvas context has an unexpected type".into()))?;
    fx_ctx.set_text_align("center");
    fx_ctx.set_text_baseline("middle");

    // --- Generate ---
    let generate = section(doc, &root, "vp-generate")?;
    child::<Element>(doc, &generate, "p", "vp-eyebrow", Some("Share the Love 💕"))?;
    child::<Element>(doc, &generate, "h1", "", Some("Create Your Valentine's Moment"))?;
    child::<Element>(
        doc,
        &generate,
        "p",
        "vp-subtitle",
        Some("Craft a personalized love message to make their heart flutter. ✨"),
    )?;
    let names: Element = child(doc, &generate, "div", "vp-row", None)?;
    let from_input = text_input(doc, &names, "Your name")?;
    let to_input = text_input(doc, &names, "Their name")?;
    let msg_row: Element = child(doc, &generate, "div", "vp-row", None)?;
    let message_input = text_input(doc, &msg_row, "Custom message (optional)")?;
    // No `maxlength`: it counts UTF-16 units, the session caps by characters
    // and the input handler writes the capped value back.
    message_input.set_id("vp-message-input");
    let generate_btn = button(doc, &generate, "vp-btn vp-primary", "Generate ✨")?;

    let link_area: HtmlElement = child(doc, &generate, "div", "", None)?;
    link_area.style().set_property("display", "none")?;
    link_area.style().set_property("margin-top", "18px")?;
    child::<Element>(doc, &link_area, "p", "vp-subtitle", Some("✨ Share this magical link:"))?;
    let link_box: HtmlElement = child(doc, &link_area, "div", "vp-link-box", None)?;
    let actions: Element = child(doc, &link_area, "div", "vp-actions", None)?;
    let copy_btn = button(doc, &actions, "vp-btn vp-primary", "📋 Copy Link")?;
    copy_btn.set_id("vp-copy");
    let open_btn = button(doc, &actions, "vp-btn vp-secondary", "↗ Open")?;
    let share_btn = button(doc, &actions, "vp-btn vp-accent", "📤 Share")?;
    share_btn.set_id("vp-share");
    let continue_btn = button(doc, &link_area, "vp-btn vp-ghost", "Continue to Preview →")?;

    // --- Ask ---
    let ask = section(doc, &root, "vp-ask")?;
    let ask_tag: HtmlElement = child(doc, &ask, "p", "vp-name-tag", None)?;
    child::<Element>(doc, &ask, "p", "vp-eyebrow", Some("Valentine's Day Special"))?;
    let prompt: HtmlElement = child(doc, &ask, "h1", "", None)?;
    child::<Element>(
        doc,
        &ask,
        "p",
        "vp-subtitle",
        Some("Your \"yes\" would make this the best Valentine's Day ever! 💕"),
    )?;
    let button_area: HtmlElement = child(doc, &ask, "div", "", None)?;
    button_area.set_id("vp-button-area");
    let yes_btn = button(doc, &button_area, "vp-btn", "Yes 💖")?;
    yes_btn.set_id("vp-yes");
    let no_btn = button(doc, &button_area, "vp-btn", "No 😅")?;
    no_btn.set_id("vp-no");
    let taunt: HtmlElement = child(doc, &ask, "p", "vp-message", None)?;

    // --- Yes ---
    let yes = section(doc, &root, "vp-yes-screen")?;
    ornaments(doc, &yes, &effects::sparkles(), "vp-sparkle")?;
    ornaments(doc, &yes, &effects::rising_hearts(), "vp-rising")?;
    let yes_tag: HtmlElement = child(doc, &yes, "p", "vp-name-tag", None)?;
    child::<Element>(doc, &yes, "p", "vp-eyebrow", Some("Perfect! 🎊"))?;
    child::<Element>(doc, &yes, "h1", "", Some("You've Made My Heart Skip a Beat! 💖"))?;
    child::<Element>(
        doc,
        &yes,
        "p",
        "vp-subtitle",
        Some("This is the start of something beautiful! You just made my day 💕"),
    )?;
    let art: Element = child(doc, &yes, "div", "vp-illustration", None)?;
    art.set_inner_html(ILLUSTRATION);
    child::<Element>(
        doc,
        &yes,
        "p",
        "vp-message",
        Some("Together, let's create memories that will last forever. Every moment with you is a treasure. 💖✨"),
    )?;
    let celebrate_btn = button(doc, &yes, "vp-btn vp-primary", "🎉 Celebrate! 🎉")?;

    Ok(Ui {
        root,
        fx_canvas,
        fx_ctx,
        generate,
        from_input,
        to_input,
        message_input,
        generate_btn,
        link_area,
        link_box,
        copy_btn,
        open_btn,
        share_btn,
        continue_btn,
        ask,
        ask_tag,
        prompt,
        button_area,
        yes_btn,
        no_btn,
        taunt,
        yes,
        yes_tag,
        celebrate_btn,
    })
}

pub fn set_visible(el: &HtmlElement, visible: bool) {
    let _ = el
        .style()
        .set_property("display", if visible { "block" } else { "none" });
}
