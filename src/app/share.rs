// Link side actions: clipboard, native share, open in a new tab.
//
// The browser capabilities are looked up dynamically since either may be
// missing (insecure context, older engines). Every failure ends in "copied"
// staying false; nothing here returns an error to the caller.
use gloo_timers::callback::Timeout;
use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};

use super::{render, with_state};
use crate::audio::Cue;

/// Payload handed to `navigator.share`.
pub struct ShareRequest {
    pub title: String,
    pub text: String,
    pub url: String,
}

fn navigator() -> Result<JsValue, JsValue> {
    let win = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    Ok(win.navigator().into())
}

/// `target[name](...args)`, expecting a promise back.
fn call_method(target: &JsValue, name: &str, arg: &JsValue) -> Result<Promise, JsValue> {
    let method: Function = Reflect::get(target, &JsValue::from_str(name))?.dyn_into()?;
    method.call1(target, arg)?.dyn_into::<Promise>()
}

async fn write_clipboard(text: &str) -> Result<(), JsValue> {
    let clipboard = Reflect::get(&navigator()?, &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(JsValue::from_str("clipboard unavailable"));
    }
    let promise = call_method(&clipboard, "writeText", &JsValue::from_str(text))?;
    JsFuture::from(promise).await?;
    Ok(())
}

/// How a `navigator.share` call ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    /// No share sheet on this platform.
    Unavailable,
    /// The user dismissed the sheet or the call threw.
    Failed,
}

/// What to do once the share attempt has settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowUp {
    Done,
    CopyInstead,
}

pub fn follow_up(outcome: ShareOutcome) -> FollowUp {
    match outcome {
        ShareOutcome::Shared => FollowUp::Done,
        ShareOutcome::Unavailable | ShareOutcome::Failed => FollowUp::CopyInstead,
    }
}

async fn try_native_share(req: &ShareRequest) -> Result<ShareOutcome, JsValue> {
    let nav = navigator()?;
    let share = Reflect::get(&nav, &JsValue::from_str("share"))?;
    if !share.is_function() {
        return Ok(ShareOutcome::Unavailable);
    }
    let data = Object::new();
    Reflect::set(&data, &"title".into(), &JsValue::from_str(&req.title))?;
    Reflect::set(&data, &"text".into(), &JsValue::from_str(&req.text))?;
    Reflect::set(&data, &"url".into(), &JsValue::from_str(&req.url))?;
    let promise = call_method(&nav, "share", &data.into())?;
    JsFuture::from(promise).await?;
    Ok(ShareOutcome::Shared)
}

async fn native_share(req: &ShareRequest) -> ShareOutcome {
    try_native_share(req).await.unwrap_or_else(|err| {
        log::debug!("share cancelled or failed ({err:?})");
        ShareOutcome::Failed
    })
}

async fn copy_flow(link: String, reset_ms: u32) {
    match write_clipboard(&link).await {
        Ok(()) => {
            with_state(|state| {
                state.session.mark_copied();
                state.cue(Cue::Click);
                render(state);
            });
            // Clears unconditionally; a newer copy simply re-sets the flag.
            Timeout::new(reset_ms, || {
                with_state(|state| {
                    state.session.clear_copied();
                    render(state);
                });
            })
            .forget();
        }
        Err(err) => {
            log::warn!("clipboard write failed: {err:?}");
            with_state(|state| {
                state.session.clear_copied();
                render(state);
            });
        }
    }
}

pub fn copy_link(link: String, reset_ms: u32) {
    spawn_local(copy_flow(link, reset_ms));
}

/// Prefer the native share sheet; fall back to copying when it is missing,
/// cancelled, or fails.
pub fn share_link(req: ShareRequest, reset_ms: u32) {
    spawn_local(async move {
        let outcome = native_share(&req).await;
        match follow_up(outcome) {
            FollowUp::Done => log::debug!("shared via native share sheet"),
            FollowUp::CopyInstead => {
                log::debug!("share {outcome:?}; copying instead");
                copy_flow(req.url, reset_ms).await;
            }
        }
    });
}

pub fn open_link(link: &str) {
    let Some(win) = web_sys::window() else {
        return;
    };
    if let Err(err) = win.open_with_url_and_target(link, "_blank") {
        log::warn!("could not open link: {err:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_share_needs_no_copy() {
        assert_eq!(follow_up(ShareOutcome::Shared), FollowUp::Done);
    }

    #[test]
    fn missing_share_sheet_copies() {
        assert_eq!(follow_up(ShareOutcome::Unavailable), FollowUp::CopyInstead);
    }

    #[test]
    fn dismissed_share_copies() {
        assert_eq!(follow_up(ShareOutcome::Failed), FollowUp::CopyInstead);
    }
}
