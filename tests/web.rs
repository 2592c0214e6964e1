// Browser tests: `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlElement, HtmlInputElement, window};

wasm_bindgen_test_configure!(run_in_browser);

fn element(id: &str) -> HtmlElement {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        .unwrap_or_else(|| panic!("#{id} missing"))
}

async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn label(id: &str) -> String {
    element(id).text_content().unwrap_or_default()
}

fn shown(id: &str) -> bool {
    element(id).style().get_property_value("display").unwrap() != "none"
}

#[wasm_bindgen_test]
fn mounts_on_generate_screen() {
    valentine_proposal::start_app().unwrap();
    assert!(shown("vp-generate"));
    assert!(!shown("vp-ask"));
    assert!(!shown("vp-yes-screen"));
    valentine_proposal::app::stop_app();
    assert!(window().unwrap().document().unwrap().get_element_by_id("vp-root").is_none());
}

#[wasm_bindgen_test]
fn no_button_dodges_and_yes_finishes() {
    valentine_proposal::start_app().unwrap();
    element("vp-generate")
        .query_selector("button")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
        .click();
    element("vp-generate")
        .query_selector(".vp-ghost")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
        .click();
    assert!(shown("vp-ask"));

    element("vp-no").click();
    element("vp-no").click();
    let taunt = element("vp-ask").query_selector(".vp-message").unwrap().unwrap();
    assert_eq!(taunt.text_content().as_deref(), Some(valentine_proposal::TAUNTS[1]));

    element("vp-yes").click();
    assert!(shown("vp-yes-screen"));
    assert!(!shown("vp-ask"));
    valentine_proposal::app::stop_app();
}

#[wasm_bindgen_test]
async fn copy_label_resets_after_timeout() {
    valentine_proposal::start_app_with_config(r#"{"copied_reset_ms": 20, "sound": false}"#).unwrap();
    element("vp-generate")
        .query_selector("button")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
        .click();
    assert_eq!(label("vp-copy"), "📋 Copy Link");

    element("vp-copy").click();
    sleep_ms(5).await;
    // Headless browsers may refuse clipboard access; then the label never flips.
    let during = label("vp-copy");
    assert!(during == "✔ Copied!" || during == "📋 Copy Link", "{during}");

    sleep_ms(300).await;
    assert_eq!(label("vp-copy"), "📋 Copy Link");
    valentine_proposal::app::stop_app();
}

#[wasm_bindgen_test]
async fn share_settles_back_to_copy_label() {
    valentine_proposal::start_app_with_config(r#"{"copied_reset_ms": 20, "sound": false}"#).unwrap();
    element("vp-generate")
        .query_selector("button")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
        .click();
    element("vp-share").click();
    sleep_ms(300).await;
    assert_eq!(label("vp-copy"), "📋 Copy Link");
    valentine_proposal::app::stop_app();
}

#[wasm_bindgen_test]
fn message_input_is_capped_by_characters() {
    valentine_proposal::start_app_with_config(r#"{"message_max_chars": 10}"#).unwrap();
    let input = element("vp-message-input").dyn_into::<HtmlInputElement>().unwrap();
    input.set_value(&"💖".repeat(15));
    input.dispatch_event(&Event::new("input").unwrap()).unwrap();
    assert_eq!(input.value().chars().count(), 10);
    valentine_proposal::app::stop_app();
}
