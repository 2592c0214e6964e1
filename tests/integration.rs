// Integration tests (native) for the `valentine-proposal` crate.
// These tests avoid wasm-specific functionality and exercise the pure flow,
// codec and evasion logic so they can run under `cargo test` on the host.

use pretty_assertions::assert_eq;
use valentine_proposal::evasion::{Bounds, EvasionParams, NoInput, Reaction};
use valentine_proposal::{Session, Stage, TAUNTS};

const ORIGIN: &str = "https://valentine.example";

fn session(query: &str) -> Session {
    Session::from_query(query, EvasionParams::default(), 100)
}

#[test]
fn recipient_link_opens_on_the_question() {
    let s = session("?from=Sam&to=Alex");
    assert_eq!(s.stage(), Stage::Ask);
    assert_eq!(s.prompt(), "Will you be my Valentine?");
    assert_eq!(s.name_tag(), "From Sam to Alex");
    assert_eq!(s.taunt(), None);
}

#[test]
fn blank_form_generates_default_names() {
    let mut s = session("");
    let link = s.generate(ORIGIN).unwrap().to_string();
    assert!(link.contains("from=You&to=Your%20Valentine"));
    assert!(!link.contains("msg"));
    assert_eq!(s.link(), Some(link.as_str()));
}

#[test]
fn sender_to_recipient_round_trip() {
    let mut sender = session("");
    sender.set_from_name("Sam");
    sender.set_to_name("Alex");
    sender.set_message("Dinner on Friday? 🍝");
    let link = sender.generate(ORIGIN).unwrap().to_string();

    let query = link.split_once('?').unwrap().1;
    let recipient = session(query);
    assert_eq!(recipient.stage(), Stage::Ask);
    assert_eq!(recipient.prompt(), "Dinner on Friday? 🍝");
    assert_eq!(recipient.name_tag(), "From Sam to Alex");
}

#[test]
fn three_refusals_escalate() {
    let mut rng = fastrand::Rng::with_seed(2024);
    let area = Some(Bounds {
        width: 480.0,
        height: 220.0,
    });
    let mut s = session("?from=Sam&to=Alex");
    for _ in 0..3 {
        assert_eq!(s.no_input(NoInput::Click, area, &mut rng), Reaction::Attempt);
    }
    assert_eq!(s.no_attempts(), 3);
    assert_eq!(s.taunt(), Some(TAUNTS[2]));
    assert!((s.yes_scale() - 1.24).abs() < 1e-9);
}

#[test]
fn yes_never_reverts() {
    let mut rng = fastrand::Rng::with_seed(1);
    let mut s = session("?to=Alex");
    assert!(s.answer_yes());
    s.continue_to_ask();
    s.generate(ORIGIN);
    s.set_from_name("changed");
    s.no_input(NoInput::PressStart { touch: true }, None, &mut rng);
    assert_eq!(s.stage(), Stage::Yes);
    assert_eq!(s.from_name(), "You");
}

#[test]
fn exported_helpers_match_session() {
    assert_eq!(valentine_proposal::taunt_for(0), "");
    assert_eq!(valentine_proposal::taunt_for(1), TAUNTS[0]);
    assert_eq!(valentine_proposal::taunt_for(42), TAUNTS[7]);
    assert_eq!(valentine_proposal::yes_scale(0), 1.0);
    assert_eq!(valentine_proposal::yes_scale(100), 1.6);
    assert_eq!(
        valentine_proposal::encode_link(ORIGIN, "", "", ""),
        "https://valentine.example/?from=You&to=Your%20Valentine"
    );
}

#[test]
fn taunt_list_has_eight_distinct_entries() {
    assert_eq!(TAUNTS.len(), 8);
    let mut sorted = TAUNTS.to_vec();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), 8);
}
