//! Proposal flow: one `Session` per page load, moving Generate → Ask → Yes.
//!
//! Every mutator returns whether it had an effect so the DOM layer knows when
//! to re-render; inputs that do not apply to the current stage are dropped.

use crate::evasion::{Bounds, Evasion, EvasionParams, NoInput, Reaction, taunt_index};
use crate::link::{self, DEFAULT_FROM, DEFAULT_TO, Invitation};

pub const DEFAULT_PROMPT: &str = "Will you be my Valentine?";
pub const SHARE_TITLE: &str = "Will You Be My Valentine? 💖";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Generate,
    Ask,
    Yes,
}

#[derive(Clone, Debug)]
pub struct Session {
    stage: Stage,
    from_name: String,
    to_name: String,
    message: String,
    link: Option<String>,
    copied: bool,
    message_max_chars: usize,
    evasion: Evasion,
}

impl Session {
    /// Start a session; an incoming invitation skips straight to Ask.
    pub fn new(incoming: Option<Invitation>, params: EvasionParams, message_max_chars: usize) -> Self {
        let (stage, inv) = match incoming {
            Some(inv) => (Stage::Ask, inv),
            None => (
                Stage::Generate,
                Invitation {
                    from: String::new(),
                    to: String::new(),
                    message: String::new(),
                },
            ),
        };
        Self {
            stage,
            from_name: inv.from,
            to_name: inv.to,
            message: inv.message,
            link: None,
            copied: false,
            message_max_chars,
            evasion: Evasion::new(params),
        }
    }

    /// Session for a page whose query string is `query`.
    pub fn from_query(query: &str, params: EvasionParams, message_max_chars: usize) -> Self {
        Self::new(link::decode(query), params, message_max_chars)
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn from_name(&self) -> &str {
        &self.from_name
    }

    pub fn to_name(&self) -> &str {
        &self.to_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn copied(&self) -> bool {
        self.copied
    }

    pub fn evasion(&self) -> &Evasion {
        &self.evasion
    }

    pub fn no_attempts(&self) -> u32 {
        self.evasion.attempts()
    }

    pub fn yes_scale(&self) -> f64 {
        self.evasion.yes_scale()
    }

    // --- Generate stage ---------------------------------------------------

    pub fn set_from_name(&mut self, value: &str) -> bool {
        if self.stage != Stage::Generate {
            return false;
        }
        self.from_name = value.to_string();
        true
    }

    pub fn set_to_name(&mut self, value: &str) -> bool {
        if self.stage != Stage::Generate {
            return false;
        }
        self.to_name = value.to_string();
        true
    }

    /// Set the custom message, truncated to the configured character cap.
    pub fn set_message(&mut self, value: &str) -> bool {
        if self.stage != Stage::Generate {
            return false;
        }
        self.message = value.chars().take(self.message_max_chars).collect();
        true
    }

    /// Encode the current fields into a share link for `origin`. Re-generating
    /// overwrites the previous link and clears the copied indicator.
    pub fn generate(&mut self, origin: &str) -> Option<&str> {
        if self.stage != Stage::Generate {
            return None;
        }
        let url = link::encode(origin, &self.from_name, &self.to_name, &self.message);
        log::debug!("generated link {url}");
        self.copied = false;
        self.link = Some(url);
        self.link.as_deref()
    }

    /// Preview the card. Requires a generated link.
    pub fn continue_to_ask(&mut self) -> bool {
        if self.stage != Stage::Generate || self.link.is_none() {
            log::debug!("continue ignored in {:?}", self.stage);
            return false;
        }
        self.advance(Stage::Ask);
        true
    }

    pub fn mark_copied(&mut self) {
        if self.link.is_some() {
            self.copied = true;
        }
    }

    pub fn clear_copied(&mut self) {
        self.copied = false;
    }

    // --- Ask stage --------------------------------------------------------

    pub fn answer_yes(&mut self) -> bool {
        if self.stage != Stage::Ask {
            return false;
        }
        self.advance(Stage::Yes);
        true
    }

    /// Feed a pointer input aimed at the No button. Only meaningful in Ask.
    pub fn no_input(
        &mut self,
        input: NoInput,
        container: Option<Bounds>,
        rng: &mut fastrand::Rng,
    ) -> Reaction {
        if self.stage != Stage::Ask {
            return Reaction::Ignored;
        }
        self.evasion.handle(input, container, rng)
    }

    // --- Derived view values ---------------------------------------------

    pub fn from_label(&self) -> &str {
        label(&self.from_name, DEFAULT_FROM)
    }

    pub fn to_label(&self) -> &str {
        label(&self.to_name, DEFAULT_TO)
    }

    pub fn name_tag(&self) -> String {
        format!("From {} to {}", self.from_label(), self.to_label())
    }

    /// The question shown on the Ask screen.
    pub fn prompt(&self) -> &str {
        if self.message.is_empty() {
            DEFAULT_PROMPT
        } else {
            &self.message
        }
    }

    /// Taunt for the current attempt count, if any.
    pub fn taunt(&self) -> Option<&'static str> {
        taunt_index(self.no_attempts(), crate::TAUNTS.len()).map(|i| crate::TAUNTS[i])
    }

    pub fn share_text(&self) -> String {
        format!(
            "{} has a question for you!",
            label(&self.from_name, "Someone special")
        )
    }

    fn advance(&mut self, next: Stage) {
        debug_assert!(next > self.stage);
        log::info!("stage {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }
}

fn label<'a>(value: &'a str, default: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { default } else { trimmed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evasion::Position;
    use pretty_assertions::assert_eq;

    const BOX: Bounds = Bounds {
        width: 400.0,
        height: 240.0,
    };

    fn fresh() -> Session {
        Session::new(None, EvasionParams::default(), 100)
    }

    #[test]
    fn starts_in_generate_without_link() {
        let s = Session::from_query("", EvasionParams::default(), 100);
        assert_eq!(s.stage(), Stage::Generate);
        assert_eq!(s.link(), None);
        assert_eq!(s.no_attempts(), 0);
        assert_eq!(s.evasion().position(), Position::INITIAL);
    }

    #[test]
    fn incoming_link_starts_in_ask() {
        let s = Session::from_query("?from=Sam&to=Alex", EvasionParams::default(), 100);
        assert_eq!(s.stage(), Stage::Ask);
        assert_eq!(s.prompt(), "Will you be my Valentine?");
        assert_eq!(s.name_tag(), "From Sam to Alex");
    }

    #[test]
    fn custom_message_replaces_prompt() {
        let s = Session::from_query("?to=Alex&msg=Dinner%3F", EvasionParams::default(), 100);
        assert_eq!(s.prompt(), "Dinner?");
        assert_eq!(s.name_tag(), "From You to Alex");
    }

    #[test]
    fn continue_requires_a_link() {
        let mut s = fresh();
        assert!(!s.continue_to_ask());
        assert_eq!(s.stage(), Stage::Generate);
        s.generate("https://x.test");
        assert!(s.continue_to_ask());
        assert_eq!(s.stage(), Stage::Ask);
    }

    #[test]
    fn regenerate_overwrites_link_and_resets_copied() {
        let mut s = fresh();
        s.set_from_name("Sam");
        s.generate("https://x.test");
        s.mark_copied();
        assert!(s.copied());
        s.set_to_name("Alex");
        let link = s.generate("https://x.test").map(str::to_owned);
        assert_eq!(link.as_deref(), Some("https://x.test/?from=Sam&to=Alex"));
        assert!(!s.copied());
    }

    #[test]
    fn copied_needs_a_link() {
        let mut s = fresh();
        s.mark_copied();
        assert!(!s.copied());
    }

    #[test]
    fn message_is_capped_by_chars() {
        let mut s = Session::new(None, EvasionParams::default(), 5);
        s.set_message("💖💖💖💖💖💖💖");
        assert_eq!(s.message().chars().count(), 5);
    }

    #[test]
    fn fields_freeze_after_generate_stage() {
        let mut s = fresh();
        s.set_from_name("Sam");
        s.generate("https://x.test");
        s.continue_to_ask();
        assert!(!s.set_from_name("Eve"));
        assert!(!s.set_message("changed"));
        assert_eq!(s.from_name(), "Sam");
        assert_eq!(s.generate("https://x.test"), None);
    }

    #[test]
    fn three_no_attempts() {
        let mut rng = fastrand::Rng::with_seed(9);
        let mut s = Session::from_query("?from=Sam&to=Alex", EvasionParams::default(), 100);
        for _ in 0..3 {
            assert_eq!(s.no_input(NoInput::Click, Some(BOX), &mut rng), Reaction::Attempt);
        }
        assert_eq!(s.no_attempts(), 3);
        assert_eq!(s.taunt(), Some(crate::TAUNTS[2]));
        assert!((s.yes_scale() - 1.24).abs() < 1e-9);
    }

    #[test]
    fn taunts_clamp_at_last() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut s = Session::from_query("?from=Sam", EvasionParams::default(), 100);
        assert_eq!(s.taunt(), None);
        for _ in 0..20 {
            s.no_input(NoInput::Click, None, &mut rng);
        }
        assert_eq!(s.taunt(), Some(crate::TAUNTS[7]));
    }

    #[test]
    fn yes_is_terminal() {
        let mut rng = fastrand::Rng::with_seed(2);
        let mut s = Session::from_query("?from=Sam", EvasionParams::default(), 100);
        assert!(s.answer_yes());
        assert_eq!(s.stage(), Stage::Yes);
        assert!(!s.answer_yes());
        assert!(!s.continue_to_ask());
        assert_eq!(s.no_input(NoInput::Click, Some(BOX), &mut rng), Reaction::Ignored);
        assert_eq!(s.no_attempts(), 0);
        assert_eq!(s.stage(), Stage::Yes);
    }

    #[test]
    fn no_button_is_inert_outside_ask() {
        let mut rng = fastrand::Rng::with_seed(2);
        let mut s = fresh();
        assert_eq!(s.no_input(NoInput::Click, Some(BOX), &mut rng), Reaction::Ignored);
        assert!(!s.answer_yes());
    }

    #[test]
    fn share_text_uses_sender() {
        let mut s = fresh();
        assert_eq!(s.share_text(), "Someone special has a question for you!");
        s.set_from_name("  Sam ");
        assert_eq!(s.share_text(), "Sam has a question for you!");
    }
}
