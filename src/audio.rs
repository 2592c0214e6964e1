//! Short synthesized UI cues. Best effort: when Web Audio is unavailable or
//! blocked the cue is dropped and logged at debug level.

use std::cell::RefCell;

use web_sys::{AudioContext, OscillatorType};

/// One tone of a cue, offset from the cue start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Note {
    pub frequency: f64,
    pub duration_s: f64,
    pub offset_s: f64,
}

const fn note(frequency: f64, duration_s: f64, offset_s: f64) -> Note {
    Note {
        frequency,
        duration_s,
        offset_s,
    }
}

const HOVER: &[Note] = &[note(800.0, 0.1, 0.0)];
const CLICK: &[Note] = &[note(600.0, 0.15, 0.0)];
// C5, E5, G5
const SUCCESS: &[Note] = &[
    note(523.0, 0.15, 0.0),
    note(659.0, 0.15, 0.1),
    note(784.0, 0.3, 0.2),
];

const START_GAIN: f32 = 0.3;
const END_GAIN: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Hover,
    Click,
    Success,
}

impl Cue {
    pub fn notes(self) -> &'static [Note] {
        match self {
            Cue::Hover => HOVER,
            Cue::Click => CLICK,
            Cue::Success => SUCCESS,
        }
    }
}

thread_local! {
    static CONTEXT: RefCell<Option<AudioContext>> = const { RefCell::new(None) };
}

pub fn play(cue: Cue) {
    if let Err(err) = try_play(cue) {
        log::debug!("audio cue {cue:?} skipped: {err:?}");
    }
}

fn try_play(cue: Cue) -> Result<(), wasm_bindgen::JsValue> {
    CONTEXT.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = Some(AudioContext::new()?);
        }
        let Some(ctx) = slot.as_ref() else {
            return Ok(());
        };
        let start = ctx.current_time();
        for n in cue.notes() {
            let osc = ctx.create_oscillator()?;
            let gain = ctx.create_gain()?;
            osc.connect_with_audio_node(&gain)?;
            gain.connect_with_audio_node(&ctx.destination())?;
            osc.set_type(OscillatorType::Sine);
            osc.frequency().set_value(n.frequency as f32);

            let t0 = start + n.offset_s;
            let t1 = t0 + n.duration_s;
            gain.gain().set_value_at_time(START_GAIN, t0)?;
            gain.gain().exponential_ramp_to_value_at_time(END_GAIN, t1)?;
            osc.start_with_when(t0)?;
            osc.stop_with_when(t1)?;
        }
        Ok(())
    })
}
