// DOM event subscriptions that unsubscribe when dropped.
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

use crate::error::AppResult;

/// An attached event listener. Dropping it removes the listener and frees the
/// closure, so whoever owns the `Listener` owns the subscription.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Listen for `event` on `target`, downcasting to `E` (events of another
    /// type are ignored).
    pub fn new<E, F>(target: &EventTarget, event: &'static str, mut handler: F) -> AppResult<Self>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::wrap(Box::new(move |evt: Event| {
            if let Ok(typed) = evt.dyn_into::<E>() {
                handler(typed);
            }
        }) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}
