//! Keyboard Shortcut Listeners
//!
//! Window-level keydown subscriptions. Each listener is removed when the
//! owning component is cleaned up.

use leptos::ev;
use leptos::prelude::*;

use todo_core::{KeyInput, Shortcut};

fn is_mac() -> bool {
    window()
        .navigator()
        .platform()
        .map(|p| p.to_lowercase().contains("mac"))
        .unwrap_or(false)
}

/// Run `handler` whenever `combo` is pressed, for the lifetime of the current owner
pub fn use_shortcut(combo: &str, handler: impl Fn() + 'static) {
    let shortcut = Shortcut::parse(combo, is_mac());
    let handle = window_event_listener(ev::keydown, move |ev| {
        let input = KeyInput {
            key: ev.key(),
            ctrl: ev.ctrl_key(),
            meta: ev.meta_key(),
            alt: ev.alt_key(),
            shift: ev.shift_key(),
        };
        if shortcut.matches(&input) {
            ev.prevent_default();
            handler();
        }
    });
    on_cleanup(move || handle.remove());
}
