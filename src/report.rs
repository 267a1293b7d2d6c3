//! Console formatting for key events. Output is line-oriented and meant for
//! a human watching the terminal, not for machine parsing.

use std::fmt::Write;

use crate::event::{KeySnapshot, ModState};

/// Modifier names in report order, matching the bit declaration order.
const MOD_NAMES: [(ModState, &str); 11] = [
    (ModState::LSHIFT, "LSHIFT"),
    (ModState::RSHIFT, "RSHIFT"),
    (ModState::LCTRL, "LCTRL"),
    (ModState::RCTRL, "RCTRL"),
    (ModState::LALT, "LALT"),
    (ModState::RALT, "RALT"),
    (ModState::LGUI, "LGUI"),
    (ModState::RGUI, "RGUI"),
    (ModState::NUM, "NUM"),
    (ModState::CAPS, "CAPS"),
    (ModState::MODE, "MODE"),
];

/// One full report line for a key transition.
pub fn describe_key(key: &KeySnapshot, pressed: bool) -> String {
    let mut line = String::new();
    let scancode = key.scancode.unwrap_or(0);
    if key.identified {
        let state = if pressed { "pressed " } else { "released" };
        let _ = write!(
            line,
            "Key {state}:  scancode {scancode} = {}, keycode 0x{:08X} = {}",
            key.physical, key.keycode, key.name,
        );
    } else {
        let state = if pressed { "pressed" } else { "released" };
        let _ = write!(
            line,
            "Unknown Key (scancode {scancode} = {}) {state}",
            key.physical,
        );
    }
    if let Some(ch) = key.text.as_deref().and_then(|t| t.chars().next()) {
        let _ = write!(line, " ({})", printable(ch));
    }
    line.push_str(&describe_modifiers(key.mods));
    line
}

/// A character as it should appear in a report: control characters become
/// their caret-escaped form, everything else passes through.
pub fn printable(ch: char) -> String {
    let code = ch as u32;
    if code < 0x20 {
        // 0x01 -> ^A, 0x1B -> ^[ and so on.
        let caret = char::from_u32(code + u32::from('@')).unwrap_or('?');
        format!("^{caret}")
    } else {
        ch.to_string()
    }
}

fn describe_modifiers(mods: ModState) -> String {
    let mut out = String::from(" modifiers:");
    if mods.is_empty() {
        out.push_str(" (none)");
        return out;
    }
    for (flag, name) in MOD_NAMES {
        if mods.contains(flag) {
            out.push(' ');
            out.push_str(name);
        }
    }
    out
}
