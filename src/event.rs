//! Input events as the dispatch loop sees them, decoupled from winit types
//! so the loop can be driven headless in tests.

use bitflags::bitflags;
use winit::event::Modifiers;
use winit::keyboard::{Key, ModifiersKeyState, NamedKey, PhysicalKey};

bitflags! {
    /// Modifier state at the time of a key event.
    ///
    /// The per-side bits track the platform's modifiers-changed reports.
    /// NUM, CAPS and MODE (AltGr) are toggled on their key presses because
    /// the platform does not report lock state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ModState: u16 {
        const LSHIFT = 1 << 0;
        const RSHIFT = 1 << 1;
        const LCTRL = 1 << 2;
        const RCTRL = 1 << 3;
        const LALT = 1 << 4;
        const RALT = 1 << 5;
        const LGUI = 1 << 6;
        const RGUI = 1 << 7;
        const NUM = 1 << 8;
        const CAPS = 1 << 9;
        const MODE = 1 << 10;

        const LOCKS = Self::NUM.bits() | Self::CAPS.bits() | Self::MODE.bits();
    }
}

impl ModState {
    /// Per-side bits from a winit modifiers report. Lock bits are not
    /// touched here; callers merge them back in.
    pub fn from_winit(modifiers: &Modifiers) -> Self {
        let state = modifiers.state();
        let mut out = ModState::empty();
        out |= side_bits(
            state.shift_key(),
            modifiers.lshift_state() == ModifiersKeyState::Pressed,
            modifiers.rshift_state() == ModifiersKeyState::Pressed,
            ModState::LSHIFT,
            ModState::RSHIFT,
        );
        out |= side_bits(
            state.control_key(),
            modifiers.lcontrol_state() == ModifiersKeyState::Pressed,
            modifiers.rcontrol_state() == ModifiersKeyState::Pressed,
            ModState::LCTRL,
            ModState::RCTRL,
        );
        out |= side_bits(
            state.alt_key(),
            modifiers.lalt_state() == ModifiersKeyState::Pressed,
            modifiers.ralt_state() == ModifiersKeyState::Pressed,
            ModState::LALT,
            ModState::RALT,
        );
        out |= side_bits(
            state.super_key(),
            modifiers.lsuper_state() == ModifiersKeyState::Pressed,
            modifiers.rsuper_state() == ModifiersKeyState::Pressed,
            ModState::LGUI,
            ModState::RGUI,
        );
        out
    }

    /// Toggles the matching lock bit for a pressed lock key, if any.
    pub fn toggle_lock(&mut self, key: &Key) {
        match key {
            Key::Named(NamedKey::NumLock) => self.toggle(ModState::NUM),
            Key::Named(NamedKey::CapsLock) => self.toggle(ModState::CAPS),
            Key::Named(NamedKey::AltGraph) => self.toggle(ModState::MODE),
            _ => {}
        }
    }
}

/// Resolves a possibly sideless modifier report into per-side flags; a held
/// modifier whose side is unknown is attributed to the left key.
fn side_bits(held: bool, left: bool, right: bool, lflag: ModState, rflag: ModState) -> ModState {
    let mut out = ModState::empty();
    if left {
        out |= lflag;
    }
    if right {
        out |= rflag;
    }
    if held && out.is_empty() {
        out |= lflag;
    }
    out
}

/// Everything worth reporting about one key transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySnapshot {
    /// Hardware scancode, where the platform exposes one.
    pub scancode: Option<u32>,
    /// Name of the physical key position.
    pub physical: String,
    /// Numeric keycode: the translated character's codepoint, 0 when there
    /// is none.
    pub keycode: u32,
    /// Symbolic name of the logical key.
    pub name: String,
    /// Translated character(s), when the press produced any.
    pub text: Option<String>,
    /// Whether the logical key could be identified at all.
    pub identified: bool,
    /// Modifiers active at event time.
    pub mods: ModState,
}

impl KeySnapshot {
    pub fn new(
        physical: &PhysicalKey,
        logical: &Key,
        text: Option<&str>,
        mods: ModState,
    ) -> Self {
        let physical_name = match physical {
            PhysicalKey::Code(code) => format!("{code:?}"),
            PhysicalKey::Unidentified(_) => "Unidentified".into(),
        };
        let (name, identified) = match logical {
            Key::Character(ch) => (ch.to_string(), true),
            Key::Named(named) => (format!("{named:?}"), true),
            Key::Dead(Some(ch)) => (format!("Dead({ch})"), true),
            Key::Dead(None) => ("Dead".into(), true),
            Key::Unidentified(_) => ("Unidentified".into(), false),
        };
        let text = text
            .map(str::to_string)
            .or_else(|| logical.to_text().map(str::to_string));
        let keycode = text
            .as_deref()
            .and_then(|t| t.chars().next())
            .map(u32::from)
            .unwrap_or(0);
        Self {
            scancode: scancode_of(physical),
            physical: physical_name,
            keycode,
            name,
            text,
            identified,
            mods,
        }
    }
}

fn scancode_of(physical: &PhysicalKey) -> Option<u32> {
    #[cfg(any(
        target_os = "linux",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly",
        target_os = "windows",
        target_os = "macos",
    ))]
    {
        use winit::platform::scancode::PhysicalKeyExtScancode;
        physical.to_scancode()
    }
    #[cfg(not(any(
        target_os = "linux",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly",
        target_os = "windows",
        target_os = "macos",
    )))]
    {
        let _ = physical;
        None
    }
}

/// One dispatch step's worth of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The window was asked to close; terminal state.
    Quit,
    KeyPress(KeySnapshot),
    KeyRelease(KeySnapshot),
    /// Composed Unicode text, independent of raw key events.
    TextInput(String),
    /// The window contents need to be shown again.
    Exposed,
    /// Anything the loop ignores.
    Other,
}
