//! Raw key events and their platform-neutral classification.
//!
//! Events carry the DOM `code` string and the four hardware modifier flags.
//! [`classify`] folds them into a [`Combo`] according to the session's
//! [`PlatformMode`]; the two conventions are intentionally asymmetric:
//!
//! | Combo | Mac | Other |
//! |---|---|---|
//! | primary | Cmd | Ctrl |
//! | primary + secondary | Cmd+Ctrl | Ctrl+Alt |
//! | primary + option | Cmd+Option | Ctrl+Alt |

use crate::host::ElementRef;
use crate::platform::PlatformMode;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Modifiers: u8 {
        const META = 0b0001;
        const CTRL = 0b0010;
        const ALT = 0b0100;
        const SHIFT = 0b1000;
    }
}

/// DOM event type a key event arrived as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeyPhase {
    #[default]
    #[serde(rename = "keydown")]
    Down,
    #[serde(rename = "keyup")]
    Up,
    #[serde(rename = "keypress")]
    Press,
}

/// A key event as observed by the document-level capture listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    #[serde(default)]
    pub phase: KeyPhase,
    /// Physical key identifier (`KeyboardEvent.code`)
    pub code: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Element the event was dispatched to
    #[serde(default)]
    pub target: Option<ElementRef>,
}

impl KeyEvent {
    /// A keydown event with no target.
    pub fn down(code: &str, modifiers: Modifiers) -> Self {
        Self {
            phase: KeyPhase::Down,
            code: code.to_string(),
            modifiers,
            target: None,
        }
    }

    pub fn in_phase(mut self, phase: KeyPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn on(mut self, target: ElementRef) -> Self {
        self.target = Some(target);
        self
    }
}

/// Physical keys any shortcut is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Backslash,
    E,
    T,
    A,
    N,
    I,
    V,
    K,
    Escape,
}

impl Key {
    /// Parse a DOM `code` value. Keys no shortcut uses yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "Enter" => Key::Enter,
            "Backslash" => Key::Backslash,
            "KeyE" => Key::E,
            "KeyT" => Key::T,
            "KeyA" => Key::A,
            "KeyN" => Key::N,
            "KeyI" => Key::I,
            "KeyV" => Key::V,
            "KeyK" => Key::K,
            "Escape" => Key::Escape,
            _ => return None,
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Key::Enter => "ENTER",
            Key::Backslash => "\\",
            Key::E => "E",
            Key::T => "T",
            Key::A => "A",
            Key::N => "N",
            Key::I => "I",
            Key::V => "V",
            Key::K => "K",
            Key::Escape => "ESC",
        }
    }
}

/// Platform-normalised key chord. Recomputed per event, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Combo {
    pub primary: bool,
    pub secondary: bool,
    pub shift: bool,
    /// Alt not absorbed into the secondary modifier
    pub alt: bool,
    pub key: Key,
}

impl Combo {
    pub const fn bare(key: Key) -> Self {
        Self {
            primary: false,
            secondary: false,
            shift: false,
            alt: false,
            key,
        }
    }
}

/// Map a raw event to a combo under the given platform convention.
///
/// Returns `None` for keys no shortcut uses and, on non-Mac platforms, for
/// events with Meta held since no combo there involves it.
pub fn classify(event: &KeyEvent, mode: PlatformMode) -> Option<Combo> {
    let key = Key::from_code(&event.code)?;
    let mods = event.modifiers;
    let shift = mods.contains(Modifiers::SHIFT);

    match mode {
        PlatformMode::Mac => Some(Combo {
            primary: mods.contains(Modifiers::META),
            secondary: mods.contains(Modifiers::CTRL),
            shift,
            alt: mods.contains(Modifiers::ALT),
            key,
        }),
        PlatformMode::Other => {
            if mods.contains(Modifiers::META) {
                return None;
            }
            let ctrl = mods.contains(Modifiers::CTRL);
            let alt = mods.contains(Modifiers::ALT);
            Some(Combo {
                primary: ctrl,
                secondary: ctrl && alt,
                shift,
                alt: alt && !ctrl,
                key,
            })
        }
    }
}

/// How a command is triggered, independent of platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Key alone
    Bare(Key),
    /// Alt/Option + key
    Alt(Key),
    /// Shift + key
    Shift(Key),
    /// Primary modifier + key
    Primary(Key),
    /// Primary + secondary modifier + key (Cmd+Ctrl / Ctrl+Alt)
    PrimarySecondary(Key),
    /// Primary + Option on Mac, which collapses to Ctrl+Alt elsewhere
    PrimaryOption(Key),
}

impl Trigger {
    pub fn key(&self) -> Key {
        match *self {
            Trigger::Bare(k)
            | Trigger::Alt(k)
            | Trigger::Shift(k)
            | Trigger::Primary(k)
            | Trigger::PrimarySecondary(k)
            | Trigger::PrimaryOption(k) => k,
        }
    }

    /// The exact combo this trigger expects under `mode`.
    pub fn combo(&self, mode: PlatformMode) -> Combo {
        let base = Combo::bare(self.key());
        match self {
            Trigger::Bare(_) => base,
            Trigger::Alt(_) => Combo { alt: true, ..base },
            Trigger::Shift(_) => Combo { shift: true, ..base },
            Trigger::Primary(_) => Combo { primary: true, ..base },
            Trigger::PrimarySecondary(_) => Combo {
                primary: true,
                secondary: true,
                ..base
            },
            Trigger::PrimaryOption(_) => match mode {
                PlatformMode::Mac => Combo {
                    primary: true,
                    alt: true,
                    ..base
                },
                PlatformMode::Other => Combo {
                    primary: true,
                    secondary: true,
                    ..base
                },
            },
        }
    }

    /// Exact-match test: every modifier must agree.
    pub fn matches(&self, combo: &Combo, mode: PlatformMode) -> bool {
        self.combo(mode) == *combo
    }

    /// Human-readable label, e.g. `CMD + CTRL + E` or `CTRL + ALT + E`.
    pub fn label(&self, mode: PlatformMode) -> String {
        let combo = self.combo(mode);
        let mut parts: Vec<&str> = Vec::new();
        if combo.primary {
            parts.push(if mode.is_mac() { "CMD" } else { "CTRL" });
        }
        if combo.secondary {
            parts.push(if mode.is_mac() { "CTRL" } else { "ALT" });
        }
        if combo.alt {
            parts.push(if mode.is_mac() { "OPTION" } else { "ALT" });
        }
        if combo.shift {
            parts.push("SHIFT");
        }
        parts.push(combo.key.label());
        parts.join(" + ")
    }
}
