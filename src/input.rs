// ── Keyboard shortcuts ────────────────────────────────────────────────────────

use crate::app::Command;

/// A key press as reported by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub ctrl: bool,
    pub key: char,
}

impl KeyChord {
    pub fn plain(key: char) -> Self {
        Self { ctrl: false, key }
    }

    pub fn ctrl(key: char) -> Self {
        Self { ctrl: true, key }
    }
}

/// Map a key press to the command it triggers, if any.
///
/// | Chord  | Command |
/// |--------|---------|
/// | Ctrl+S | `Save`  |
/// | Ctrl+O | `Open`  |
pub fn shortcut(chord: KeyChord) -> Option<Command> {
    if !chord.ctrl {
        return None;
    }
    match chord.key.to_ascii_lowercase() {
        's' => Some(Command::Save),
        'o' => Some(Command::Open),
        _ => None,
    }
}
