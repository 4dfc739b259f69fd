// ── In-memory editor backend ──────────────────────────────────────────────────
//
// A headless stand-in for the editing widget: plain `String` storage with
// snapshot undo/redo.  Used by the console front end and by tests.

use std::cell::RefCell;
use std::rc::Rc;

use super::{Change, ChangeListener, ContentFactory, ContentHandle, EditorSurface, SharedContent};
use crate::mode::Mode;

// ── MemoryDocument ────────────────────────────────────────────────────────────

/// A document held entirely in memory.
pub struct MemoryDocument {
    text: String,
    mode: Mode,
    undo: Vec<String>,
    redo: Vec<String>,
    listeners: Vec<ChangeListener>,
}

impl MemoryDocument {
    pub fn new(text: &str, mode: Mode) -> Self {
        Self {
            text: text.to_owned(),
            mode,
            undo: Vec::new(),
            redo: Vec::new(),
            listeners: Vec::new(),
        }
    }

    fn notify(&mut self, change: Change) {
        for listener in &mut self.listeners {
            listener(change);
        }
    }
}

impl ContentHandle for MemoryDocument {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.undo.push(self.text.clone());
        self.redo.clear();
        self.text.push_str(text);
        self.notify(Change::Text);
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.notify(Change::Mode(mode));
    }

    fn undo(&mut self) -> bool {
        let Some(prev) = self.undo.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.text, prev);
        self.redo.push(current);
        self.notify(Change::Text);
        true
    }

    fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.text, next);
        self.undo.push(current);
        self.notify(Change::Text);
        true
    }

    fn on_change(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }
}

// ── MemoryBackend ─────────────────────────────────────────────────────────────

/// Factory for [`MemoryDocument`] handles.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryBackend;

impl ContentFactory for MemoryBackend {
    fn create(&self, text: &str, mode: Mode) -> SharedContent {
        Rc::new(RefCell::new(MemoryDocument::new(text, mode)))
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

/// The headless editing surface: remembers which handle is attached.
#[derive(Default)]
pub struct Surface {
    attached: Option<SharedContent>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EditorSurface for Surface {
    fn attach(&mut self, content: SharedContent) {
        self.attached = Some(content);
    }

    fn content(&self) -> Option<&SharedContent> {
        self.attached.as_ref()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
