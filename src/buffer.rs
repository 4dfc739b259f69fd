// ── Buffers ───────────────────────────────────────────────────────────────────
//
// A `Buffer` is one open document: a display name plus a shared reference to
// a content handle owned by the editing widget.  Renaming re-derives the
// syntax mode from the new extension.

use std::cell::Cell;
use std::rc::Rc;

use crate::editor::{Change, ContentFactory, SharedContent};
use crate::error::Result;
use crate::mode::Mode;
use crate::platform::Exporter;

// ── Blank-name counter ────────────────────────────────────────────────────────

/// Hands out names for blank buffers: `base`, `base (1)`, `base (2)`, …
///
/// The counter only ever increases, so a name is never reused even after the
/// buffer that carried it has been closed.  When `base` has an extension the
/// number goes before its first dot (`Untitled.txt` → `Untitled (1).txt`).
#[derive(Debug, Clone)]
pub struct BlankNamer {
    base: String,
    issued: u64,
}

impl BlankNamer {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            issued: 0,
        }
    }

    /// The next name in the sequence.
    pub fn next_name(&mut self) -> String {
        let n = self.issued;
        self.issued += 1;
        if n == 0 {
            return self.base.clone();
        }
        // A leading dot marks a hidden file, not an extension.
        match self.base.char_indices().skip(1).find(|&(_, c)| c == '.') {
            Some((dot, _)) => format!("{} ({n}){}", &self.base[..dot], &self.base[dot..]),
            None => format!("{} ({n})", self.base),
        }
    }

    /// How many names have been handed out.
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

impl Default for BlankNamer {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

// ── Buffer ────────────────────────────────────────────────────────────────────

pub struct Buffer {
    name: String,
    content: SharedContent,
    /// Set by the content handle's change listener, cleared on export.
    modified: Rc<Cell<bool>>,
}

impl Buffer {
    /// An empty buffer named by `namer`.  Advances the counter.
    pub fn create_blank(namer: &mut BlankNamer, factory: &dyn ContentFactory) -> Self {
        let name = namer.next_name();
        Self::create_from_text(name, "", factory)
    }

    /// A buffer holding `text`, with the mode derived from `name`.
    pub fn create_from_text(
        name: impl Into<String>,
        text: &str,
        factory: &dyn ContentFactory,
    ) -> Self {
        let name = name.into();
        let content = factory.create(text, Mode::for_path(&name));
        Self::adopt(name, content)
    }

    /// Bind `name` to a content handle created elsewhere.  The handle's mode
    /// is left as it is.
    ///
    /// Each call registers one change listener that lives as long as the
    /// handle.  It only holds a weak reference to this buffer's modified flag,
    /// so listeners left behind by dropped buffers do nothing.
    pub fn adopt(name: impl Into<String>, content: SharedContent) -> Self {
        let modified = Rc::new(Cell::new(false));
        let flag = Rc::downgrade(&modified);
        content.borrow_mut().on_change(Box::new(move |change| {
            if change == Change::Text {
                if let Some(flag) = flag.upgrade() {
                    flag.set(true);
                }
            }
        }));
        Self {
            name: name.into(),
            content,
            modified,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Change the display name and switch to the mode its extension implies.
    /// Empty or colliding names are accepted as-is.
    pub fn rename(&mut self, new_name: impl Into<String>) {
        self.name = new_name.into();
        self.set_mode(Mode::for_path(&self.name));
    }

    pub fn mode(&self) -> Mode {
        self.content.borrow().mode()
    }

    pub fn set_mode(&self, mode: Mode) {
        self.content.borrow_mut().set_mode(mode);
    }

    pub fn content(&self) -> &SharedContent {
        &self.content
    }

    pub fn text(&self) -> String {
        self.content.borrow().text()
    }

    /// `true` once the text has been edited since creation or the last export.
    pub fn is_modified(&self) -> bool {
        self.modified.get()
    }

    /// Hand the current text to `exporter` under this buffer's name.
    ///
    /// Returns `Ok(false)` without doing anything when the exporter cannot
    /// create files in this environment, or when the user cancelled.  The
    /// modified flag is only cleared once the file has been written.
    pub fn export_as_download(&self, exporter: &mut dyn Exporter) -> Result<bool> {
        if !exporter.supported() {
            return Ok(false);
        }
        let written = exporter.export(&self.name, &self.text())?;
        if written {
            self.modified.set(false);
        }
        Ok(written)
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("name", &self.name)
            .field("mode", &self.mode())
            .field("modified", &self.modified.get())
            .finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
