// ── Buffer registry ───────────────────────────────────────────────────────────
//
// Owns the open buffers in tab order and tracks which one is active.
//
// Invariants:
//   • `entries` is never empty after construction; removing the last buffer
//     creates a fresh blank one.
//   • `active` always indexes a live entry.
//
// Entries are keyed by the buffer's name at the time it was put.  `rename`
// changes the display name only; the key stays where it was.
//
// Mutators never draw anything.  They return an `Update` and the dispatcher
// (`App`) performs the redraw it asks for.

use std::ops::{BitOr, BitOrAssign};
use std::rc::Rc;

use crate::buffer::{BlankNamer, Buffer};
use crate::editor::ContentFactory;

// ── Update ────────────────────────────────────────────────────────────────────

/// What the view has to refresh after a registry mutation.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Update {
    /// Rebuild the tab strip.
    pub tabs: bool,
    /// Re-attach the active buffer to the editor surface and refresh the
    /// mode indicator.
    pub active: bool,
}

impl Update {
    pub const NONE: Update = Update {
        tabs: false,
        active: false,
    };
    pub const TABS: Update = Update {
        tabs: true,
        active: false,
    };
    pub const ALL: Update = Update {
        tabs: true,
        active: true,
    };

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl BitOr for Update {
    type Output = Update;

    fn bitor(self, rhs: Update) -> Update {
        Update {
            tabs: self.tabs || rhs.tabs,
            active: self.active || rhs.active,
        }
    }
}

impl BitOrAssign for Update {
    fn bitor_assign(&mut self, rhs: Update) {
        *self = *self | rhs;
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

struct Entry {
    key: String,
    buffer: Buffer,
}

pub struct BufferRegistry {
    entries: Vec<Entry>,
    active: usize,
    namer: BlankNamer,
    factory: Rc<dyn ContentFactory>,
}

impl BufferRegistry {
    /// A registry holding one blank buffer, marked active.  The caller draws
    /// the initial state (equivalent to `Update::ALL`).
    pub fn new(mut namer: BlankNamer, factory: Rc<dyn ContentFactory>) -> Self {
        let blank = Buffer::create_blank(&mut namer, factory.as_ref());
        Self {
            entries: vec![Entry {
                key: blank.name().to_owned(),
                buffer: blank,
            }],
            active: 0,
            namer,
            factory,
        }
    }

    // ── Construction helpers ─────────────────────────────────────────────────

    /// A new blank buffer named by this registry's counter.  Not inserted.
    pub fn create_blank(&mut self) -> Buffer {
        Buffer::create_blank(&mut self.namer, self.factory.as_ref())
    }

    /// A new buffer holding `text`.  Not inserted.
    pub fn create_from_text(&self, name: impl Into<String>, text: &str) -> Buffer {
        Buffer::create_from_text(name, text, self.factory.as_ref())
    }

    // ── Mutators ─────────────────────────────────────────────────────────────

    /// Make `key` the active buffer.  Unknown keys are ignored.
    pub fn select(&mut self, key: &str) -> Update {
        match self.position(key) {
            Some(index) => {
                self.active = index;
                Update::ALL
            }
            None => Update::NONE,
        }
    }

    /// Insert `buffer` under `key`, or replace the buffer already there
    /// (keeping its tab position).  Returns the key so the caller can chain
    /// into `select`.
    pub fn put(&mut self, key: impl Into<String>, buffer: Buffer) -> (String, Update) {
        let key = key.into();
        let mut update = Update::TABS;
        match self.position(&key) {
            Some(index) => {
                self.entries[index].buffer = buffer;
                if index == self.active {
                    update |= self.select(&key);
                }
            }
            None => self.entries.push(Entry {
                key: key.clone(),
                buffer,
            }),
        }
        (key, update)
    }

    /// Change the display name of the buffer stored under `key`.  The entry
    /// stays under `key`.  Unknown keys are ignored.
    pub fn rename(&mut self, key: &str, new_name: impl Into<String>) -> Update {
        let Some(index) = self.position(key) else {
            return Update::NONE;
        };
        self.entries[index].buffer.rename(new_name);
        if index == self.active {
            // The mode indicator follows the new extension.
            Update::ALL
        } else {
            Update::TABS
        }
    }

    /// Close the buffer stored under `key`.  If it was active, the first
    /// remaining buffer becomes active; if none remain, a fresh blank buffer
    /// takes its place.  Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) -> Update {
        let Some(index) = self.position(key) else {
            return Update::NONE;
        };
        self.entries.remove(index);

        if index != self.active {
            if index < self.active {
                self.active -= 1;
            }
            return Update::TABS;
        }

        if self.entries.is_empty() {
            let blank = self.create_blank();
            let (key, update) = self.put(blank.name().to_owned(), blank);
            return update | self.select(&key);
        }
        self.active = 0;
        Update::ALL
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    /// The active buffer.
    pub fn current(&self) -> &Buffer {
        &self.entries[self.active].buffer
    }

    pub fn current_mut(&mut self) -> &mut Buffer {
        &mut self.entries[self.active].buffer
    }

    /// The key of the active buffer.
    pub fn active_key(&self) -> &str {
        &self.entries[self.active].key
    }

    pub fn get(&self, key: &str) -> Option<&Buffer> {
        self.position(key).map(|i| &self.entries[i].buffer)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Buffer> {
        self.position(key).map(move |i| &mut self.entries[i].buffer)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Keys in tab order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// `(key, buffer)` pairs in tab order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Buffer)> {
        self.entries.iter().map(|e| (e.key.as_str(), &e.buffer))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.  The registry always holds at least one
    /// buffer, so this is `false`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
