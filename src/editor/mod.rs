// ── Editor component abstraction ──────────────────────────────────────────────
//
// The editing widget is an external collaborator: it owns the text, the undo
// history and the syntax mode of every document.  Tabpad only talks to it
// through the capability sets below, so a different widget can be plugged in
// by implementing three traits.
//
// Everything here is single-threaded; handles are shared as `Rc<RefCell<_>>`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::mode::Mode;

pub mod memory;

pub use memory::{MemoryBackend, MemoryDocument, Surface};

/// What changed inside a content handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// The text was edited (including undo/redo).
    Text,
    /// The syntax mode was switched.
    Mode(Mode),
}

/// Callback registered with [`ContentHandle::on_change`].
pub type ChangeListener = Box<dyn FnMut(Change)>;

/// One editable document owned by the editing widget.
pub trait ContentHandle {
    /// The full current text.
    fn text(&self) -> String;

    /// Append `text` at the end of the document as one undoable edit.
    fn insert(&mut self, text: &str);

    fn mode(&self) -> Mode;

    fn set_mode(&mut self, mode: Mode);

    /// Undo the last edit.  Returns `false` when there was nothing to undo.
    fn undo(&mut self) -> bool;

    /// Redo the last undone edit.  Returns `false` when there was nothing to redo.
    fn redo(&mut self) -> bool;

    /// Register a listener that is invoked after every text or mode change.
    fn on_change(&mut self, listener: ChangeListener);
}

/// A content handle as shared between a `Buffer` and the editor surface.
pub type SharedContent = Rc<RefCell<dyn ContentHandle>>;

/// Creates content handles (the widget's "create session" entry point).
pub trait ContentFactory {
    fn create(&self, text: &str, mode: Mode) -> SharedContent;
}

/// The single shared editing surface.  Exactly one content handle is shown
/// at a time; switching tabs re-attaches a different handle.
pub trait EditorSurface {
    fn attach(&mut self, content: SharedContent);

    /// The currently attached handle, if any.
    fn content(&self) -> Option<&SharedContent>;
}
