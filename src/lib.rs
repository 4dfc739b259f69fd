// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except `platform::win32` (common-dialog
// FFI).  Each unsafe block there MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

//! Tabpad: buffer and tab bookkeeping for a small text editor.
//!
//! The editing widget, file dialogs and the download action are external
//! services behind traits ([`editor`], [`platform`]).  This crate owns which
//! buffers are open, which one is active, how they are named, and a tab strip
//! that mirrors that state.

pub mod app;
pub mod buffer;
pub mod config;
pub mod editor;
pub mod error;
pub mod input;
pub mod mode;
pub mod platform;
pub mod registry;
pub mod ui;

pub use app::{App, Command};
pub use buffer::{BlankNamer, Buffer};
pub use error::{Result, TabpadError};
pub use mode::Mode;
pub use registry::{BufferRegistry, Update};
