// ── Platform abstraction layer ────────────────────────────────────────────────
//
// File acquisition (open dialog, dropped files) and file export are host
// services.  The rest of the codebase sees them only through the two traits
// below.  No `unsafe` lives here; Win32 FFI is confined to the `win32`
// sub-module and never leaks outward.

use std::path::Path;

use crate::error::Result;

pub mod fs;

#[cfg(windows)]
pub mod win32;

#[cfg(test)]
pub(crate) mod testing;

// ── File descriptor ───────────────────────────────────────────────────────────

/// A file handed to the editor: its bare name and its decoded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub name: String,
    pub text: String,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read and decode the file at `path`.  The descriptor's name is the
    /// final path component.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Ok(Self::new(name, decode_text(&bytes)))
    }
}

// ── Capabilities ──────────────────────────────────────────────────────────────

/// Something that lets the user pick a file to open.
pub trait FileSource {
    /// Ask for a file.  `Ok(None)` means the user cancelled.
    fn pick(&mut self) -> Result<Option<FileDescriptor>>;
}

/// Something that can save text out as a named file.
pub trait Exporter {
    /// Whether this environment can create files at all.  When it can't,
    /// exporting is skipped silently.
    fn supported(&self) -> bool;

    /// Save `text` as a file called `file_name`.  `Ok(false)` means the
    /// user cancelled and nothing was written.
    fn export(&mut self, file_name: &str, text: &str) -> Result<bool>;
}

// ── Text decoding ─────────────────────────────────────────────────────────────

/// Decode file bytes to a `String`.
///
/// Detection order:
/// 1. UTF-16 LE BOM (`FF FE`)
/// 2. UTF-16 BE BOM (`FE FF`)
/// 3. UTF-8 BOM (`EF BB BF`), stripped
/// 4. Everything else as UTF-8, with invalid sequences replaced
pub fn decode_text(bytes: &[u8]) -> String {
    if let Some(payload) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        let units: Vec<u16> = payload
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    if let Some(payload) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = payload
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    let payload = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    String::from_utf8_lossy(payload).into_owned()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
