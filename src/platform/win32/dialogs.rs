// ── Common dialogs ─────────────────────────────────────────────────────────────
//
// Native Open / Save As dialogs behind the `FileSource` and `Exporter`
// traits.  Cancel maps to `Ok(None)` for open and to `Ok(false)` for save.
//
// This is inside `platform::win32` so `unsafe` is permitted per crate policy.

#![allow(unsafe_code)]

use std::path::PathBuf;

use windows::{
    core::{PCWSTR, PWSTR},
    Win32::{
        Foundation::HWND,
        UI::Controls::Dialogs::{
            CommDlgExtendedError, GetOpenFileNameW, GetSaveFileNameW, OFN_FILEMUSTEXIST,
            OFN_HIDEREADONLY, OFN_OVERWRITEPROMPT, OFN_PATHMUSTEXIST, OPENFILENAMEW,
        },
    },
};

use crate::error::{Result, TabpadError};
use crate::platform::{Exporter, FileDescriptor, FileSource};

// ── Buffer size ───────────────────────────────────────────────────────────────

/// Maximum path length in `WCHAR`s, including the null terminator.
/// `MAX_PATH` (260) is too short for modern Windows paths; use 32 768 which
/// is the documented maximum for `\\?\` extended paths.
const PATH_BUF_LEN: usize = 32_768;

/// Null-separated pairs ending with a double null.
const FILTER: &str = "All Files (*.*)\0*.*\0Text Files (*.txt)\0*.txt\0\0";

// ── Open dialog ───────────────────────────────────────────────────────────────

/// Picks files with the standard "Open File" dialog.
#[derive(Default)]
pub struct DialogFileSource {
    owner: HWND,
}

impl DialogFileSource {
    pub fn new(owner: HWND) -> Self {
        Self { owner }
    }
}

impl FileSource for DialogFileSource {
    fn pick(&mut self) -> Result<Option<FileDescriptor>> {
        let mut buf = vec![0u16; PATH_BUF_LEN];
        let filter: Vec<u16> = FILTER.encode_utf16().collect();

        let mut ofn = OPENFILENAMEW {
            lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
            hwndOwner: self.owner,
            lpstrFilter: PCWSTR(filter.as_ptr()),
            lpstrFile: PWSTR(buf.as_mut_ptr()),
            nMaxFile: PATH_BUF_LEN as u32,
            Flags: OFN_FILEMUSTEXIST | OFN_PATHMUSTEXIST | OFN_HIDEREADONLY,
            ..Default::default()
        };

        // SAFETY: `ofn` is fully initialised; `buf` and `filter` outlive this
        // call.  GetOpenFileNameW reads and writes only within the buffers we
        // provided.  Called on the thread that owns `owner` (or with a null
        // owner), as modal dialogs require.
        let ok = unsafe { GetOpenFileNameW(&mut ofn) };

        if !ok.as_bool() {
            return cancelled_or_failed("GetOpenFileNameW").map(|()| None);
        }
        FileDescriptor::read(&path_from_buf(&buf)).map(Some)
    }
}

// ── Save dialog ───────────────────────────────────────────────────────────────

/// Saves buffers with the standard "Save As" dialog, pre-filled with the
/// buffer name.
#[derive(Default)]
pub struct DialogExporter {
    owner: HWND,
}

impl DialogExporter {
    pub fn new(owner: HWND) -> Self {
        Self { owner }
    }
}

impl Exporter for DialogExporter {
    fn supported(&self) -> bool {
        true
    }

    fn export(&mut self, file_name: &str, text: &str) -> Result<bool> {
        let mut buf: Vec<u16> = file_name
            .encode_utf16()
            .chain(std::iter::repeat(0).take(PATH_BUF_LEN))
            .take(PATH_BUF_LEN)
            .collect();
        let filter: Vec<u16> = FILTER.encode_utf16().collect();

        let mut ofn = OPENFILENAMEW {
            lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
            hwndOwner: self.owner,
            lpstrFilter: PCWSTR(filter.as_ptr()),
            lpstrFile: PWSTR(buf.as_mut_ptr()),
            nMaxFile: PATH_BUF_LEN as u32,
            Flags: OFN_OVERWRITEPROMPT | OFN_PATHMUSTEXIST,
            ..Default::default()
        };

        // SAFETY: same invariants as `DialogFileSource::pick` above.
        let ok = unsafe { GetSaveFileNameW(&mut ofn) };

        if !ok.as_bool() {
            return cancelled_or_failed("GetSaveFileNameW").map(|()| false);
        }
        let path = path_from_buf(&buf);
        std::fs::write(&path, text)?;
        log::info!("exported {}", path.display());
        Ok(true)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A dialog returned FALSE: zero extended error means the user cancelled.
fn cancelled_or_failed(function: &'static str) -> Result<()> {
    // SAFETY: CommDlgExtendedError has no preconditions; it reads the
    // thread-local result of the last common-dialog call.
    let code = unsafe { CommDlgExtendedError() };
    if code.0 == 0 {
        Ok(())
    } else {
        Err(TabpadError::Win32 {
            function,
            code: code.0,
        })
    }
}

/// Convert a null-terminated UTF-16 buffer to a `PathBuf`.
fn path_from_buf(buf: &[u16]) -> PathBuf {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    PathBuf::from(String::from_utf16_lossy(&buf[..len]))
}
