// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in Tabpad return `error::Result<T>`.  Buffer
// bookkeeping never fails (absent keys are no-ops); errors only come from the
// ambient layer: file I/O, configuration, and native dialogs.

use std::path::PathBuf;

use thiserror::Error;

/// Every error that Tabpad can produce.
#[derive(Debug, Error)]
pub enum TabpadError {
    /// A standard I/O error (file read, export write, console output, …).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A settings file exists but could not be parsed.
    #[error("invalid settings file {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A Win32 API call returned a failure code.
    #[cfg(windows)]
    #[error("{function} failed (error {code:#010x})")]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw extended error code.
        code: u32,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TabpadError>;
