// ── Filesystem-backed host services ───────────────────────────────────────────
//
// The console stand-ins for the open dialog and the download action: a path
// prompt on a line-oriented stream, and a download directory.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use super::{Exporter, FileDescriptor, FileSource};
use crate::error::Result;

// ── PromptFileSource ──────────────────────────────────────────────────────────

/// Asks for a path on `output` and reads the answer from the reader that
/// `input` returns.  An empty answer, or end of input, counts as cancel.
///
/// `input` is called once per prompt so a shared stream such as stdin is only
/// locked while the answer is being read.
pub struct PromptFileSource<F, W> {
    input: F,
    output: W,
}

impl<F, R, W> PromptFileSource<F, W>
where
    F: FnMut() -> R,
    R: BufRead,
    W: Write,
{
    pub fn new(input: F, output: W) -> Self {
        Self { input, output }
    }
}

impl<F, R, W> FileSource for PromptFileSource<F, W>
where
    F: FnMut() -> R,
    R: BufRead,
    W: Write,
{
    fn pick(&mut self) -> Result<Option<FileDescriptor>> {
        write!(self.output, "open: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if (self.input)().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let path = line.trim();
        if path.is_empty() {
            return Ok(None);
        }
        FileDescriptor::read(Path::new(path)).map(Some)
    }
}

// ── DirectoryExporter ─────────────────────────────────────────────────────────

/// "Downloads" files by writing them into a fixed directory.
///
/// Export is unsupported (and silently skipped) while the directory does not
/// exist; the exporter never creates it.
#[derive(Debug, Clone)]
pub struct DirectoryExporter {
    dir: PathBuf,
}

impl DirectoryExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Exporter for DirectoryExporter {
    fn supported(&self) -> bool {
        self.dir.is_dir()
    }

    fn export(&mut self, file_name: &str, text: &str) -> Result<bool> {
        // Only the final component of the name is used, so a buffer renamed
        // to "../x" still lands inside the download directory.
        let file_name = Path::new(file_name)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "download".into());
        let path = self.dir.join(file_name);
        std::fs::write(&path, text)?;
        log::info!("exported {}", path.display());
        Ok(true)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
