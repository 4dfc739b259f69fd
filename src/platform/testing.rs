// Test doubles for the host services.

use std::collections::VecDeque;
use std::io;

use super::{Exporter, FileDescriptor, FileSource};
use crate::error::Result;

/// How a `RecordingExporter` answers `export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExportAnswer {
    Write,
    Cancel,
    Fail,
}

/// Records every export instead of writing anything.
pub(crate) struct RecordingExporter {
    pub(crate) supported: bool,
    pub(crate) answer: ExportAnswer,
    pub(crate) exported: Vec<(String, String)>,
}

impl RecordingExporter {
    pub(crate) fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::default()
        }
    }

    /// The user dismisses the save dialog every time.
    pub(crate) fn cancelling() -> Self {
        Self {
            answer: ExportAnswer::Cancel,
            ..Self::default()
        }
    }

    /// Every export fails with an I/O error.
    pub(crate) fn failing() -> Self {
        Self {
            answer: ExportAnswer::Fail,
            ..Self::default()
        }
    }
}

impl Default for RecordingExporter {
    fn default() -> Self {
        Self {
            supported: true,
            answer: ExportAnswer::Write,
            exported: Vec::new(),
        }
    }
}

impl Exporter for RecordingExporter {
    fn supported(&self) -> bool {
        self.supported
    }

    fn export(&mut self, file_name: &str, text: &str) -> Result<bool> {
        match self.answer {
            ExportAnswer::Write => {
                self.exported.push((file_name.to_owned(), text.to_owned()));
                Ok(true)
            }
            ExportAnswer::Cancel => Ok(false),
            ExportAnswer::Fail => {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into())
            }
        }
    }
}

/// Answers `pick` from a queue; an exhausted queue behaves like cancel.
#[derive(Default)]
pub(crate) struct ScriptedFileSource {
    pub(crate) answers: VecDeque<FileDescriptor>,
    pub(crate) fail: bool,
}

impl ScriptedFileSource {
    pub(crate) fn with(files: impl IntoIterator<Item = FileDescriptor>) -> Self {
        Self {
            answers: files.into_iter().collect(),
            fail: false,
        }
    }

    /// Every pick fails, as if the chosen file could not be read.
    pub(crate) fn failing() -> Self {
        Self {
            answers: VecDeque::new(),
            fail: true,
        }
    }
}

impl FileSource for ScriptedFileSource {
    fn pick(&mut self) -> Result<Option<FileDescriptor>> {
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::NotFound, "gone").into());
        }
        Ok(self.answers.pop_front())
    }
}
