//! Configuration for the Tabpad front end.
//!
//! Handles:
//! - Command-line argument parsing
//! - The optional JSON settings file
//!
//! Command-line values win over the settings file, which wins over defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TabpadError};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "tabpad")]
#[command(about = "A small tabbed text editor")]
#[command(version)]
pub struct Args {
    /// Settings file to use instead of the per-user default
    #[arg(long, help = "Path to a settings.json file")]
    pub config: Option<PathBuf>,

    /// Directory that "save" writes files into
    #[arg(long, help = "Directory that saved files are written to")]
    pub download_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, help = "Log level (trace, debug, info, warn, error) [default: warn]")]
    pub log_level: Option<String>,

    /// Files to open at startup, as if dropped onto the window
    pub files: Vec<PathBuf>,
}

// ── Settings file ─────────────────────────────────────────────────────────────

/// Contents of `settings.json`.  Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base name for blank buffers (`Untitled`, `Untitled (1)`, …).
    pub blank_name: String,
    /// Directory that "save" writes into.  Defaults to the working directory.
    pub download_dir: Option<PathBuf>,
    /// `env_logger` filter used when `--log-level` is not given.
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            blank_name: "Untitled".to_owned(),
            download_dir: None,
            log_level: None,
        }
    }
}

impl Settings {
    /// Read settings from `path`.  A missing or malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        serde_json::from_slice(&data).map_err(|source| TabpadError::Config {
            path: path.to_owned(),
            source,
        })
    }

    /// Read the per-user settings file if there is one.
    ///
    /// A missing file (or no config directory) yields defaults; any other
    /// failure is returned so the caller can report it.
    pub fn load_default() -> Result<Self> {
        let Some(path) = settings_path() else {
            return Ok(Self::default());
        };
        match Self::load(&path) {
            Err(TabpadError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            other => other,
        }
    }
}

/// `<config dir>/tabpad/settings.json`, or `None` when the platform has no
/// per-user config directory.
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tabpad").join("settings.json"))
}

// ── Resolved configuration ────────────────────────────────────────────────────

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Combined configuration from all sources.
#[derive(Debug, Clone)]
pub struct Config {
    pub blank_name: String,
    pub download_dir: PathBuf,
    /// `env_logger` filter string.
    pub log_level: String,
    /// Files to open at startup.
    pub files: Vec<PathBuf>,
    /// Why the per-user settings file was skipped, if it was.  Resolved
    /// before logging starts, so the front end logs it afterwards.
    pub ignored_settings: Option<String>,
}

impl Config {
    /// Resolve `args` against the settings file they point at (or the
    /// per-user default).  An explicit file must load; a broken per-user
    /// file is skipped and noted in `ignored_settings`.
    pub fn from_args(args: Args) -> Result<Self> {
        let (settings, ignored) = match &args.config {
            Some(path) => (Settings::load(path)?, None),
            None => match Settings::load_default() {
                Ok(settings) => (settings, None),
                Err(e) => (Settings::default(), Some(e.to_string())),
            },
        };
        Ok(Self {
            ignored_settings: ignored,
            ..Self::merge(args, settings)
        })
    }

    /// Combine explicit arguments with already-loaded settings (useful for
    /// testing).
    pub fn merge(args: Args, settings: Settings) -> Self {
        let download_dir = args
            .download_dir
            .or(settings.download_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        let log_level = args
            .log_level
            .or(settings.log_level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned());
        Self {
            blank_name: settings.blank_name,
            download_dir,
            log_level,
            files: args.files,
            ignored_settings: None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
