// ── Syntax-mode detection ─────────────────────────────────────────────────────
//
// Maps buffer names to `Mode` values and parses the identifiers a user types
// into the mode indicator.  No I/O; pure Rust.

use std::fmt;
use std::path::Path;

// ── Mode enum ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    PlainText,
    C,
    Cpp,
    Python,
    Rust,
    JavaScript,
    TypeScript,
    Html,
    Xml,
    Css,
    Json,
    Sql,
    Toml,
    Ini,
    Batch,
    Makefile,
    Diff,
    Shell,
    Markdown,
    Yaml,
    PowerShell,
}

impl Mode {
    /// Every mode, in menu order.
    pub const ALL: [Mode; 21] = [
        Mode::PlainText,
        Mode::C,
        Mode::Cpp,
        Mode::Python,
        Mode::Rust,
        Mode::JavaScript,
        Mode::TypeScript,
        Mode::Html,
        Mode::Xml,
        Mode::Css,
        Mode::Json,
        Mode::Sql,
        Mode::Toml,
        Mode::Ini,
        Mode::Batch,
        Mode::Makefile,
        Mode::Diff,
        Mode::Shell,
        Mode::Markdown,
        Mode::Yaml,
        Mode::PowerShell,
    ];

    /// Stable lowercase identifier shown in the mode indicator.
    pub fn id(self) -> &'static str {
        match self {
            Mode::PlainText => "text",
            Mode::C => "c",
            Mode::Cpp => "cpp",
            Mode::Python => "python",
            Mode::Rust => "rust",
            Mode::JavaScript => "javascript",
            Mode::TypeScript => "typescript",
            Mode::Html => "html",
            Mode::Xml => "xml",
            Mode::Css => "css",
            Mode::Json => "json",
            Mode::Sql => "sql",
            Mode::Toml => "toml",
            Mode::Ini => "ini",
            Mode::Batch => "batchfile",
            Mode::Makefile => "makefile",
            Mode::Diff => "diff",
            Mode::Shell => "sh",
            Mode::Markdown => "markdown",
            Mode::Yaml => "yaml",
            Mode::PowerShell => "powershell",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Mode::PlainText => "Plain Text",
            Mode::C => "C",
            Mode::Cpp => "C++",
            Mode::Python => "Python",
            Mode::Rust => "Rust",
            Mode::JavaScript => "JavaScript",
            Mode::TypeScript => "TypeScript",
            Mode::Html => "HTML",
            Mode::Xml => "XML",
            Mode::Css => "CSS",
            Mode::Json => "JSON",
            Mode::Sql => "SQL",
            Mode::Toml => "TOML",
            Mode::Ini => "INI",
            Mode::Batch => "Batch",
            Mode::Makefile => "Makefile",
            Mode::Diff => "Diff",
            Mode::Shell => "Shell",
            Mode::Markdown => "Markdown",
            Mode::Yaml => "YAML",
            Mode::PowerShell => "PowerShell",
        }
    }

    /// Parse what the user typed into the mode indicator.
    ///
    /// Accepts either the identifier or the display name, case-insensitively,
    /// with surrounding whitespace ignored.  Returns `None` for anything else.
    pub fn from_id(input: &str) -> Option<Mode> {
        let input = input.trim();
        Mode::ALL.into_iter().find(|m| {
            m.id().eq_ignore_ascii_case(input) || m.display_name().eq_ignore_ascii_case(input)
        })
    }

    /// Detect the mode from a buffer name by inspecting the file name and
    /// extension.  Returns `Mode::PlainText` when no match is found.
    pub fn for_path(name: impl AsRef<Path>) -> Mode {
        let path = name.as_ref();

        // Extension-less special filenames first.
        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            match file_name {
                "Makefile" | "GNUmakefile" | "makefile" => return Mode::Makefile,
                _ => {}
            }
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("c") | Some("h") => Mode::C,
            Some("cpp") | Some("cc") | Some("cxx") | Some("hpp") | Some("hh") | Some("hxx") => {
                Mode::Cpp
            }
            Some("py") | Some("pyw") | Some("pyi") => Mode::Python,
            Some("rs") => Mode::Rust,
            Some("js") | Some("mjs") | Some("cjs") => Mode::JavaScript,
            Some("ts") | Some("mts") | Some("cts") => Mode::TypeScript,
            Some("html") | Some("htm") | Some("xhtml") => Mode::Html,
            Some("xml") | Some("xsl") | Some("xslt") | Some("svg") => Mode::Xml,
            Some("css") | Some("scss") | Some("less") => Mode::Css,
            Some("json") | Some("jsonc") => Mode::Json,
            Some("sql") => Mode::Sql,
            Some("toml") => Mode::Toml,
            Some("ini") | Some("cfg") | Some("conf") | Some("properties") | Some("editorconfig") => {
                Mode::Ini
            }
            Some("bat") | Some("cmd") => Mode::Batch,
            Some("mk") | Some("mak") => Mode::Makefile,
            Some("diff") | Some("patch") => Mode::Diff,
            Some("sh") | Some("bash") | Some("zsh") => Mode::Shell,
            Some("md") | Some("markdown") | Some("mkd") => Mode::Markdown,
            Some("yaml") | Some("yml") => Mode::Yaml,
            Some("ps1") | Some("psm1") | Some("psd1") => Mode::PowerShell,
            _ => Mode::PlainText,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
