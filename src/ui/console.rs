// ── Console front end ─────────────────────────────────────────────────────────
//
// A line-oriented stand-in for the window: each input line is one user
// action, and every redraw prints one status line.

use std::io::Write;
use std::path::PathBuf;

use super::{Tab, TabEvent, View};
use crate::app::Command;
use crate::error::Result;
use crate::input::KeyChord;
use crate::mode::Mode;

pub const HELP: &str = "\
commands:
  new                 open a blank buffer
  open                open a file (prompts for a path)
  save                save the active buffer
  info                show the readme
  undo | redo
  drop <path>...      add files without switching to them
                      (quote paths that contain spaces)
  tab <key>           switch to a tab
  close <key>         close a tab
  rename <name>       rename the active tab
  mode <id>           set the syntax mode of the active buffer
  type <text>         append a line to the active buffer
  print               show the active buffer
  ^s | ^o             Ctrl+S / Ctrl+O
  help | quit";

// ── Input parsing ─────────────────────────────────────────────────────────────

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Key(KeyChord),
    /// Files to read and drop.
    Drop(Vec<PathBuf>),
    /// Rename the active tab (double-click followed by commit).
    Rename(String),
    Print,
    Help,
    Quit,
}

/// Parse one input line.  Blank lines and unknown words yield `None`.
pub fn parse_line(line: &str) -> Option<Input> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (word, rest) = match line.trim_start().split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (line.trim(), ""),
    };

    let input = match word {
        "new" => Input::Command(Command::New),
        "open" => Input::Command(Command::Open),
        "save" => Input::Command(Command::Save),
        "info" => Input::Command(Command::Info),
        "undo" => Input::Command(Command::Undo),
        "redo" => Input::Command(Command::Redo),
        "mode" => Input::Command(Command::SetMode(rest.trim().to_owned())),
        "type" => Input::Command(Command::Insert(format!("{rest}\n"))),
        "tab" => Input::Command(Command::Tab(TabEvent::Click(rest.trim().to_owned()))),
        "close" => Input::Command(Command::Tab(TabEvent::Close(rest.trim().to_owned()))),
        "rename" => Input::Rename(rest.trim().to_owned()),
        "drop" => Input::Drop(split_paths(rest).into_iter().map(PathBuf::from).collect()),
        "print" => Input::Print,
        "help" => Input::Help,
        "quit" | "exit" => Input::Quit,
        chord if chord.len() == 2 && chord.starts_with('^') => {
            let key = chord.chars().nth(1)?;
            Input::Key(KeyChord::ctrl(key))
        }
        _ => return None,
    };
    Some(input)
}

/// Split on whitespace, keeping double-quoted runs together.
fn split_paths(rest: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut started = false;
    for c in rest.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                started = true;
            }
            c if c.is_whitespace() && !quoted => {
                if started {
                    paths.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }
    if started {
        paths.push(current);
    }
    paths
}

// ── View ──────────────────────────────────────────────────────────────────────

/// Prints the tab strip and mode indicator as text lines.
///
/// The active tab is bracketed; an open name editor shows a trailing `|`.
pub struct ConsoleView<W> {
    out: W,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print arbitrary text (buffer contents, help, …).
    pub fn print(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Format one tab strip as a single line.
pub fn format_tabs(tabs: &[Tab]) -> String {
    let cells: Vec<String> = tabs
        .iter()
        .map(|tab| match (tab.active, tab.editing) {
            (true, true) => format!("[{}|]", tab.label),
            (true, false) => format!("[{}]", tab.label),
            _ => tab.label.clone(),
        })
        .collect();
    format!("tabs: {}", cells.join(" | "))
}

impl<W: Write> View for ConsoleView<W> {
    fn render_tabs(&mut self, tabs: &[Tab]) -> Result<()> {
        writeln!(self.out, "{}", format_tabs(tabs))?;
        self.out.flush()?;
        Ok(())
    }

    fn show_mode(&mut self, mode: Mode) -> Result<()> {
        writeln!(self.out, "mode: {mode}")?;
        self.out.flush()?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(label: &str, active: bool, editing: bool) -> Tab {
        Tab {
            key: label.to_owned(),
            label: label.to_owned(),
            active,
            editing,
        }
    }

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_line("new\n"), Some(Input::Command(Command::New)));
        assert_eq!(parse_line("  save"), Some(Input::Command(Command::Save)));
        assert_eq!(parse_line("quit"), Some(Input::Quit));
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("frobnicate"), None);
    }

    #[test]
    fn parse_arguments() {
        assert_eq!(
            parse_line("mode markdown"),
            Some(Input::Command(Command::SetMode("markdown".into())))
        );
        assert_eq!(
            parse_line("tab Untitled (1)"),
            Some(Input::Command(Command::Tab(TabEvent::Click(
                "Untitled (1)".into()
            ))))
        );
        assert_eq!(
            parse_line("type hello world"),
            Some(Input::Command(Command::Insert("hello world\n".into())))
        );
        assert_eq!(
            parse_line("drop a.txt b.rs"),
            Some(Input::Drop(vec![PathBuf::from("a.txt"), PathBuf::from("b.rs")]))
        );
        assert_eq!(
            parse_line("rename notes.md"),
            Some(Input::Rename("notes.md".into()))
        );
    }

    #[test]
    fn drop_keeps_quoted_paths_whole() {
        assert_eq!(
            parse_line(r#"drop "my notes.txt" b.rs "/srv/shared docs/x.ini""#),
            Some(Input::Drop(vec![
                PathBuf::from("my notes.txt"),
                PathBuf::from("b.rs"),
                PathBuf::from("/srv/shared docs/x.ini"),
            ]))
        );
        assert_eq!(parse_line("drop   "), Some(Input::Drop(vec![])));
    }

    #[test]
    fn parse_key_chords() {
        assert_eq!(parse_line("^s"), Some(Input::Key(KeyChord::ctrl('s'))));
        assert_eq!(parse_line("^o"), Some(Input::Key(KeyChord::ctrl('o'))));
        assert_eq!(parse_line("^"), None);
    }

    #[test]
    fn format_marks_active_and_editing() {
        let line = format_tabs(&[tab("a", false, false), tab("b", true, false)]);
        assert_eq!(line, "tabs: a | [b]");

        let line = format_tabs(&[tab("a", true, true)]);
        assert_eq!(line, "tabs: [a|]");
    }

    #[test]
    fn view_writes_one_line_per_render() {
        let mut view = ConsoleView::new(Vec::new());
        view.render_tabs(&[tab("x.md", true, false)]).expect("render");
        view.show_mode(Mode::Markdown).expect("mode");

        let out = String::from_utf8(view.into_inner()).expect("utf-8");
        assert_eq!(out, "tabs: [x.md]\nmode: markdown\n");
    }
}
