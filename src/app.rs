// ── Application dispatcher ────────────────────────────────────────────────────
//
// A single `App` is created on startup and owned by the front end for the
// lifetime of the process.  All mutations happen on the one UI thread; there
// is no global mutable state.
//
// Every user action arrives as a `Command`.  `dispatch` applies it to the
// registry, which answers with an `Update`; `App` is the only place that
// turns an `Update` into drawing.

use std::rc::Rc;

use crate::buffer::Buffer;
use crate::editor::EditorSurface;
use crate::error::Result;
use crate::mode::Mode;
use crate::platform::{Exporter, FileDescriptor, FileSource};
use crate::registry::{BufferRegistry, Update};
use crate::ui::{tabs, TabEvent, View};

/// Name of the help buffer opened by `Command::Info`.
pub const README_NAME: &str = "Readme";

/// Contents of the help buffer.
pub const README_TEXT: &str = "\
*********************************
Tabpad
*********************************
Shortcut:
\tCtrl-S -> save file
\tCtrl-O -> open file
";

// ── Commands ──────────────────────────────────────────────────────────────────

/// Everything a front end can ask the editor to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a new blank buffer and show it.
    New,
    /// Ask the file source for a file, open it and show it.
    Open,
    /// Export the active buffer under its name.
    Save,
    /// Open the help buffer and show it.
    Info,
    Undo,
    Redo,
    /// Files dropped onto the window.  Each becomes a buffer; none is shown.
    Drop(Vec<FileDescriptor>),
    /// Text typed into the editor surface.
    Insert(String),
    /// What the user typed into the mode indicator.
    SetMode(String),
    Tab(TabEvent),
}

impl Command {
    /// Short name for log lines (payloads can be whole files).
    fn name(&self) -> &'static str {
        match self {
            Command::New => "new",
            Command::Open => "open",
            Command::Save => "save",
            Command::Info => "info",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::Drop(_) => "drop",
            Command::Insert(_) => "insert",
            Command::SetMode(_) => "set-mode",
            Command::Tab(_) => "tab",
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App<V: View> {
    registry: BufferRegistry,
    surface: Box<dyn EditorSurface>,
    files: Box<dyn FileSource>,
    exporter: Box<dyn Exporter>,
    view: V,
    /// Key of the tab whose name editor is open.
    editing: Option<String>,
}

impl<V: View> App<V> {
    /// Wire the collaborators together and draw the initial state.
    pub fn new(
        registry: BufferRegistry,
        surface: Box<dyn EditorSurface>,
        files: Box<dyn FileSource>,
        exporter: Box<dyn Exporter>,
        view: V,
    ) -> Result<Self> {
        let mut app = Self {
            registry,
            surface,
            files,
            exporter,
            view,
            editing: None,
        };
        app.apply(Update::ALL)?;
        Ok(app)
    }

    pub fn registry(&self) -> &BufferRegistry {
        &self.registry
    }

    pub fn surface(&self) -> &dyn EditorSurface {
        self.surface.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Apply one command and redraw whatever it changed.
    ///
    /// Failures of host services (open, export) are logged and swallowed;
    /// only view errors are returned.
    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        log::debug!("dispatch {}", command.name());
        let update = match command {
            Command::New => {
                let blank = self.registry.create_blank();
                let key = blank.name().to_owned();
                self.put_and_select(key, blank)
            }
            Command::Open => self.open(),
            Command::Save => self.save(),
            Command::Info => {
                let readme = self.registry.create_from_text(README_NAME, README_TEXT);
                self.put_and_select(README_NAME.to_owned(), readme)
            }
            Command::Undo => {
                self.registry.current().content().borrow_mut().undo();
                Update::TABS
            }
            Command::Redo => {
                self.registry.current().content().borrow_mut().redo();
                Update::TABS
            }
            Command::Drop(files) => self.drop_files(files),
            Command::Insert(text) => {
                if let Some(content) = self.surface.content() {
                    content.borrow_mut().insert(&text);
                }
                Update::TABS
            }
            Command::SetMode(input) => match Mode::from_id(&input) {
                Some(mode) => {
                    self.registry.current().set_mode(mode);
                    Update::ALL
                }
                None => {
                    log::warn!("unknown mode {input:?}");
                    Update::NONE
                }
            },
            Command::Tab(event) => self.on_tab(event),
        };
        self.apply(update)
    }

    // ── Command handlers ─────────────────────────────────────────────────────

    fn put_and_select(&mut self, key: String, buffer: Buffer) -> Update {
        let (key, put) = self.registry.put(key, buffer);
        put | self.registry.select(&key)
    }

    fn open(&mut self) -> Update {
        match self.files.pick() {
            Ok(Some(file)) => {
                log::info!("opened {}", file.name);
                let buffer = self.registry.create_from_text(file.name.clone(), &file.text);
                self.put_and_select(file.name, buffer)
            }
            Ok(None) => Update::NONE,
            Err(e) => {
                log::warn!("open failed: {e}");
                Update::NONE
            }
        }
    }

    fn save(&mut self) -> Update {
        let current = self.registry.current();
        match current.export_as_download(self.exporter.as_mut()) {
            Ok(true) => Update::TABS,
            Ok(false) => {
                log::debug!("nothing exported for {}", current.name());
                Update::NONE
            }
            Err(e) => {
                log::warn!("export of {} failed: {e}", current.name());
                Update::NONE
            }
        }
    }

    fn drop_files(&mut self, files: Vec<FileDescriptor>) -> Update {
        let mut update = Update::NONE;
        for file in files {
            log::info!("dropped {}", file.name);
            let buffer = self.registry.create_from_text(file.name.clone(), &file.text);
            let (_, put) = self.registry.put(file.name, buffer);
            update |= put;
        }
        update
    }

    fn on_tab(&mut self, event: TabEvent) -> Update {
        match event {
            TabEvent::Click(key) => {
                if key == self.registry.active_key() {
                    return Update::NONE;
                }
                self.registry.select(&key)
            }
            TabEvent::DoubleClick(key) => {
                if key != self.registry.active_key() {
                    return Update::NONE;
                }
                self.editing = Some(key);
                Update::TABS
            }
            TabEvent::CommitRename { key, name } => {
                let was_editing = self.editing.take().is_some();
                let update = self.registry.rename(&key, name);
                if was_editing {
                    update | Update::TABS
                } else {
                    update
                }
            }
            TabEvent::Close(key) => self.registry.remove(&key),
        }
    }

    // ── Drawing ──────────────────────────────────────────────────────────────

    fn apply(&mut self, mut update: Update) -> Result<()> {
        if update.active {
            // Redrawing the editor closes any open name editor.
            if self.editing.take().is_some() {
                update |= Update::TABS;
            }
            let current = self.registry.current();
            self.surface.attach(Rc::clone(current.content()));
            self.view.show_mode(current.mode())?;
        }
        if update.tabs {
            let strip = tabs::project(&self.registry, self.editing.as_deref());
            self.view.render_tabs(&strip)?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BlankNamer;
    use crate::editor::{MemoryBackend, Surface};
    use crate::platform::testing::{RecordingExporter, ScriptedFileSource};
    use crate::ui::Tab;

    /// Keeps everything it was asked to draw.
    #[derive(Default)]
    struct RecordingView {
        strips: Vec<Vec<Tab>>,
        modes: Vec<Mode>,
    }

    impl RecordingView {
        fn last_strip(&self) -> &[Tab] {
            self.strips.last().map(Vec::as_slice).unwrap_or(&[])
        }

        fn labels(&self) -> Vec<&str> {
            self.last_strip().iter().map(|t| t.label.as_str()).collect()
        }

        fn active_label(&self) -> Option<&str> {
            self.last_strip()
                .iter()
                .find(|t| t.active)
                .map(|t| t.label.as_str())
        }
    }

    impl View for RecordingView {
        fn render_tabs(&mut self, tabs: &[Tab]) -> Result<()> {
            self.strips.push(tabs.to_vec());
            Ok(())
        }

        fn show_mode(&mut self, mode: Mode) -> Result<()> {
            self.modes.push(mode);
            Ok(())
        }
    }

    fn app_with(files: ScriptedFileSource, exporter: RecordingExporter) -> App<RecordingView> {
        let registry = BufferRegistry::new(BlankNamer::default(), Rc::new(MemoryBackend));
        App::new(
            registry,
            Box::new(Surface::new()),
            Box::new(files),
            Box::new(exporter),
            RecordingView::default(),
        )
        .expect("app")
    }

    fn app() -> App<RecordingView> {
        app_with(ScriptedFileSource::default(), RecordingExporter::default())
    }

    fn attached_text(app: &App<RecordingView>) -> String {
        app.surface()
            .content()
            .map(|c| c.borrow().text())
            .unwrap_or_default()
    }

    #[test]
    fn startup_draws_one_blank_tab() {
        let app = app();
        assert_eq!(app.view().labels(), ["Untitled"]);
        assert_eq!(app.view().modes, [Mode::PlainText]);
        assert!(app.surface().content().is_some());
    }

    #[test]
    fn new_adds_and_shows_a_numbered_blank() {
        let mut app = app();
        app.dispatch(Command::New).expect("new");
        assert_eq!(app.view().labels(), ["Untitled", "Untitled (1)"]);
        assert_eq!(app.view().active_label(), Some("Untitled (1)"));
    }

    #[test]
    fn open_puts_and_selects_the_picked_file() {
        let files = ScriptedFileSource::with([FileDescriptor::new("report.md", "# hi")]);
        let mut app = app_with(files, RecordingExporter::default());

        app.dispatch(Command::Open).expect("open");
        assert_eq!(app.registry().current().name(), "report.md");
        assert_eq!(app.view().modes.last(), Some(&Mode::Markdown));
        assert_eq!(attached_text(&app), "# hi");
    }

    #[test]
    fn cancelled_open_changes_nothing() {
        let mut app = app();
        let drawn = app.view().strips.len();
        app.dispatch(Command::Open).expect("open");
        assert_eq!(app.view().strips.len(), drawn);
        assert_eq!(app.registry().len(), 1);
    }

    #[test]
    fn opening_the_same_name_twice_keeps_the_later_text() {
        let files = ScriptedFileSource::with([
            FileDescriptor::new("a.txt", "first"),
            FileDescriptor::new("a.txt", "second"),
        ]);
        let mut app = app_with(files, RecordingExporter::default());
        app.dispatch(Command::Open).expect("open");
        app.dispatch(Command::Open).expect("open");

        assert_eq!(app.registry().len(), 2);
        assert_eq!(attached_text(&app), "second");
    }

    #[test]
    fn save_exports_the_active_buffer() {
        let mut app = app();
        app.dispatch(Command::Insert("draft".into())).expect("type");
        assert_eq!(app.view().labels(), ["*Untitled"]);

        app.dispatch(Command::Save).expect("save");
        assert_eq!(app.view().labels(), ["Untitled"]);
    }

    #[test]
    fn save_without_export_support_is_silent() {
        let mut app = app_with(ScriptedFileSource::default(), RecordingExporter::unsupported());
        app.dispatch(Command::Insert("draft".into())).expect("type");
        app.dispatch(Command::Save).expect("save");
        assert_eq!(app.view().labels(), ["*Untitled"]);
    }

    #[test]
    fn info_opens_the_readme() {
        let mut app = app();
        app.dispatch(Command::Info).expect("info");
        assert_eq!(app.view().active_label(), Some(README_NAME));
        assert!(attached_text(&app).contains("Ctrl-S -> save file"));
    }

    #[test]
    fn undo_and_redo_reach_the_active_content() {
        let mut app = app();
        app.dispatch(Command::Insert("abc".into())).expect("type");
        app.dispatch(Command::Undo).expect("undo");
        assert_eq!(attached_text(&app), "");
        app.dispatch(Command::Redo).expect("redo");
        assert_eq!(attached_text(&app), "abc");
    }

    #[test]
    fn dropped_files_are_added_without_switching() {
        let mut app = app();
        app.dispatch(Command::Drop(vec![
            FileDescriptor::new("a.rs", "fn a() {}"),
            FileDescriptor::new("b.py", "pass"),
        ]))
        .expect("drop");

        assert_eq!(app.view().labels(), ["Untitled", "a.rs", "b.py"]);
        assert_eq!(app.view().active_label(), Some("Untitled"));
        assert_eq!(app.registry().get("a.rs").map(|b| b.mode()), Some(Mode::Rust));
    }

    #[test]
    fn set_mode_updates_indicator_and_ignores_unknown() {
        let mut app = app();
        app.dispatch(Command::SetMode("json".into())).expect("mode");
        assert_eq!(app.registry().current().mode(), Mode::Json);
        assert_eq!(app.view().modes.last(), Some(&Mode::Json));

        let shown = app.view().modes.len();
        app.dispatch(Command::SetMode("klingon".into())).expect("mode");
        assert_eq!(app.view().modes.len(), shown);
        assert_eq!(app.registry().current().mode(), Mode::Json);
    }

    #[test]
    fn clicking_an_inactive_tab_selects_it() {
        let mut app = app();
        app.dispatch(Command::New).expect("new");
        app.dispatch(Command::Tab(TabEvent::Click("Untitled".into())))
            .expect("click");
        assert_eq!(app.view().active_label(), Some("Untitled"));

        let drawn = app.view().strips.len();
        app.dispatch(Command::Tab(TabEvent::Click("Untitled".into())))
            .expect("click active");
        assert_eq!(app.view().strips.len(), drawn, "active tab ignores clicks");
    }

    #[test]
    fn double_click_then_commit_renames_in_place() {
        let mut app = app();
        app.dispatch(Command::Tab(TabEvent::DoubleClick("Untitled".into())))
            .expect("dblclick");
        assert!(app.view().last_strip()[0].editing);

        app.dispatch(Command::Tab(TabEvent::CommitRename {
            key: "Untitled".into(),
            name: "notes.md".into(),
        }))
        .expect("commit");

        let tab = &app.view().last_strip()[0];
        assert!(!tab.editing);
        assert_eq!(tab.key, "Untitled");
        assert_eq!(tab.label, "notes.md");
        assert_eq!(app.view().modes.last(), Some(&Mode::Markdown));
    }

    #[test]
    fn double_click_on_inactive_tab_is_ignored() {
        let mut app = app();
        app.dispatch(Command::New).expect("new");
        app.dispatch(Command::Tab(TabEvent::DoubleClick("Untitled".into())))
            .expect("dblclick");
        assert!(app.view().last_strip().iter().all(|t| !t.editing));
    }

    #[test]
    fn closing_the_last_tab_opens_a_fresh_blank() {
        let mut app = app();
        app.dispatch(Command::Tab(TabEvent::Close("Untitled".into())))
            .expect("close");
        assert_eq!(app.view().labels(), ["Untitled (1)"]);
        assert_eq!(app.view().active_label(), Some("Untitled (1)"));
        assert_eq!(attached_text(&app), "");
    }

    #[test]
    fn switching_tabs_closes_the_name_editor() {
        let mut app = app();
        app.dispatch(Command::Tab(TabEvent::DoubleClick("Untitled".into())))
            .expect("dblclick");
        app.dispatch(Command::New).expect("new");
        assert!(app.view().last_strip().iter().all(|t| !t.editing));

        app.dispatch(Command::Tab(TabEvent::Close("Untitled (1)".into())))
            .expect("close");
        let tab = &app.view().last_strip()[0];
        assert!(tab.active);
        assert!(!tab.editing, "name editor needs a fresh double click");
    }

    #[test]
    fn opening_the_readme_closes_the_name_editor() {
        let mut app = app();
        app.dispatch(Command::Tab(TabEvent::DoubleClick("Untitled".into())))
            .expect("dblclick");
        app.dispatch(Command::Info).expect("info");
        app.dispatch(Command::Tab(TabEvent::Click("Untitled".into())))
            .expect("click");
        assert!(app.view().last_strip().iter().all(|t| !t.editing));
    }

    #[test]
    fn cancelled_save_keeps_the_modified_marker() {
        let mut app = app_with(ScriptedFileSource::default(), RecordingExporter::cancelling());
        app.dispatch(Command::Insert("draft".into())).expect("type");
        let drawn = app.view().strips.len();

        app.dispatch(Command::Save).expect("save");
        assert_eq!(app.view().strips.len(), drawn);
        assert_eq!(app.view().labels(), ["*Untitled"]);
        assert!(app.registry().current().is_modified());
    }

    #[test]
    fn failed_save_is_swallowed_and_keeps_the_modified_marker() {
        let mut app = app_with(ScriptedFileSource::default(), RecordingExporter::failing());
        app.dispatch(Command::Insert("draft".into())).expect("type");

        app.dispatch(Command::Save).expect("save failure is not returned");
        assert_eq!(app.view().labels(), ["*Untitled"]);
        assert_eq!(app.registry().len(), 1);

        app.dispatch(Command::New).expect("still dispatching");
        assert_eq!(app.registry().len(), 2);
    }

    #[test]
    fn failed_open_is_swallowed_and_changes_nothing() {
        let mut app = app_with(ScriptedFileSource::failing(), RecordingExporter::default());
        app.dispatch(Command::Insert("draft".into())).expect("type");
        let drawn = app.view().strips.len();

        app.dispatch(Command::Open).expect("open failure is not returned");
        assert_eq!(app.view().strips.len(), drawn);
        assert_eq!(app.registry().keys().collect::<Vec<_>>(), ["Untitled"]);
        assert_eq!(app.view().labels(), ["*Untitled"]);
        assert_eq!(attached_text(&app), "draft");
    }

    #[test]
    fn closing_an_unknown_tab_draws_nothing() {
        let mut app = app();
        let drawn = app.view().strips.len();
        app.dispatch(Command::Tab(TabEvent::Close("nope".into())))
            .expect("close");
        assert_eq!(app.view().strips.len(), drawn);
    }
}
