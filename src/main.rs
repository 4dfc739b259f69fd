#![deny(unsafe_code)]

use std::io::{self, BufRead};
use std::rc::Rc;

use clap::Parser;

use tabpad::config::{Args, Config};
use tabpad::editor::{MemoryBackend, Surface};
use tabpad::input::shortcut;
use tabpad::platform::{Exporter, FileDescriptor, FileSource};
use tabpad::ui::console::{parse_line, ConsoleView, Input, HELP};
use tabpad::ui::TabEvent;
use tabpad::{App, BlankNamer, BufferRegistry, Command, Result};

fn main() {
    let result = Config::from_args(Args::parse()).and_then(|config| {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(&config.log_level),
        )
        .init();
        run(config)
    });

    if let Err(e) = result {
        eprintln!("tabpad: {e}");
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<()> {
    if let Some(reason) = &config.ignored_settings {
        log::warn!("ignoring settings: {reason}");
    }
    log::debug!("{config:?}");

    let registry = BufferRegistry::new(
        BlankNamer::new(config.blank_name.clone()),
        Rc::new(MemoryBackend),
    );
    let (files, exporter) = host_services(&config);
    let mut app = App::new(
        registry,
        Box::new(Surface::new()),
        files,
        exporter,
        ConsoleView::new(io::stdout()),
    )?;

    if !config.files.is_empty() {
        app.dispatch(Command::Drop(read_all(&config.files)))?;
    }

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let Some(input) = parse_line(&line) else {
            if !line.trim().is_empty() {
                app.view_mut().print("unknown command; try `help`")?;
            }
            continue;
        };
        match input {
            Input::Command(command) => app.dispatch(command)?,
            Input::Key(chord) => {
                if let Some(command) = shortcut(chord) {
                    app.dispatch(command)?;
                }
            }
            Input::Drop(paths) => app.dispatch(Command::Drop(read_all(&paths)))?,
            Input::Rename(name) => {
                let key = app.registry().active_key().to_owned();
                app.dispatch(Command::Tab(TabEvent::DoubleClick(key.clone())))?;
                app.dispatch(Command::Tab(TabEvent::CommitRename { key, name }))?;
            }
            Input::Print => {
                let text = app
                    .surface()
                    .content()
                    .map(|c| c.borrow().text())
                    .unwrap_or_default();
                app.view_mut().print(&text)?;
            }
            Input::Help => app.view_mut().print(HELP)?,
            Input::Quit => break,
        }
    }
    Ok(())
}

/// Read every path; unreadable files are logged and skipped.
fn read_all(paths: &[std::path::PathBuf]) -> Vec<FileDescriptor> {
    paths
        .iter()
        .filter_map(|path| match FileDescriptor::read(path) {
            Ok(file) => Some(file),
            Err(e) => {
                log::warn!("cannot read {}: {e}", path.display());
                None
            }
        })
        .collect()
}

#[cfg(windows)]
fn host_services(_config: &Config) -> (Box<dyn FileSource>, Box<dyn Exporter>) {
    use tabpad::platform::win32::{DialogExporter, DialogFileSource};
    (
        Box::new(DialogFileSource::default()),
        Box::new(DialogExporter::default()),
    )
}

#[cfg(not(windows))]
fn host_services(config: &Config) -> (Box<dyn FileSource>, Box<dyn Exporter>) {
    use tabpad::platform::fs::{DirectoryExporter, PromptFileSource};
    (
        Box::new(PromptFileSource::new(|| io::stdin().lock(), io::stdout())),
        Box::new(DirectoryExporter::new(config.download_dir.clone())),
    )
}
