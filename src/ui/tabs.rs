// ── Tab strip state ───────────────────────────────────────────────────────────
//
// Pure Rust projection of the registry into the tab strip, plus the events a
// tab strip can raise.  No drawing here; views consume `Tab` values.

use crate::buffer::Buffer;
use crate::registry::BufferRegistry;

/// One tab as a view should draw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    /// Registry key the tab's events refer to.
    pub key: String,
    pub label: String,
    pub active: bool,
    /// The active tab shows an inline name editor instead of its label.
    pub editing: bool,
}

/// User interaction with the tab strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabEvent {
    /// Single click.  Selects an inactive tab; ignored on the active one.
    Click(String),
    /// Double click on the name.  Starts in-place renaming of the active tab.
    DoubleClick(String),
    /// Enter or blur in the name editor.
    CommitRename { key: String, name: String },
    /// The close control.
    Close(String),
}

/// Label for a tab: the buffer's name, prefixed with `*` when modified.
pub fn tab_label(buffer: &Buffer) -> String {
    if buffer.is_modified() {
        format!("*{}", buffer.name())
    } else {
        buffer.name().to_owned()
    }
}

/// Build the tab strip from the registry, in insertion order.
///
/// `editing` names the key whose inline editor is open, if any; it only takes
/// effect on the active tab.  Calling this twice without an intervening
/// mutation yields equal output.
pub fn project(registry: &BufferRegistry, editing: Option<&str>) -> Vec<Tab> {
    let active_key = registry.active_key();
    registry
        .iter()
        .map(|(key, buffer)| {
            let active = key == active_key;
            Tab {
                key: key.to_owned(),
                label: tab_label(buffer),
                active,
                editing: active && editing == Some(key),
            }
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
