// ── User interface ────────────────────────────────────────────────────────────
//
// `View` is everything the dispatcher needs from a front end: a tab strip
// and a mode indicator.  State lives in the registry; views only draw.

use crate::error::Result;
use crate::mode::Mode;

pub mod console;
pub mod tabs;

pub use tabs::{Tab, TabEvent};

pub trait View {
    /// Replace the whole tab strip with `tabs`.
    fn render_tabs(&mut self, tabs: &[Tab]) -> Result<()>;

    /// Show `mode` in the mode indicator.
    fn show_mode(&mut self, mode: Mode) -> Result<()>;
}
