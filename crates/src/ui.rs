// UI module root: the grouped multi-select checklist, split into focused submodules under `ui/`

pub mod model;
pub mod render;
pub mod rows;
pub mod run;
pub mod update;
pub mod viewport;

// Re-export commonly used symbols so call sites can stay at `crate::ui::*`.
pub use model::{Group, Item, Session, Status};
pub use render::{render_full, render_help, render_list_content, render_row, CheckState};
pub use rows::{build_rows, DisplayRow};
pub use run::{map_key, run, run_session};
pub use update::handle_update;
pub use viewport::ListViewport;

// Messages understood by the input controller
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    WindowSize { width: usize, height: usize },
    KeyUp,
    KeyDown,
    KeyPageUp,
    KeyPageDown,
    KeyHome,
    KeyEnd,
    KeySpace,
    KeyEnter,
    // Ctrl+C
    Interrupt,
    Rune(char),
}
