// Render module split into focused submodules: rows, footer, full frame.

pub mod full;
pub mod help;
pub mod list;
pub mod styles;
pub mod util;

pub use full::render_full;
pub use help::{render_help, HELP_TEXT};
pub use list::{group_check_state, list_lines, render_list_content, render_row, CheckState};
