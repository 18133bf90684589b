use crate::ui::model::{Session, DEFAULT_WIDTH};
use crate::ui::render::styles::STYLE_HELP;
use crate::ui::render::util::fit_width;

pub const HELP_TEXT: &str =
    "[↑/↓] move  [space] select item/group  [g] toggle groups  [enter] confirm  [q] quit";

// One-line key legend, always drawn under the list.
pub fn render_help(m: &Session) -> String {
    let width = if m.vp.width > 0 {
        m.vp.width
    } else {
        DEFAULT_WIDTH
    };
    STYLE_HELP.render(&fit_width(HELP_TEXT, width))
}
