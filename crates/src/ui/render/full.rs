use crate::ui::model::{Session, DEFAULT_WIDTH};
use crate::ui::render::styles::STYLE_TITLE;
use crate::ui::render::util::fit_width;

// Title, spacer, list window, help legend. Empty once the session is done.
pub fn render_full(m: &Session) -> String {
    if m.is_done() {
        return String::new();
    }
    let width = if m.vp.width > 0 {
        m.vp.width
    } else {
        DEFAULT_WIDTH
    };
    let mut lines = vec![STYLE_TITLE.render(&fit_width(&m.title, width)), " ".repeat(width)];
    let content = m.render_list_content();
    if !content.is_empty() {
        lines.extend(content.split('\n').map(str::to_string));
    }
    lines.push(m.render_help());
    // terminals shorter than the chrome lose lines from the bottom
    if let Some(height) = m.screen_height {
        lines.truncate(height);
    }
    lines.join("\n")
}
