use lipgloss::{Color, Style};
use once_cell::sync::Lazy;

// Styles kept local to render module
pub static STYLE_TITLE: Lazy<Style> = Lazy::new(|| {
    Style::new()
        .foreground(Color::from_rgb(0, 238, 238))
        .bold(true)
});
pub static STYLE_CURSOR: Lazy<Style> = Lazy::new(|| {
    Style::new()
        .foreground(Color::from_rgb(238, 0, 238))
        .bold(true)
});
pub static STYLE_HEADER: Lazy<Style> = Lazy::new(|| {
    Style::new()
        .foreground(Color::from_rgb(255, 255, 255))
        .bold(true)
});
pub static STYLE_LABEL: Lazy<Style> =
    Lazy::new(|| Style::new().foreground(Color::from_rgb(200, 200, 200)));
pub static STYLE_HELP: Lazy<Style> = Lazy::new(|| Style::new().faint(true));
