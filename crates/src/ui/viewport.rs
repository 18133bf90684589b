use bubbletea_widgets::Viewport;
use std::ops::Range;

/// Row cursor over a `bubbletea_widgets` viewport.
///
/// The viewport owns the scroll window; this type keeps the cursor within
/// `[0, len - 1]` and moves the window so the cursor stays inside it.
/// `height` is `None` until the first resize, and every row is visible then.
/// A known height of 0 shows no rows at all.
#[derive(Clone, Debug, Default)]
pub struct ListViewport {
    pub cursor: usize,
    pub width: usize,
    pub height: Option<usize>,
    offset: usize,
    window: Viewport,
}

impl ListViewport {
    pub fn new(width: usize, height: usize) -> Self {
        ListViewport {
            width,
            height: Some(height),
            window: Viewport::new(width, height),
            ..Default::default()
        }
    }

    pub fn set_size(&mut self, width: usize, height: usize, len: usize) {
        self.width = width;
        self.height = Some(height);
        self.window = Viewport::new(width, height);
        self.clamp(len);
    }

    pub fn select(&mut self, index: usize, len: usize) {
        self.cursor = index.min(len.saturating_sub(1));
        self.scroll_into_view(len);
    }

    pub fn clamp(&mut self, len: usize) {
        self.select(self.cursor, len);
    }

    pub fn cursor_up(&mut self, len: usize) {
        self.select(self.cursor.saturating_sub(1), len);
    }

    pub fn cursor_down(&mut self, len: usize) {
        self.select(self.cursor.saturating_add(1), len);
    }

    pub fn page_up(&mut self, len: usize) {
        self.select(self.cursor.saturating_sub(self.page_size()), len);
    }

    pub fn page_down(&mut self, len: usize) {
        self.select(self.cursor.saturating_add(self.page_size()), len);
    }

    pub fn home(&mut self, len: usize) {
        self.select(0, len);
    }

    pub fn end(&mut self, len: usize) {
        self.select(len.saturating_sub(1), len);
    }

    /// Row indices that `window_lines` covers.
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        match self.height {
            None => 0..len,
            Some(height) => {
                let start = self.offset.min(len);
                start..usize::min(start + height, len)
            }
        }
    }

    /// Load the full list (one line per row) into the window.
    pub fn set_content(&mut self, lines: &[String]) {
        self.window.set_content(&lines.join("\n"));
        self.window.set_y_offset(self.offset);
    }

    /// Lines inside the scroll window, paired with their row index. Empty
    /// until the first resize.
    pub fn window_lines(&self, len: usize) -> Vec<(usize, String)> {
        let range = self.visible_range(len);
        if self.height.is_none() || range.is_empty() {
            return Vec::new();
        }
        range.zip(self.window.visible_lines()).collect()
    }

    fn page_size(&self) -> usize {
        self.height.unwrap_or(0).max(1)
    }

    fn scroll_into_view(&mut self, len: usize) {
        let height = match self.height {
            Some(height) if height > 0 => height,
            _ => {
                self.offset = 0;
                return;
            }
        };
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
        // no blank tail after the list shrinks or the window grows
        self.offset = self.offset.min(len.saturating_sub(height));
        self.window.set_y_offset(self.offset);
    }
}
