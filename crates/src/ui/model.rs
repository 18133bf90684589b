use crate::error::{Error, Result};
use crate::ui::rows::{self, DisplayRow};
use crate::ui::viewport::ListViewport;
use std::collections::HashMap;

// layout constants shared with the renderer
pub const TITLE_LINES: usize = 2; // title + spacer
pub const HELP_LINES: usize = 1;
pub const RESERVED_LINES: usize = TITLE_LINES + HELP_LINES;
pub const DEFAULT_WIDTH: usize = 80;
pub const DEFAULT_TITLE: &str = "Which connections would you like to export?";

/// A selectable entry. `group_id` is empty when the item belongs to no group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub description: String,
    pub group_id: String,
    pub selected: bool,
}

impl Item {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Item {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn in_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = group_id.into();
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// Display metadata for a group id. Immutable for the life of a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Active,
    Confirmed,
    Aborted,
}

/// State of one checklist run.
///
/// `items` is the canonical sequence: its order never changes, only the
/// `selected` flags do. `rows` is derived from `items`, `groups` and `grouped`
/// and is rebuilt after every structural change; the cursor lives in `vp`.
/// `screen_height` is the full terminal height, `None` until the first resize.
#[derive(Clone, Debug)]
pub struct Session {
    pub items: Vec<Item>,
    pub groups: HashMap<String, Group>,
    pub grouped: bool,
    pub status: Status,
    pub title: String,
    pub rows: Vec<DisplayRow>,
    pub vp: ListViewport,
    pub screen_height: Option<usize>,
}

impl Session {
    pub fn new(items: Vec<Item>, groups: Vec<Group>) -> Self {
        let groups: HashMap<String, Group> =
            groups.into_iter().map(|g| (g.id.clone(), g)).collect();
        let mut m = Session {
            items,
            groups,
            grouped: true, // grouped view by default
            status: Status::Active,
            title: DEFAULT_TITLE.to_string(),
            rows: Vec::new(),
            vp: ListViewport::default(),
            screen_height: None,
        };
        m.rebuild_rows();
        m
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    // wrapper update that delegates to the update module
    pub fn update(&mut self, msg: crate::ui::Msg) {
        crate::ui::update::handle_update(self, msg);
    }

    pub fn rebuild_rows(&mut self) {
        self.rows = rows::build_rows(&self.items, &self.groups, self.grouped);
        self.vp.clamp(self.rows.len());
        self.sync_viewport();
    }

    // Push the current row text into the viewport's scroll window.
    pub fn sync_viewport(&mut self) {
        let lines = crate::ui::render::list_lines(self);
        self.vp.set_content(&lines);
    }

    pub fn cursor(&self) -> usize {
        self.vp.cursor
    }

    pub fn current_row(&self) -> Option<&DisplayRow> {
        self.rows.get(self.vp.cursor)
    }

    pub fn is_done(&self) -> bool {
        self.status != Status::Active
    }

    /// Selected items in canonical order.
    pub fn selected_items(&self) -> Vec<Item> {
        self.items.iter().filter(|it| it.selected).cloned().collect()
    }

    /// Consume the finished session. Anything other than an explicit confirm
    /// (including a driver that shut down while still active) is an abort.
    pub fn into_selection(self) -> Result<Vec<Item>> {
        match self.status {
            Status::Confirmed => Ok(self.selected_items()),
            Status::Aborted | Status::Active => Err(Error::Aborted),
        }
    }

    // Render helper wrappers that forward to the render module to keep this file focused on state.
    pub fn render_list_content(&self) -> String {
        crate::ui::render::render_list_content(self)
    }
    pub fn render_help(&self) -> String {
        crate::ui::render::render_help(self)
    }
    pub fn render_full(&self) -> String {
        crate::ui::render::render_full(self)
    }
}
