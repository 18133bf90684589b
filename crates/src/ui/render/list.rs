use crate::ui::model::{Item, Session, DEFAULT_WIDTH};
use crate::ui::render::styles::{STYLE_CURSOR, STYLE_HEADER, STYLE_LABEL};
use crate::ui::render::util::{fit_width, normalize_and_pad};
use crate::ui::rows::DisplayRow;

/// Aggregate selection state of a group header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckState {
    Checked,
    Unchecked,
    Partial,
}

impl CheckState {
    pub fn glyph(self) -> &'static str {
        match self {
            CheckState::Checked => "[x]",
            CheckState::Unchecked => "[ ]",
            CheckState::Partial => "[-]",
        }
    }
}

impl From<bool> for CheckState {
    fn from(selected: bool) -> Self {
        if selected {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    }
}

// Scans the canonical items, so members of every run of the group count.
pub fn group_check_state(items: &[Item], group_id: &str) -> CheckState {
    let (any, all) = items
        .iter()
        .filter(|it| it.group_id == group_id)
        .fold((false, true), |(any, all), it| (any || it.selected, all && it.selected));
    match (any, all) {
        (true, true) => CheckState::Checked,
        (true, false) => CheckState::Partial,
        (false, _) => CheckState::Unchecked,
    }
}

/// Plain text for one row; `index` is the row's position in `m.rows`.
pub fn render_row(m: &Session, index: usize, row: &DisplayRow) -> String {
    let cursor = if index == m.cursor() { ">" } else { " " };
    match row {
        DisplayRow::Item(idx) => {
            let it = &m.items[*idx];
            let indent = if m.grouped && !it.group_id.is_empty() {
                " |"
            } else {
                ""
            };
            let check = CheckState::from(it.selected).glyph();
            format!("{cursor}{indent} {check} {}", it.title)
        }
        DisplayRow::GroupHeader { group_id, name } => {
            let check = group_check_state(&m.items, group_id).glyph();
            format!("{cursor} {check} {name}:")
        }
    }
}

fn list_width(m: &Session) -> usize {
    if m.vp.width > 0 {
        m.vp.width
    } else {
        DEFAULT_WIDTH
    }
}

/// Every row as plain text fitted to the list width; this is what the
/// viewport scrolls over.
pub fn list_lines(m: &Session) -> Vec<String> {
    let width = list_width(m);
    m.rows
        .iter()
        .enumerate()
        .map(|(i, row)| fit_width(&render_row(m, i, row), width))
        .collect()
}

// Styled lines for the rows inside the viewport window, padded to the window height.
pub fn render_list_content(m: &Session) -> String {
    let width = list_width(m);
    let (shown, per) = match m.vp.height {
        // not sized yet: the whole list
        None => {
            let all: Vec<(usize, String)> = list_lines(m).into_iter().enumerate().collect();
            let per = all.len();
            (all, per)
        }
        Some(height) => (m.vp.window_lines(m.rows.len()), height),
    };
    let lines: Vec<String> = shown
        .into_iter()
        .map(|(i, line)| {
            let style = if i == m.cursor() {
                &*STYLE_CURSOR
            } else if matches!(m.rows.get(i), Some(DisplayRow::GroupHeader { .. })) {
                &*STYLE_HEADER
            } else {
                &*STYLE_LABEL
            };
            style.render(&line)
        })
        .collect();
    normalize_and_pad(lines, width, per)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::model::Group;
    use crate::ui::Msg;
    use regex::Regex;

    fn strip_ansi(s: &str) -> String {
        let re = Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap();
        re.replace_all(s, "").to_string()
    }

    fn plain_rows(m: &Session) -> Vec<String> {
        m.rows
            .iter()
            .enumerate()
            .map(|(i, row)| render_row(m, i, row))
            .collect()
    }

    fn vault() -> Group {
        Group {
            id: "g1".into(),
            name: "Work".into(),
            description: String::new(),
        }
    }

    #[test]
    fn test_rows_render_with_cursor_indent_and_checkboxes() {
        let m = Session::new(
            vec![
                Item::new("1", "db-prod").in_group("g1").selected(true),
                Item::new("2", "db-stage").in_group("g1"),
                Item::new("3", "scratch").selected(true),
            ],
            vec![vault()],
        );
        assert_eq!(
            plain_rows(&m),
            vec![
                "> [-] Work:".to_string(),
                "  | [x] db-prod".to_string(),
                "  | [ ] db-stage".to_string(),
                "  [x] scratch".to_string(),
            ]
        );
    }

    #[test]
    fn test_ungrouped_rows_have_no_indent() {
        let mut m = Session::new(vec![Item::new("1", "db-prod").in_group("g1")], vec![vault()]);
        m.update(Msg::Rune('g'));
        assert_eq!(plain_rows(&m), vec!["> [ ] db-prod".to_string()]);
    }

    #[test]
    fn test_header_checked_when_all_selected_then_cleared_by_toggle() {
        let mut m = Session::new(
            vec![
                Item::new("1", "one").in_group("g1").selected(true),
                Item::new("2", "two").in_group("g1").selected(true),
            ],
            vec![vault()],
        );
        assert_eq!(render_row(&m, 0, &m.rows[0]), "> [x] Work:");
        m.update(Msg::KeySpace);
        assert_eq!(render_row(&m, 0, &m.rows[0]), "> [ ] Work:");
        assert!(m.items.iter().all(|it| !it.selected));
    }

    #[test]
    fn test_group_check_state_variants() {
        let items = vec![
            Item::new("1", "one").in_group("a").selected(true),
            Item::new("2", "two").in_group("a"),
            Item::new("3", "three").in_group("b").selected(true),
            Item::new("4", "four").in_group("c"),
        ];
        assert_eq!(group_check_state(&items, "a"), CheckState::Partial);
        assert_eq!(group_check_state(&items, "b"), CheckState::Checked);
        assert_eq!(group_check_state(&items, "c"), CheckState::Unchecked);
        assert_eq!(group_check_state(&items, "missing"), CheckState::Unchecked);
    }

    #[test]
    fn test_list_content_only_shows_viewport_window() {
        let items: Vec<Item> = (0..20).map(|i| Item::new(i.to_string(), format!("conn{i}"))).collect();
        let mut m = Session::new(items, vec![]);
        m.update(Msg::WindowSize { width: 30, height: 8 });
        m.update(Msg::KeyEnd);
        let content = strip_ansi(&m.render_list_content());
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("conn15"));
        assert!(lines[4].starts_with("> [ ] conn19"));
        assert!(!content.contains("conn0 "));
    }

    #[test]
    fn test_list_content_pads_short_lists() {
        let mut m = Session::new(vec![Item::new("1", "only")], vec![]);
        m.update(Msg::WindowSize { width: 20, height: 10 });
        let content = strip_ansi(&m.render_list_content());
        assert_eq!(content.lines().count(), 7);
        assert!(content.lines().next().unwrap_or("").contains("only"));
    }

    #[test]
    fn test_list_content_respects_tiny_heights() {
        let items: Vec<Item> = (0..50).map(|i| Item::new(i.to_string(), format!("conn{i}"))).collect();
        let mut m = Session::new(items, vec![]);
        m.update(Msg::WindowSize { width: 40, height: 3 });
        assert_eq!(m.vp.height, Some(0));
        assert_eq!(m.render_list_content(), "");
        m.update(Msg::WindowSize { width: 40, height: 4 });
        let content = strip_ansi(&m.render_list_content());
        assert_eq!(content.lines().count(), 1);
        assert!(content.starts_with("> [ ] conn0"));
    }

    #[test]
    fn test_unsized_session_lists_every_row() {
        let items: Vec<Item> = (0..12).map(|i| Item::new(i.to_string(), format!("conn{i}"))).collect();
        let m = Session::new(items, vec![]);
        assert_eq!(m.vp.height, None);
        assert_eq!(strip_ansi(&m.render_list_content()).lines().count(), 12);
    }
}
