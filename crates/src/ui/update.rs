use crate::ui::model::{Session, Status, RESERVED_LINES};
use crate::ui::rows::{self, DisplayRow};
use crate::ui::Msg;

pub fn handle_update(m: &mut Session, msg: Msg) {
    // Done is terminal: nothing mutates the session afterwards.
    if m.is_done() {
        return;
    }
    let len = m.rows.len();
    match msg {
        Msg::WindowSize { width, height } => handle_window_size(m, width, height),
        Msg::KeyUp => m.vp.cursor_up(len),
        Msg::KeyDown => m.vp.cursor_down(len),
        Msg::KeyPageUp => m.vp.page_up(len),
        Msg::KeyPageDown => m.vp.page_down(len),
        Msg::KeyHome => m.vp.home(len),
        Msg::KeyEnd => m.vp.end(len),
        Msg::KeySpace => handle_toggle(m),
        Msg::KeyEnter => finish(m, Status::Confirmed),
        Msg::Interrupt => finish(m, Status::Aborted),
        Msg::Rune(r) => handle_rune(m, r),
    }
    // cursor marks and checkboxes are part of the window text
    if !m.is_done() {
        m.sync_viewport();
    }
}

fn handle_rune(m: &mut Session, r: char) {
    let len = m.rows.len();
    match r {
        'q' => finish(m, Status::Aborted),
        'g' => handle_toggle_grouping(m),
        'k' => m.vp.cursor_up(len),
        'j' => m.vp.cursor_down(len),
        ' ' => handle_toggle(m),
        _ => {}
    }
}

fn handle_window_size(m: &mut Session, width: usize, height: usize) {
    let len = m.rows.len();
    m.screen_height = Some(height);
    m.vp.set_size(width, height.saturating_sub(RESERVED_LINES), len);
}

fn finish(m: &mut Session, status: Status) {
    let selected = m.items.iter().filter(|it| it.selected).count();
    tracing::info!(?status, selected, total = m.items.len(), "checklist finished");
    m.status = status;
}

fn handle_toggle(m: &mut Session) {
    let idx = m.cursor();
    match m.rows.get(idx).cloned() {
        Some(DisplayRow::Item(item_idx)) => toggle_item_row(m, idx, item_idx),
        Some(DisplayRow::GroupHeader { group_id, .. }) => toggle_group_row(m, &group_id),
        None => {}
    }
}

fn toggle_item_row(m: &mut Session, idx: usize, item_idx: usize) {
    let Some(id) = m.items.get(item_idx).map(|it| it.id.clone()) else {
        return;
    };
    if let Some(it) = m.items.iter_mut().find(|it| it.id == id) {
        it.selected = !it.selected;
        tracing::debug!(id = %it.id, selected = it.selected, "toggled item");
    }
    m.rebuild_rows();
    let len = m.rows.len();
    m.vp.select(idx, len);
}

// Select every member unless all already are, in which case clear them all.
fn toggle_group_row(m: &mut Session, group_id: &str) {
    if group_id.is_empty() {
        return;
    }
    let any_unselected = m
        .items
        .iter()
        .any(|it| it.group_id == group_id && !it.selected);
    for it in m.items.iter_mut().filter(|it| it.group_id == group_id) {
        it.selected = any_unselected;
    }
    tracing::debug!(group_id, selected = any_unselected, "toggled group");

    m.rebuild_rows();
    if let Some(pos) = rows::position_of_group(&m.rows, group_id) {
        let len = m.rows.len();
        m.vp.select(pos, len);
    }
}

fn handle_toggle_grouping(m: &mut Session) {
    m.grouped = !m.grouped;

    // remember what is under the cursor so focus survives the rebuild
    let key = m.current_row().map(|row| match row {
        DisplayRow::Item(item_idx) => m.items[*item_idx].id.clone(),
        DisplayRow::GroupHeader { group_id, .. } => group_id.clone(),
    });

    m.rebuild_rows();

    if let Some(key) = key {
        let found = rows::position_of_item(&m.rows, &m.items, &key)
            .or_else(|| rows::position_of_group(&m.rows, &key));
        if let Some(pos) = found {
            let len = m.rows.len();
            m.vp.select(pos, len);
        }
    }
    tracing::debug!(grouped = m.grouped, rows = m.rows.len(), "grouping toggled");
}
