//! Display rows derived from the canonical item sequence.
//!
//! Group headers mark the start of a *contiguous run* of items sharing a
//! group id, not a group as a whole. When the input is not ordered by group,
//! a group gets one header per run:
//!
//! ```text
//! items: a(g1) b(g2) c(g1)      rows: [g1] a  [g2] b  [g1] c
//! ```
//!
//! Callers that want a single header per group must supply items already
//! clustered by group (the vault fetch does, one vault at a time).

use crate::ui::model::{Group, Item};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayRow {
    /// Index into the canonical item sequence.
    Item(usize),
    GroupHeader { group_id: String, name: String },
}

impl DisplayRow {
    pub fn group_id(&self) -> Option<&str> {
        match self {
            DisplayRow::GroupHeader { group_id, .. } => Some(group_id),
            DisplayRow::Item(_) => None,
        }
    }
}

// Resolved header label: the group's name, or the raw id when unknown/unnamed.
pub fn group_name(groups: &HashMap<String, Group>, group_id: &str) -> String {
    match groups.get(group_id) {
        Some(g) if !g.name.is_empty() => g.name.clone(),
        _ => group_id.to_string(),
    }
}

pub fn build_rows(items: &[Item], groups: &HashMap<String, Group>, grouped: bool) -> Vec<DisplayRow> {
    if !grouped {
        return (0..items.len()).map(DisplayRow::Item).collect();
    }

    let mut out = Vec::with_capacity(items.len() * 2);
    for (i, it) in items.iter().enumerate() {
        let starts_run = i == 0 || items[i - 1].group_id != it.group_id;
        if !it.group_id.is_empty() && starts_run {
            out.push(DisplayRow::GroupHeader {
                group_id: it.group_id.clone(),
                name: group_name(groups, &it.group_id),
            });
        }
        out.push(DisplayRow::Item(i));
    }
    out
}

// Linear scans are fine here: sessions hold tens to low hundreds of rows.

pub fn position_of_item(rows: &[DisplayRow], items: &[Item], id: &str) -> Option<usize> {
    rows.iter().position(|row| match row {
        DisplayRow::Item(idx) => items.get(*idx).is_some_and(|it| it.id == id),
        DisplayRow::GroupHeader { .. } => false,
    })
}

pub fn position_of_group(rows: &[DisplayRow], group_id: &str) -> Option<usize> {
    rows.iter().position(|row| row.group_id() == Some(group_id))
}
