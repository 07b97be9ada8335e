use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::model::item::Item;
use crate::ops::PathError;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ItemJson {
    pub label: String,
    pub finished: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ItemJson>,
}

/// Visible view of an item; hidden descendants are left out.
pub fn item_to_json(item: &Item) -> ItemJson {
    ItemJson {
        label: item.label().to_string(),
        finished: item.is_finished(),
        finished_at: item.finished_at(),
        children: item.visible_children().map(item_to_json).collect(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Shown instead of an empty top-level listing
pub const NOTHING_TO_SHOW: &str = "nothing to show";

fn format_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Format one item. `depth` is the number of leading dashes.
pub fn format_item_line(item: &Item, depth: usize) -> String {
    let prefix = if depth > 0 {
        format!("{} ", "-".repeat(depth))
    } else {
        String::new()
    };
    match item.finished_at() {
        Some(at) if item.is_finished() => {
            format!("{}{} (finished @ {})", prefix, item.label(), format_time(at))
        }
        _ => format!("{}{}", prefix, item.label()),
    }
}

fn format_children(item: &Item, depth: usize, lines: &mut Vec<String>) {
    for child in item.visible_children() {
        lines.push(format_item_line(child, depth));
        format_children(child, depth + 2, lines);
    }
}

/// Format an item and its visible descendants.
///
/// The top of the tree is a container, not an entry, so for it only the
/// descendants are listed (starting flush left).
pub fn format_subtree(item: &Item, is_top: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if is_top {
        if item.visible_child_count() == 0 {
            lines.push(NOTHING_TO_SHOW.to_string());
        } else {
            format_children(item, 0, &mut lines);
        }
    } else {
        lines.push(format_item_line(item, 0));
        format_children(item, 2, &mut lines);
    }
    lines
}

/// Follow-up lines for a path error, telling the user what they could have
/// typed instead.
pub fn format_path_advice(err: &PathError) -> Vec<String> {
    match err {
        PathError::NoMatch { available, .. } if available.is_empty() => Vec::new(),
        PathError::NoMatch { available, .. } => {
            vec![format!("available options are: {}", available.join(", "))]
        }
        PathError::AmbiguousPath { candidates, .. } => {
            let mut lines = vec!["please choose one of:".to_string()];
            lines.extend(candidates.iter().map(|c| format!("* {}", c)));
            lines
        }
    }
}
