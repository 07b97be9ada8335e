use chrono::{DateTime, SubsecRound, Utc};

/// A node in the todo tree.
///
/// Items are addressed by label rather than by ID, so the label is kept
/// exactly as typed (minus surrounding whitespace) and compared
/// case-insensitively. Children are owned outright; there are no parent
/// pointers because nothing walks upward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub(crate) label: String,
    /// Instant the item was marked finished, at whole-second resolution
    pub(crate) finished: Option<DateTime<Utc>>,
    /// Set only by cleanup, never cleared
    pub(crate) hidden: bool,
    pub(crate) children: Vec<Item>,
}

impl Item {
    /// Create an unfinished, visible item with no children.
    pub fn new(label: &str) -> Self {
        Item {
            label: label.trim().to_string(),
            finished: None,
            hidden: false,
            children: Vec::new(),
        }
    }

    /// Create an item with explicit state.
    ///
    /// `finished` is epoch seconds; negative values are treated as absent.
    pub fn with_state(label: &str, finished: Option<i64>, hidden: bool) -> Self {
        Item {
            finished: finished.and_then(timestamp_from_secs),
            hidden,
            ..Item::new(label)
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The stored finish instant, regardless of the state of the children.
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished
    }

    pub fn children(&self) -> &[Item] {
        &self.children
    }

    /// Iterate over the children that have not been hidden by cleanup.
    pub fn visible_children(&self) -> impl Iterator<Item = &Item> {
        self.children.iter().filter(|c| !c.hidden)
    }

    /// Append a child at the end of the list and return it.
    pub fn add_child(&mut self, child: Item) -> &mut Item {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Case-insensitive exact match
    pub fn has_label(&self, other: &str) -> bool {
        self.label.to_lowercase() == other.to_lowercase()
    }

    /// Case-insensitive substring match, so `plan create so hi` can stand in
    /// for `plan create something hi`
    pub fn has_label_like(&self, other: &str) -> bool {
        self.label.to_lowercase().contains(&other.to_lowercase())
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Derived finished state: this item carries a finish time and every
    /// child is either finished itself or hidden.
    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
            && self
                .children
                .iter()
                .all(|c| c.is_finished() || c.hidden)
    }

    pub fn visible_child_count(&self) -> usize {
        self.visible_children().count()
    }
}

/// Convert epoch seconds to a timestamp. Negative or out-of-range values
/// yield `None`.
pub fn timestamp_from_secs(secs: i64) -> Option<DateTime<Utc>> {
    if secs < 0 {
        return None;
    }
    DateTime::from_timestamp(secs, 0)
}

/// Drop sub-second precision so a timestamp survives the epoch-seconds
/// document format unchanged.
pub(crate) fn whole_seconds(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(0)
}
