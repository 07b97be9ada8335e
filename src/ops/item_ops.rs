use chrono::{DateTime, Utc};

use crate::model::item::{Item, whole_seconds};

/// Error type for creating items
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateError {
    #[error("label cannot be empty")]
    EmptyLabel,
    #[error("duplicate entry at level: {label}")]
    Duplicate { label: String },
}

// ---------------------------------------------------------------------------
// State transitions
// ---------------------------------------------------------------------------

impl Item {
    /// Mark this item and its visible descendants finished now.
    pub fn finish(&mut self) {
        self.finish_at(Utc::now());
    }

    /// Mark this item and its visible descendants finished at `at`.
    ///
    /// Existing finish times are kept, so a subtree finished earlier keeps
    /// its own timestamp. Everything newly finished in one call shares `at`.
    pub fn finish_at(&mut self, at: DateTime<Utc>) {
        let at = whole_seconds(at);
        if self.finished.is_none() {
            self.finished = Some(at);
        }
        for child in self.children.iter_mut().filter(|c| !c.hidden) {
            child.finish_at(at);
        }
    }

    /// Clear the finish time on this item and its visible descendants.
    pub fn unfinish(&mut self) {
        self.finished = None;
        for child in self.children.iter_mut().filter(|c| !c.hidden) {
            child.unfinish();
        }
    }

    /// Hide every finished item in this subtree. Hidden items stay in the
    /// document; they just drop out of matching, counting and listing.
    pub fn cleanup(&mut self) {
        if self.is_finished() {
            self.hidden = true;
        }
        for child in &mut self.children {
            child.cleanup();
        }
    }
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Append a new unfinished child to `parent`.
///
/// Labels must be unique among visible siblings (case-insensitively); hidden
/// items don't block reuse of their label.
pub fn create_child<'a>(parent: &'a mut Item, label: &str) -> Result<&'a mut Item, CreateError> {
    let child = Item::new(label);
    if child.label.is_empty() {
        return Err(CreateError::EmptyLabel);
    }
    if parent.visible_children().any(|c| c.has_label(&child.label)) {
        return Err(CreateError::Duplicate { label: child.label });
    }
    Ok(parent.add_child(child))
}
