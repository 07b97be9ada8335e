use serde::{Deserialize, Serialize};

use crate::model::item::{Item, timestamp_from_secs};

/// On-disk shape of an item.
///
/// `finished` is always written (as `null` when unset); `hidden` is written
/// only when true so documents from before cleanup existed stay byte-stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub label: String,
    #[serde(default)]
    pub finished: Option<i64>,
    #[serde(default)]
    pub children: Vec<ItemRecord>,
    #[serde(
        default,
        deserialize_with = "null_as_false",
        skip_serializing_if = "is_false"
    )]
    pub hidden: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// A record that can't be turned back into an item
#[derive(Debug, thiserror::Error)]
pub enum MalformedRecord {
    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed record at {path}: label is empty")]
    EmptyLabel { path: String },
    #[error("malformed record at {path}: {value} is not a valid epoch-seconds timestamp")]
    InvalidTimestamp { path: String, value: i64 },
}

impl Item {
    /// Snapshot this subtree, hidden items included.
    pub fn dump(&self) -> ItemRecord {
        ItemRecord {
            label: self.label.clone(),
            finished: self.finished.map(|t| t.timestamp()),
            children: self.children.iter().map(Item::dump).collect(),
            hidden: self.hidden,
        }
    }

    /// Rebuild an item tree from its record.
    pub fn load(record: &ItemRecord) -> Result<Item, MalformedRecord> {
        load_at(record, "")
    }
}

fn load_at(record: &ItemRecord, parent_path: &str) -> Result<Item, MalformedRecord> {
    let label = record.label.trim();
    let path = if parent_path.is_empty() {
        label.to_string()
    } else {
        format!("{} > {}", parent_path, label)
    };
    if label.is_empty() {
        return Err(MalformedRecord::EmptyLabel {
            path: if parent_path.is_empty() {
                "<top>".to_string()
            } else {
                parent_path.to_string()
            },
        });
    }

    let finished = record
        .finished
        .map(|value| {
            timestamp_from_secs(value).ok_or_else(|| MalformedRecord::InvalidTimestamp {
                path: path.clone(),
                value,
            })
        })
        .transpose()?;

    let children = record
        .children
        .iter()
        .map(|child| load_at(child, &path))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Item {
        label: label.to_string(),
        finished,
        hidden: record.hidden,
        children,
    })
}

/// Serialize an item tree as a single-line JSON document.
pub fn to_json(item: &Item) -> Result<String, serde_json::Error> {
    serde_json::to_string(&item.dump())
}

/// Parse a JSON document into an item tree.
///
/// Nesting depth is unbounded; deep documents grow the stack on the heap
/// instead of hitting serde_json's recursion limit.
pub fn from_json(text: &str) -> Result<Item, MalformedRecord> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let record = ItemRecord::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Item::load(&record)
}
