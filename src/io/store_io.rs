use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::model::config::StoreConfig;
use crate::model::item::Item;
use crate::parse::{MalformedRecord, from_json, to_json};

/// Label of the implicit top-level item in a fresh document
pub const ROOT_LABEL: &str = "root";

/// Error type for reading and writing the todo document
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("{path} is not a valid todo file: {source}")]
    Malformed {
        path: PathBuf,
        source: MalformedRecord,
    },
    #[error("could not serialize todo tree: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Load the tree from the configured document, or start a fresh root if
/// the file doesn't exist yet.
pub fn load_tree(config: &StoreConfig) -> Result<Item, StoreError> {
    let path = &config.path;
    if !path.exists() {
        debug!(path = %path.display(), "no todo file yet, starting empty");
        return Ok(Item::new(ROOT_LABEL));
    }

    let text = fs::read_to_string(path).map_err(|e| StoreError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let tree = from_json(&text).map_err(|e| StoreError::Malformed {
        path: path.clone(),
        source: e,
    })?;
    debug!(path = %path.display(), items = tree.children().len(), "loaded todo file");
    Ok(tree)
}

/// Write the whole tree back, replacing the document atomically.
pub fn save_tree(config: &StoreConfig, tree: &Item) -> Result<(), StoreError> {
    let path = &config.path;
    let content = to_json(tree)?;
    atomic_write(path, content.as_bytes()).map_err(|e| StoreError::WriteError {
        path: path.clone(),
        source: e,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "saved todo file");
    Ok(())
}

/// Write via a temp file in the same directory, then rename over `path`.
///
/// An existing symlink is followed: the rename lands on the file it points
/// at and the link itself is left in place.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let target = if path.exists() {
        fs::canonicalize(path)?
    } else {
        path.to_path_buf()
    };
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}
