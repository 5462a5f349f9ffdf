//! Read-only access to the JSON idea store.

use anyhow::{Context, Result};
use std::path::Path;

use crate::models::{IdeaRecord, IdeaStore};

/// Load all stored ideas in file order. A missing file is an empty store.
///
/// The file is re-read on every call so edits show up without a restart.
pub fn load_ideas(path: &Path) -> Result<Vec<IdeaRecord>> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("Idea store {} not found, treating as empty", path.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    let store: IdeaStore = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse idea store {}", path.display()))?;
    Ok(store.ideas)
}
