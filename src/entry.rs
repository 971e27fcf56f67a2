use serde::{Deserialize, Serialize};

use crate::{Result, ShelfError};

/// Suggested file name when a session's entries are downloaded.
pub const EXPORT_FILE_NAME: &str = "totp_entries.json";

/// One account: a display name and its Base32 secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub secret: String,
}

impl Entry {
    pub fn new(name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secret: secret.into(),
        }
    }
}

/// Serializes entries as a pretty-printed JSON array of `{name, secret}`.
pub fn export_json(entries: &[Entry]) -> Result<String> {
    serde_json::to_string_pretty(entries).map_err(ShelfError::Export)
}

/// Parses a JSON array of `{name, secret}` objects. Extra fields are ignored.
pub fn import_json(json: &str) -> Result<Vec<Entry>> {
    serde_json::from_str(json).map_err(ShelfError::Import)
}
