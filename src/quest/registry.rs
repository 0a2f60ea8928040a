//! Fixed mapping between short server codes and canonical server names.
//!
//! The registry is built once from configuration and never mutated afterwards. Codes are
//! stored lowercased and lookups lowercase their input, so `CAL`, `Cal` and `cal` all resolve
//! to the same server. Entry order is kept for display.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::errors::{format_listing, RegistryError};

/// A `(code, canonical name)` pair as it appears in the `[[servers]]` config table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEntry {
    pub code: String,
    pub name: String,
}

impl ServerEntry {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerRegistry {
    entries: Vec<ServerEntry>,
    by_code: HashMap<String, usize>,
}

impl ServerRegistry {
    /// Build a registry, normalising codes to lowercase.
    ///
    /// Fails on empty codes or names and on codes that collide after lowercasing.
    pub fn new(entries: impl IntoIterator<Item = ServerEntry>) -> Result<Self, RegistryError> {
        let mut normalized = Vec::new();
        let mut by_code = HashMap::new();
        for (index, entry) in entries.into_iter().enumerate() {
            let code = entry.code.trim().to_lowercase();
            if code.is_empty() {
                return Err(RegistryError::EmptyCode { index });
            }
            let name = entry.name.trim().to_string();
            if name.is_empty() {
                return Err(RegistryError::EmptyName(code));
            }
            if by_code.insert(code.clone(), normalized.len()).is_some() {
                return Err(RegistryError::DuplicateCode(code));
            }
            normalized.push(ServerEntry { code, name });
        }
        Ok(Self {
            entries: normalized,
            by_code,
        })
    }

    /// Canonical name for `code`, ignoring case.
    pub fn resolve(&self, code: &str) -> Option<&str> {
        self.by_code
            .get(&code.trim().to_lowercase())
            .map(|&i| self.entries[i].name.as_str())
    }

    pub fn entries(&self) -> &[ServerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn listing(&self) -> String {
        format_listing(&self.entries)
    }
}

/// Default server list, in display order.
pub fn default_entries() -> Vec<ServerEntry> {
    [
        ("a1", "Altinova-1"),
        ("a2", "Altinova-2"),
        ("h1", "Heidel-1"),
        ("h2", "Heidel-2"),
        ("g1", "Grana-1"),
        ("g2", "Grana-2"),
        ("v1", "Velia-1"),
        ("v2", "Velia-2"),
        ("r1", "Rulupee-1"),
        ("r2", "Rulupee-2"),
        ("cal", "Calpheon"),
        ("bal", "Balenos"),
        ("ser", "Serendia"),
        ("med", "Mediah"),
        ("val", "Valencia"),
        ("kama", "Kamasylvia"),
        ("o1", "Odyllita-1"),
    ]
    .into_iter()
    .map(|(code, name)| ServerEntry::new(code, name))
    .collect()
}
