//! Engine configuration.
//!
//! All tables the engine reads are fixed at construction: the ignored leaf
//! names, the author cap of the generators, the auto-detect order and any
//! extra role abbreviations. Every field has a default, so a config file
//! only needs the keys it changes:
//!
//! ```json
//! { "max_authors": 5, "roles": { "hrsg.": "editors" } }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::formats::FormatTag;
use crate::models::Role;
use crate::names::RoleTable;

/// Leaf names that are never catalog files, even in the right place.
pub const DEFAULT_IGNORED_LEAVES: [&str; 4] = [".DS_Store", ".dat", ".git", "nohup.out"];

/// Generators write at most this many contributors.
pub const DEFAULT_MAX_AUTHORS: usize = 3;

/// Auto-detect order: the most constrained grammar first.
pub const DEFAULT_PRIORITY: [FormatTag; 4] =
    [FormatTag::Oml, FormatTag::Calibre, FormatTag::Flat, FormatTag::Opf];

/// Settings for a [`crate::engine::PathEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub ignored_leaves: Vec<String>,
    pub max_authors: usize,
    pub priority: Vec<FormatTag>,
    /// Extra abbreviation -> role text mappings, merged over the built-in table.
    pub roles: BTreeMap<String, String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ignored_leaves: DEFAULT_IGNORED_LEAVES.iter().map(|s| s.to_string()).collect(),
            max_authors: DEFAULT_MAX_AUTHORS,
            priority: DEFAULT_PRIORITY.to_vec(),
            roles: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Load and validate a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Parse and validate a JSON config string.
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_authors == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_authors".into(),
                message: "must be at least 1".into(),
            });
        }
        if self.priority.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "priority".into(),
                message: "must list at least one format".into(),
            });
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.priority.iter().find(|tag| !seen.insert(**tag)) {
            return Err(ConfigError::InvalidValue {
                field: "priority".into(),
                message: format!("format '{dup}' listed twice"),
            });
        }
        if let Some(abbr) = self.roles.keys().find(|k| k.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "roles".into(),
                message: format!("empty abbreviation '{abbr}'"),
            });
        }
        Ok(())
    }

    /// Built-in role table with this config's extra mappings applied.
    pub fn role_table(&self) -> RoleTable {
        self.roles
            .iter()
            .fold(RoleTable::default(), |table, (abbr, text)| {
                table.with_entry(abbr.clone(), Role::from(text.clone()))
            })
    }
}
