//! Role abbreviation table.

use std::collections::HashMap;

use crate::models::Role;

/// Maps the short role markers found in paths (`eds.`, `trans.`) to roles.
///
/// Unknown markers pass through verbatim as [`Role::Other`], except that
/// already-expanded text (`editors`) resolves to its own variant so that
/// generated paths parse back to the same role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTable {
    entries: HashMap<String, Role>,
}

impl Default for RoleTable {
    fn default() -> Self {
        let entries = [
            ("eds.", Role::Editors),
            ("ed.", Role::Editor),
            ("trans.", Role::Translator),
            ("int.", Role::Introduction),
            ("intr.", Role::Introduction),
        ]
        .into_iter()
        .map(|(abbr, role)| (abbr.to_string(), role))
        .collect();
        Self { entries }
    }
}

impl RoleTable {
    /// Add or replace a mapping.
    pub fn with_entry(mut self, abbreviation: impl Into<String>, role: Role) -> Self {
        self.entries.insert(abbreviation.into(), role);
        self
    }

    /// Resolve a marker to its role.
    pub fn lookup(&self, marker: &str) -> Role {
        self.entries
            .get(marker)
            .cloned()
            .unwrap_or_else(|| Role::from(marker.to_string()))
    }
}
