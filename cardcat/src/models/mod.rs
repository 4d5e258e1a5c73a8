//! Domain models for catalog path parsing and generation.
//!
//! - [`StructuredName`] - One contributor name split into parts, plus role
//! - [`Role`] - Editorial relationship (editor, translator, ...)
//! - [`AuthorEntry`] - Display and sort forms of a contributor
//! - [`CatalogEntry`] - Everything recognized from one catalog path
//! - [`OpfPackage`] - Export object produced by the `opf` format
//! - [`Formatted`] - Output of a generator (path or export object)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::formats::FormatTag;

// =============================================================================
// Role
// =============================================================================

/// Editorial role attached to a contributor.
///
/// The absence of a role means the contributor is an author. Roles are
/// always held in their expanded form: `(eds.)` in a path becomes
/// [`Role::Editors`], which prints as `editors`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Several editors (`eds.`).
    Editors,
    /// A single editor (`ed.`).
    Editor,
    /// Translator (`trans.`).
    Translator,
    /// Writer of the introduction (`int.`, `intr.`).
    Introduction,
    /// Any other parenthetical marker, kept verbatim.
    Other(String),
}

impl Role {
    /// Expanded role text as it appears in generated paths.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Editors => "editors",
            Self::Editor => "editor",
            Self::Translator => "translator",
            Self::Introduction => "introduction",
            Self::Other(text) => text,
        }
    }

    /// Role text with its first letter uppercased (`editors` -> `Editors`).
    pub fn capitalized(&self) -> String {
        capitalize(self.as_str())
    }
}

impl From<String> for Role {
    fn from(text: String) -> Self {
        match text.as_str() {
            "editors" => Self::Editors,
            "editor" => Self::Editor,
            "translator" => Self::Translator,
            "introduction" => Self::Introduction,
            _ => Self::Other(text),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uppercase the first character, leave the rest untouched.
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Structured Name
// =============================================================================

/// A contributor name split into its parts.
///
/// Produced by [`crate::names::NameProcessor::parse_name`]; never mutated
/// afterwards except for role propagation inside `parse_names`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    /// Honorific such as `Dr.`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Generational or degree suffix such as `Jr.`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// The untouched source string.
    pub original: String,
}

impl StructuredName {
    /// True when no name part was found.
    pub fn is_empty(&self) -> bool {
        [&self.first, &self.middle, &self.last, &self.prefix, &self.suffix]
            .iter()
            .all(|part| part.is_none())
    }
}

// =============================================================================
// Author Entry
// =============================================================================

/// Display and sort forms of one contributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorEntry {
    /// Display form: `Edward Said`.
    pub author: String,
    /// Sort form: `Said, Edward`.
    pub author_sort: String,
    /// Editorial role; `None` means author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

// =============================================================================
// Catalog Entry
// =============================================================================

/// Everything recognized from one catalog path.
///
/// This is also the input shape the generators consume, so a recognized
/// entry can be written back out in any format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Contributors in order of appearance in the path. Never empty.
    pub authors: Vec<AuthorEntry>,
    /// Sort key of the first contributor.
    pub author_sort: String,
    pub title: String,
    /// Title with a leading English article moved to the end.
    pub title_sort: String,
    /// Base filename (leaf segment).
    pub file: String,
    /// The full path as given.
    pub path: String,
    pub format: FormatTag,
}

impl CatalogEntry {
    /// Raw author strings that re-parse to this entry's contributors.
    ///
    /// Each is the sort name, followed by ` (<role>)` when a role is set.
    /// The sort name keeps the surname boundary, so particles and
    /// multi-word surnames survive the round trip.
    pub fn author_names(&self) -> Vec<String> {
        self.authors
            .iter()
            .map(|a| match &a.role {
                Some(role) => format!("{} ({})", a.author_sort, role),
                None => a.author_sort.clone(),
            })
            .collect()
    }
}

// =============================================================================
// OPF Export
// =============================================================================

/// A contributor in the OPF export object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpfAuthor {
    /// Display name.
    pub value: String,
    /// Sort name.
    pub file_as: String,
    /// Capitalized role, `Author` when none.
    pub role: String,
}

/// Export object for OPF metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpfPackage {
    pub title: String,
    pub authors: Vec<OpfAuthor>,
}

// =============================================================================
// Generator Output
// =============================================================================

/// What a generator produces: a catalog path, or the OPF export object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Formatted {
    Path(String),
    Opf(OpfPackage),
}

impl Formatted {
    /// The generated path, if this output is one.
    pub fn as_path(&self) -> Option<&str> {
        match self {
            Self::Path(path) => Some(path),
            Self::Opf(_) => None,
        }
    }

    /// The export object, if this output is one.
    pub fn as_opf(&self) -> Option<&OpfPackage> {
        match self {
            Self::Opf(package) => Some(package),
            Self::Path(_) => None,
        }
    }
}
