//! Catalog path formats.
//!
//! Each format is a grammar over path segments with two directions:
//! [`PathFormat::recognize`] reads a [`CatalogEntry`] out of segments, and
//! [`PathFormat::generate`] writes contributors and a title back out.
//!
//! | tag | shape | authors separator |
//! |-----|-------|-------------------|
//! | `calibre` | `Authors/Title/file` | `,` |
//! | `flat` | `Authors - Title.ext` | `;` |
//! | `oml` | `L/Authors/Title (Annotation).ext` | `;` |
//! | `opf` | export object only | - |
//!
//! The [`FormatRegistry`] holds all variants plus the auto-detect order.

pub mod calibre;
pub mod flat;
pub mod oml;
pub mod opf;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::EngineConfig;
use crate::error::FormatError;
use crate::models::{CatalogEntry, Formatted, Role, StructuredName};
use crate::names::{alphabetized_title, join_name, HeuristicTokenizer, JoinOptions, NameProcessor};

pub use calibre::Calibre;
pub use flat::Flat;
pub use oml::Oml;
pub use opf::Opf;

// =============================================================================
// Format Tag
// =============================================================================

/// Identifies a registered catalog format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    Calibre,
    Flat,
    Oml,
    Opf,
}

impl FormatTag {
    /// Every tag, in declaration order.
    pub const ALL: [FormatTag; 4] = [Self::Calibre, Self::Flat, Self::Oml, Self::Opf];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calibre => "calibre",
            Self::Flat => "flat",
            Self::Oml => "oml",
            Self::Opf => "opf",
        }
    }
}

impl FromStr for FormatTag {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calibre" => Ok(Self::Calibre),
            "flat" => Ok(Self::Flat),
            "oml" => Ok(Self::Oml),
            "opf" => Ok(Self::Opf),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Format Context
// =============================================================================

/// Read-only settings shared by every format.
#[derive(Debug, Clone)]
pub struct FormatContext {
    pub names: NameProcessor,
    /// Leaf names that never count as catalog files.
    pub ignored_leaves: Vec<String>,
    /// Generators write at most this many contributors.
    pub max_authors: usize,
}

impl Default for FormatContext {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl FormatContext {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            names: NameProcessor::new(HeuristicTokenizer, config.role_table()),
            ignored_leaves: config.ignored_leaves.clone(),
            max_authors: config.max_authors,
        }
    }

    pub fn is_ignored(&self, leaf: &str) -> bool {
        self.ignored_leaves.iter().any(|ignored| ignored == leaf)
    }

    /// Build an entry from parsed names, or `None` if names or title are empty.
    pub fn entry(
        &self,
        names: &[StructuredName],
        title: &str,
        file: &str,
        path: &str,
        format: FormatTag,
    ) -> Option<CatalogEntry> {
        if title.trim().is_empty() {
            return None;
        }
        let authors: Vec<_> = names.iter().map(|n| self.names.author_entry(n)).collect();
        let author_sort = authors.first()?.author_sort.clone();
        if author_sort.is_empty() {
            return None;
        }

        Some(CatalogEntry {
            authors,
            author_sort,
            title: title.to_string(),
            title_sort: alphabetized_title(title),
            file: file.to_string(),
            path: path.to_string(),
            format,
        })
    }

    /// Join at most `max_authors` names with `separator`.
    ///
    /// When every written name is an editor, only the last one carries the
    /// `(editors)` marker; parsing spreads it back over the list.
    pub fn join_authors(
        &self,
        names: &[StructuredName],
        options: JoinOptions,
        separator: &str,
    ) -> Option<String> {
        let names = &names[..names.len().min(self.max_authors)];
        let shared_editors = options.include_role
            && names.len() > 1
            && names.iter().all(|n| n.role == Some(Role::Editors));

        let last = names.len().saturating_sub(1);
        let joined = names
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let options = JoinOptions {
                    include_role: options.include_role && (!shared_editors || i == last),
                    ..options
                };
                join_name(n, options)
            })
            .collect::<Vec<_>>()
            .join(separator);
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }
}

/// File extension including the dot, or `""`.
///
/// The text after the last dot only counts when it is non-empty and holds
/// no whitespace, so `"Smith, J. - Title"` has no extension.
pub fn extension(file: &str) -> &str {
    match file.rfind('.') {
        Some(idx) if idx > 0 => {
            let ext = &file[idx..];
            if ext.len() > 1 && !ext.chars().any(char::is_whitespace) {
                ext
            } else {
                ""
            }
        }
        _ => "",
    }
}

// =============================================================================
// Path Format trait
// =============================================================================

/// One catalog path grammar.
pub trait PathFormat: Send + Sync {
    fn tag(&self) -> FormatTag;

    /// Read an entry from path segments. `path` is the full original path.
    fn recognize(
        &self,
        segments: &[&str],
        path: &str,
        ctx: &FormatContext,
    ) -> Option<CatalogEntry>;

    /// Write contributors, title and file back out in this format.
    fn generate(
        &self,
        authors: &[StructuredName],
        title: &str,
        file: &str,
        ctx: &FormatContext,
    ) -> Option<Formatted>;
}

// =============================================================================
// Registry
// =============================================================================

/// All registered formats plus the auto-detect order.
pub struct FormatRegistry {
    context: FormatContext,
    formats: Vec<Box<dyn PathFormat>>,
    priority: Vec<FormatTag>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("context", &self.context)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

impl FormatRegistry {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(FormatContext::from_config(config), config.priority.clone())
    }

    pub fn new(context: FormatContext, priority: Vec<FormatTag>) -> Self {
        Self {
            context,
            formats: vec![
                Box::new(Calibre),
                Box::new(Flat),
                Box::new(Oml),
                Box::new(Opf),
            ],
            priority,
        }
    }

    pub fn context(&self) -> &FormatContext {
        &self.context
    }

    /// Look up a format by tag.
    pub fn get(&self, tag: FormatTag) -> Option<&dyn PathFormat> {
        self.formats
            .iter()
            .find(|f| f.tag() == tag)
            .map(|f| f.as_ref())
    }

    /// Formats in auto-detect order.
    pub fn in_priority_order(&self) -> impl Iterator<Item = &dyn PathFormat> + '_ {
        self.priority.iter().filter_map(|tag| self.get(*tag))
    }

    pub fn recognize(&self, tag: FormatTag, segments: &[&str], path: &str) -> Option<CatalogEntry> {
        self.get(tag)?.recognize(segments, path, &self.context)
    }

    pub fn generate(
        &self,
        tag: FormatTag,
        authors: &[StructuredName],
        title: &str,
        file: &str,
    ) -> Option<Formatted> {
        self.get(tag)?.generate(authors, title, file, &self.context)
    }
}
