//! Path engine: the public entry point for recognizing and formatting paths.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │  Raw path   │────▶│  Normalize  │────▶│  Registry   │────▶│ CatalogEntry │
//! │ (any seps)  │     │ + segments  │     │ (priority)  │     │  or None     │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use cardcat::engine::PathEngine;
//!
//! let engine = PathEngine::default();
//! let entry = engine.recognize("S/Said, Edward/Orientalism.pdf", None).unwrap();
//! assert_eq!(entry.format.as_str(), "oml");
//!
//! let flat = engine.format_path(&["Edward Said"], "Orientalism", "o.pdf", Some("flat")).unwrap();
//! assert_eq!(flat.as_path(), Some("Said, Edward - Orientalism.pdf"));
//! ```

use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::formats::{FormatRegistry, FormatTag};
use crate::models::{CatalogEntry, Formatted, StructuredName};
use crate::names::NameProcessor;

static DEFAULT_ENGINE: Lazy<PathEngine> = Lazy::new(PathEngine::default);

/// The canonical segment separator, whatever the host uses.
pub const SEPARATOR: char = '/';

// =============================================================================
// Normalization
// =============================================================================

/// Normalize a path the way a POSIX path library would, on any host.
///
/// Backslashes become `/`, repeated separators collapse, `.` segments
/// disappear and `dir/..` pairs cancel. A leading `/` and a trailing `/`
/// are kept; an empty result becomes `.`.
pub fn normalize(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let absolute = unified.starts_with(SEPARATOR);
    let trailing = unified.len() > 1 && unified.ends_with(SEPARATOR);

    let mut stack: Vec<&str> = Vec::new();
    for segment in unified.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => match stack.last() {
                Some(&last) if last != ".." => {
                    stack.pop();
                }
                _ if absolute => {}
                _ => stack.push(".."),
            },
            other => stack.push(other),
        }
    }

    let mut normalized = stack.join("/");
    if absolute {
        normalized.insert(0, SEPARATOR);
    }
    if trailing && !stack.is_empty() {
        normalized.push(SEPARATOR);
    }
    if normalized.is_empty() {
        normalized.push('.');
    }
    normalized
}

/// Split a normalized path into segments, dropping the one empty segment a
/// leading separator produces.
pub fn segments(normalized: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = normalized.split(SEPARATOR).collect();
    if parts.first() == Some(&"") {
        parts.remove(0);
    }
    parts
}

/// Treat an empty or blank tag like no tag.
fn given(format: Option<&str>) -> Option<&str> {
    format.filter(|f| !f.trim().is_empty())
}

// =============================================================================
// Path Engine
// =============================================================================

/// Recognizes catalog paths and generates them back.
///
/// Stateless after construction; share one engine freely across threads.
#[derive(Debug, Default)]
pub struct PathEngine {
    registry: FormatRegistry,
}

impl PathEngine {
    pub fn new(registry: FormatRegistry) -> Self {
        Self { registry }
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self::new(FormatRegistry::from_config(config))
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    pub fn names(&self) -> &NameProcessor {
        &self.registry.context().names
    }

    /// Recognize `path` with the named format, or auto-detect when `format`
    /// is `None` or blank.
    ///
    /// Returns `None` when nothing matches or the tag is not registered.
    pub fn recognize(&self, path: &str, format: Option<&str>) -> Option<CatalogEntry> {
        match given(format) {
            Some(name) => match name.parse::<FormatTag>() {
                Ok(tag) => self.recognize_as(path, tag),
                Err(e) => {
                    debug!(path, error = %e, "recognize: unregistered format");
                    None
                }
            },
            None => self.detect(path),
        }
    }

    /// Recognize `path` with exactly one format.
    pub fn recognize_as(&self, path: &str, tag: FormatTag) -> Option<CatalogEntry> {
        let normalized = normalize(path);
        let parts = segments(&normalized);
        trace!(path, ?parts, "recognize: segments");
        self.registry.recognize(tag, &parts, path)
    }

    /// Try every format in priority order; the first match wins.
    pub fn detect(&self, path: &str) -> Option<CatalogEntry> {
        let normalized = normalize(path);
        let parts = segments(&normalized);
        trace!(path, ?parts, "detect: segments");

        let context = self.registry.context();
        let found = self
            .registry
            .in_priority_order()
            .find_map(|format| format.recognize(&parts, path, context));
        match &found {
            Some(entry) => debug!(path, format = %entry.format, "detect: matched"),
            None => debug!(path, "detect: no format matched"),
        }
        found
    }

    /// Generate a path (or export object) from raw author strings.
    ///
    /// Returns `None` when `format` is missing, blank or unregistered, or
    /// when the authors parse to nothing.
    pub fn format_path<S: AsRef<str>>(
        &self,
        authors: &[S],
        title: &str,
        file: &str,
        format: Option<&str>,
    ) -> Option<Formatted> {
        let tag = match given(format)?.parse::<FormatTag>() {
            Ok(tag) => tag,
            Err(e) => {
                debug!(error = %e, "format_path: unregistered format");
                return None;
            }
        };
        let names = self.names().parse_names(authors);
        self.format_names(&names, title, file, tag)
    }

    /// Generate from already-parsed names.
    pub fn format_names(
        &self,
        names: &[StructuredName],
        title: &str,
        file: &str,
        tag: FormatTag,
    ) -> Option<Formatted> {
        self.registry.generate(tag, names, title, file)
    }

    /// Write a recognized entry out in another (or the same) format.
    pub fn regenerate(&self, entry: &CatalogEntry, tag: FormatTag) -> Option<Formatted> {
        let names = self.names().parse_names(&entry.author_names());
        self.format_names(&names, &entry.title, &entry.file, tag)
    }
}

/// [`PathEngine::recognize`] with the default configuration.
pub fn recognize(path: &str, format: Option<&str>) -> Option<CatalogEntry> {
    DEFAULT_ENGINE.recognize(path, format)
}

/// [`PathEngine::format_path`] with the default configuration.
pub fn format_path<S: AsRef<str>>(
    authors: &[S],
    title: &str,
    file: &str,
    format: Option<&str>,
) -> Option<Formatted> {
    DEFAULT_ENGINE.format_path(authors, title, file, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(""), ".");
        assert_eq!(normalize("../"), "../");
        assert_eq!(normalize("a//b/./c"), "a/b/c");
        assert_eq!(normalize("a/x/../b"), "a/b");
        assert_eq!(normalize("/a/b/"), "/a/b/");
        assert_eq!(normalize("/../a"), "/a");
        assert_eq!(normalize("/"), "/");
    }

    #[test]
    fn test_normalize_backslashes() {
        assert_eq!(
            normalize(r"Edward Said\Orientalism\metadata.opf"),
            "Edward Said/Orientalism/metadata.opf"
        );
    }

    #[test]
    fn test_segments_drop_leading_empty() {
        assert_eq!(segments("/a/b"), vec!["a", "b"]);
        assert_eq!(segments("a/b"), vec!["a", "b"]);
        assert_eq!(segments("../"), vec!["..", ""]);
    }

    #[test]
    fn test_auto_detect_prefers_oml() {
        let entry = recognize("S/Said, Edward/Title.ext", None).unwrap();
        assert_eq!(entry.format, FormatTag::Oml);
    }

    #[test]
    fn test_forced_format() {
        let entry = recognize("S/Said, Edward/Title.ext", Some("calibre")).unwrap();
        assert_eq!(entry.format, FormatTag::Calibre);
        assert_eq!(entry.authors[0].author, "S");
        assert_eq!(entry.title, "Said, Edward");
    }

    #[test]
    fn test_unregistered_format_is_none() {
        assert!(recognize("S/Said, Edward/Title.ext", Some("dewey")).is_none());
        assert!(format_path(&["Edward Said"], "T", "t.pdf", Some("dewey")).is_none());
    }

    #[test]
    fn test_blank_format() {
        assert!(recognize("Said, Edward - T.pdf", Some("")).is_some());
        assert!(format_path(&["Edward Said"], "T", "t.pdf", Some(" ")).is_none());
        assert!(format_path(&["Edward Said"], "T", "t.pdf", None).is_none());
    }

    #[test]
    fn test_invalid_paths() {
        for path in ["", "../", "one/two/three/four.pdf", "/", "//", "a/b"] {
            assert!(recognize(path, None).is_none(), "{path:?}");
        }
    }

    #[test]
    fn test_path_field_keeps_original() {
        let entry = recognize("/Said, Edward - Orientalism.pdf", None).unwrap();
        assert_eq!(entry.path, "/Said, Edward - Orientalism.pdf");
        assert_eq!(entry.file, "Said, Edward - Orientalism.pdf");
    }

    #[test]
    fn test_custom_priority() {
        let config = EngineConfig {
            priority: vec![FormatTag::Calibre, FormatTag::Oml],
            ..Default::default()
        };
        let engine = PathEngine::with_config(&config);
        let entry = engine.recognize("S/Said, Edward/Title.ext", None).unwrap();
        assert_eq!(entry.format, FormatTag::Calibre);
    }

    #[test]
    fn test_regenerate_across_formats() {
        let engine = PathEngine::default();
        let entry = engine
            .recognize("Ludwig van Beethoven/Letters/letters.pdf", None)
            .unwrap();
        let flat = engine.regenerate(&entry, FormatTag::Flat).unwrap();
        assert_eq!(flat.as_path(), Some("van Beethoven, Ludwig - Letters.pdf"));

        let back = engine.recognize(flat.as_path().unwrap(), None).unwrap();
        assert_eq!(back.authors, entry.authors);
    }
}
