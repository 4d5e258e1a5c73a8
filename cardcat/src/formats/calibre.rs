//! Calibre library layout: `Author One, Author Two/Title/file.ext`.

use tracing::debug;

use super::{FormatContext, FormatTag, PathFormat};
use crate::models::{CatalogEntry, Formatted, StructuredName};
use crate::names::JoinOptions;

/// One directory per author group, one per title, then the file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Calibre;

impl PathFormat for Calibre {
    fn tag(&self) -> FormatTag {
        FormatTag::Calibre
    }

    fn recognize(
        &self,
        segments: &[&str],
        path: &str,
        ctx: &FormatContext,
    ) -> Option<CatalogEntry> {
        let &[authors_dir, title, file] = segments else {
            return None;
        };
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        if ctx.is_ignored(file) {
            debug!(path, file, "calibre: ignored leaf");
            return None;
        }

        let pieces: Vec<&str> = authors_dir.split(',').collect();
        let names = ctx.names.parse_names(&pieces);
        ctx.entry(&names, title, file, path, FormatTag::Calibre)
    }

    fn generate(
        &self,
        authors: &[StructuredName],
        title: &str,
        file: &str,
        ctx: &FormatContext,
    ) -> Option<Formatted> {
        let authors = ctx.join_authors(authors, JoinOptions::display().with_role(), ", ")?;
        Some(Formatted::Path(format!("{authors}/{title}/{file}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use pretty_assertions::assert_eq;

    fn recognize(segments: &[&str]) -> Option<CatalogEntry> {
        Calibre.recognize(segments, &segments.join("/"), &FormatContext::default())
    }

    #[test]
    fn test_recognize_single_author() {
        let entry = recognize(&["Edward Said", "Orientalism", "metadata.opf"]).unwrap();
        assert_eq!(entry.authors.len(), 1);
        assert_eq!(entry.authors[0].author, "Edward Said");
        assert_eq!(entry.author_sort, "Said, Edward");
        assert_eq!(entry.title, "Orientalism");
        assert_eq!(entry.file, "metadata.opf");
        assert_eq!(entry.format, FormatTag::Calibre);
    }

    #[test]
    fn test_recognize_comma_separated_authors() {
        let entry =
            recognize(&["Boris Buden, Želimir Žilnik, kuda.org", "Uvod u prošlost", "b.pdf"])
                .unwrap();
        let names: Vec<_> = entry.authors.iter().map(|a| a.author.as_str()).collect();
        assert_eq!(names, vec!["Boris Buden", "Želimir Žilnik", "kuda.org"]);
        assert_eq!(entry.author_sort, "Buden, Boris");
    }

    #[test]
    fn test_recognize_editors() {
        let entry = recognize(&["BAVO (eds.)", "Cultural Activism Today", "metadata.opf"]).unwrap();
        assert_eq!(entry.authors[0].author, "BAVO");
        assert_eq!(entry.authors[0].role, Some(Role::Editors));
    }

    #[test]
    fn test_wrong_shape() {
        assert!(recognize(&["Edward Said", "Orientalism"]).is_none());
        assert!(recognize(&["a", "b", "c", "d.pdf"]).is_none());
        assert!(recognize(&["Edward Said", "", "metadata.opf"]).is_none());
    }

    #[test]
    fn test_ignored_leaf() {
        for leaf in [".DS_Store", ".dat", ".git", "nohup.out"] {
            assert!(recognize(&["Edward Said", "Orientalism", leaf]).is_none(), "{leaf}");
        }
    }

    #[test]
    fn test_generate_caps_authors() {
        let ctx = FormatContext::default();
        let names = ctx.names.parse_names(&["A One", "B Two", "C Three", "D Four", "E Five"]);
        let out = Calibre.generate(&names, "Title", "t.pdf", &ctx).unwrap();
        assert_eq!(out.as_path(), Some("A One, B Two, C Three/Title/t.pdf"));
    }

    #[test]
    fn test_generate_without_authors() {
        let ctx = FormatContext::default();
        assert!(Calibre.generate(&[], "Title", "t.pdf", &ctx).is_none());
    }
}
