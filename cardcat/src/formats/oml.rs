//! Letter-bucketed layout: `L/Last, First; Other, Author/Title (Publisher Year).ext`.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{extension, FormatContext, FormatTag, PathFormat};
use crate::models::{CatalogEntry, Formatted, StructuredName};
use crate::names::JoinOptions;

/// A trailing `(Publisher Year)` annotation on the file stem.
static ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^()]*\)\s*$").expect("valid annotation pattern"));

/// Files grouped under the initial of their first author's sort name.
///
/// Any trailing parenthetical on the file stem is publication data, not part
/// of the title, and is dropped; regenerating writes the bare title.
#[derive(Debug, Clone, Copy, Default)]
pub struct Oml;

fn same_letter(letter: &str, authors_dir: &str) -> bool {
    let mut letters = letter.chars();
    let (Some(letter), None) = (letters.next(), letters.next()) else {
        return false;
    };
    match authors_dir.chars().next() {
        Some(initial) => letter.to_lowercase().eq(initial.to_lowercase()),
        None => false,
    }
}

/// Uppercase initial, or the initial itself when uppercasing would
/// produce more than one character (`ß` becomes `SS`).
fn bucket_letter(initial: char) -> char {
    let mut upper = initial.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => initial,
    }
}

impl PathFormat for Oml {
    fn tag(&self) -> FormatTag {
        FormatTag::Oml
    }

    fn recognize(
        &self,
        segments: &[&str],
        path: &str,
        ctx: &FormatContext,
    ) -> Option<CatalogEntry> {
        let &[letter, authors_dir, file] = segments else {
            return None;
        };
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        if ctx.is_ignored(file) {
            debug!(path, file, "oml: ignored leaf");
            return None;
        }
        if !same_letter(letter, authors_dir) {
            debug!(path, letter, "oml: letter does not match first author");
            return None;
        }

        let stem = file.strip_suffix(extension(file)).unwrap_or(file);
        let title = ANNOTATION.replace(stem, "");

        let pieces: Vec<&str> = authors_dir.split(';').collect();
        let names = ctx.names.parse_names(&pieces);
        ctx.entry(&names, &title, file, path, FormatTag::Oml)
    }

    fn generate(
        &self,
        authors: &[StructuredName],
        title: &str,
        file: &str,
        ctx: &FormatContext,
    ) -> Option<Formatted> {
        let authors = ctx.join_authors(authors, JoinOptions::sort().with_role(), "; ")?;
        let letter = bucket_letter(authors.chars().next()?);
        let ext = extension(file);
        Some(Formatted::Path(format!("{letter}/{authors}/{title}{ext}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use pretty_assertions::assert_eq;

    fn recognize(segments: &[&str]) -> Option<CatalogEntry> {
        Oml.recognize(segments, &segments.join("/"), &FormatContext::default())
    }

    #[test]
    fn test_recognize_with_role_inside_name() {
        let entry = recognize(&["C", "Chevalier (Editor), Tracy", "Encyclopedia of the Essay.opf"])
            .unwrap();
        assert_eq!(entry.authors[0].author, "Tracy Chevalier");
        assert_eq!(entry.author_sort, "Chevalier, Tracy");
        assert_eq!(entry.authors[0].role, Some(Role::Other("Editor".into())));
        assert_eq!(entry.title, "Encyclopedia of the Essay");
        assert_eq!(entry.file, "Encyclopedia of the Essay.opf");
        assert_eq!(entry.format, FormatTag::Oml);
    }

    #[test]
    fn test_annotation_dropped() {
        let entry = recognize(&[
            "L",
            "Laclau, Ernesto; Mouffe, Chantal",
            "Hegemony and Socialist Strategy (Verso 1985).pdf",
        ])
        .unwrap();
        assert_eq!(entry.authors.len(), 2);
        assert_eq!(entry.authors[1].author, "Chantal Mouffe");
        assert_eq!(entry.title, "Hegemony and Socialist Strategy");
    }

    #[test]
    fn test_letter_case_insensitive() {
        assert!(recognize(&["s", "Said, Edward", "Orientalism.pdf"]).is_some());
        assert!(recognize(&["ž", "Žižek, Slavoj", "The Parallax View.epub"]).is_some());
    }

    #[test]
    fn test_letter_must_match() {
        assert!(recognize(&["T", "Said, Edward", "Orientalism.pdf"]).is_none());
        assert!(recognize(&["Sa", "Said, Edward", "Orientalism.pdf"]).is_none());
        assert!(recognize(&["Edward Said", "Orientalism", "metadata.opf"]).is_none());
    }

    #[test]
    fn test_ignored_leaf() {
        assert!(recognize(&["S", "Said, Edward", ".DS_Store"]).is_none());
        assert!(recognize(&["S", "Said, Edward", "nohup.out"]).is_none());
    }

    #[test]
    fn test_annotation_only_title() {
        assert!(recognize(&["S", "Said, Edward", "(1978).pdf"]).is_none());
    }

    #[test]
    fn test_generate() {
        let ctx = FormatContext::default();
        let names = ctx.names.parse_names(&["BAVO (eds.)"]);
        let out = Oml.generate(&names, "Cultural Activism Today", "metadata.opf", &ctx).unwrap();
        assert_eq!(out.as_path(), Some("B/BAVO (editors)/Cultural Activism Today.opf"));
    }

    #[test]
    fn test_generate_uppercases_letter() {
        let ctx = FormatContext::default();
        let names = ctx.names.parse_names(&["kuda.org"]);
        let out = Oml.generate(&names, "Uvod", "u.pdf", &ctx).unwrap();
        assert_eq!(out.as_path(), Some("K/kuda.org/Uvod.pdf"));
    }

    #[test]
    fn test_generate_keeps_initial_without_single_uppercase() {
        let ctx = FormatContext::default();
        let names = ctx.names.parse_names(&["ßolt, Anna"]);
        let out = Oml.generate(&names, "T", "t.pdf", &ctx).unwrap();
        let path = out.as_path().unwrap();
        assert_eq!(path, "ß/ßolt, Anna/T.pdf");

        let segments: Vec<&str> = path.split('/').collect();
        let entry = Oml.recognize(&segments, path, &ctx).unwrap();
        assert_eq!(entry.author_sort, "ßolt, Anna");
    }
}
