//! Single-file layout: `Last, First; Other, Author - Title.ext`.

use tracing::debug;

use super::{extension, FormatContext, FormatTag, PathFormat};
use crate::models::{CatalogEntry, Formatted, StructuredName};
use crate::names::JoinOptions;

/// Everything encoded in one filename; authors and title are split on the
/// first `" - "`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flat;

const TITLE_SEPARATOR: &str = " - ";

impl PathFormat for Flat {
    fn tag(&self) -> FormatTag {
        FormatTag::Flat
    }

    fn recognize(
        &self,
        segments: &[&str],
        path: &str,
        ctx: &FormatContext,
    ) -> Option<CatalogEntry> {
        let &[file] = segments else {
            return None;
        };
        let Some((authors_part, rest)) = file.split_once(TITLE_SEPARATOR) else {
            debug!(path, "flat: no title separator");
            return None;
        };

        let ext = extension(rest);
        let title = rest.strip_suffix(ext).unwrap_or(rest);

        let pieces: Vec<&str> = authors_part.split(';').collect();
        let names = ctx.names.parse_names(&pieces);
        ctx.entry(&names, title, file, path, FormatTag::Flat)
    }

    fn generate(
        &self,
        authors: &[StructuredName],
        title: &str,
        file: &str,
        ctx: &FormatContext,
    ) -> Option<Formatted> {
        let authors = ctx.join_authors(authors, JoinOptions::sort().with_role(), "; ")?;
        let ext = extension(file);
        Some(Formatted::Path(format!("{authors}{TITLE_SEPARATOR}{title}{ext}")))
    }
}
