//! OPF metadata export. Never matches a path.

use super::{FormatContext, FormatTag, PathFormat};
use crate::models::{CatalogEntry, Formatted, OpfAuthor, OpfPackage, StructuredName};
use crate::names::{join_name, JoinOptions};

const DEFAULT_ROLE: &str = "Author";

/// Export-only format producing an [`OpfPackage`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Opf;

impl PathFormat for Opf {
    fn tag(&self) -> FormatTag {
        FormatTag::Opf
    }

    fn recognize(
        &self,
        _segments: &[&str],
        _path: &str,
        _ctx: &FormatContext,
    ) -> Option<CatalogEntry> {
        None
    }

    fn generate(
        &self,
        authors: &[StructuredName],
        title: &str,
        _file: &str,
        ctx: &FormatContext,
    ) -> Option<Formatted> {
        let authors: Vec<OpfAuthor> = authors
            .iter()
            .take(ctx.max_authors)
            .map(|name| OpfAuthor {
                value: join_name(name, JoinOptions::display()),
                file_as: join_name(name, JoinOptions::sort()),
                role: name
                    .role
                    .as_ref()
                    .map(|r| r.capitalized())
                    .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            })
            .collect();
        if authors.is_empty() {
            return None;
        }

        Some(Formatted::Opf(OpfPackage {
            title: title.to_string(),
            authors,
        }))
    }
}
