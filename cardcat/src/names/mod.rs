//! Contributor name parsing and joining.
//!
//! [`NameProcessor`] wraps a [`NameTokenizer`] with the catalog-specific
//! rules: a trailing `(eds.)`-style marker becomes a [`Role`], `et al.`
//! is dropped, and a plural editors marker on the last name of a list
//! applies to the whole list.
//!
//! # Example
//!
//! ```rust
//! use cardcat::names::{join_name, parse_name, JoinOptions};
//!
//! let name = parse_name("Said, Edward").unwrap();
//! assert_eq!(join_name(&name, JoinOptions::display()), "Edward Said");
//! assert_eq!(join_name(&name, JoinOptions::sort()), "Said, Edward");
//! ```

pub mod roles;
pub mod tokenizer;

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::models::{AuthorEntry, Role, StructuredName};

pub use roles::RoleTable;
pub use tokenizer::{HeuristicTokenizer, NameParts, NameTokenizer};

/// `et al.` at the end of a name, or as the whole name.
static ET_AL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|[\s,])\s*et\.?\s+al\.?\s*$").expect("valid et al. pattern"));

static DEFAULT_PROCESSOR: Lazy<NameProcessor> = Lazy::new(NameProcessor::default);

// =============================================================================
// Join Options
// =============================================================================

/// How [`NameProcessor::join_name`] renders a name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinOptions {
    /// `Last, First Middle` instead of `First Middle Last`.
    pub alphabetical: bool,
    /// Append ` (<role>)` when a role is set.
    pub include_role: bool,
}

impl JoinOptions {
    pub fn display() -> Self {
        Self::default()
    }

    pub fn sort() -> Self {
        Self {
            alphabetical: true,
            include_role: false,
        }
    }

    pub fn with_role(mut self) -> Self {
        self.include_role = true;
        self
    }
}

// =============================================================================
// Name Processor
// =============================================================================

/// Parses contributor strings into [`StructuredName`]s and joins them back.
#[derive(Clone)]
pub struct NameProcessor {
    tokenizer: Arc<dyn NameTokenizer>,
    roles: RoleTable,
}

impl Default for NameProcessor {
    fn default() -> Self {
        Self::new(HeuristicTokenizer, RoleTable::default())
    }
}

impl std::fmt::Debug for NameProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameProcessor")
            .field("roles", &self.roles)
            .finish_non_exhaustive()
    }
}

impl NameProcessor {
    pub fn new(tokenizer: impl NameTokenizer + 'static, roles: RoleTable) -> Self {
        Self {
            tokenizer: Arc::new(tokenizer),
            roles,
        }
    }

    /// Swap the tokenizer, keeping the role table.
    pub fn with_tokenizer(mut self, tokenizer: impl NameTokenizer + 'static) -> Self {
        self.tokenizer = Arc::new(tokenizer);
        self
    }

    pub fn roles(&self) -> &RoleTable {
        &self.roles
    }

    /// Parse one contributor string.
    ///
    /// Returns `None` for `et al.` and for strings with no name in them.
    pub fn parse_name(&self, raw: &str) -> Option<StructuredName> {
        let text = strip_et_al(raw);
        if text.is_empty() {
            return None;
        }

        let (name_text, marker) = split_role_marker(text);
        let parts = self.tokenizer.tokenize(&name_text);
        let name = StructuredName {
            first: parts.first,
            middle: parts.middle,
            last: parts.last,
            prefix: parts.prefix,
            suffix: parts.suffix,
            role: marker.map(|m| self.roles.lookup(m)),
            original: raw.to_string(),
        };

        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// Parse a list of contributor strings, dropping `et al.` entries.
    ///
    /// When the last name is marked as editors (`X, Y (eds.)`), every name
    /// in the list becomes an editor. A singular `(ed.)` marks only its own
    /// name.
    pub fn parse_names<S: AsRef<str>>(&self, raw: &[S]) -> Vec<StructuredName> {
        let mut names: Vec<StructuredName> = raw
            .iter()
            .filter_map(|r| self.parse_name(r.as_ref()))
            .collect();

        let plural_editors = names
            .last()
            .is_some_and(|n| n.role == Some(Role::Editors));
        if plural_editors {
            for name in &mut names {
                name.role = Some(Role::Editors);
            }
        }
        names
    }

    /// Display and sort forms of a parsed name.
    pub fn author_entry(&self, name: &StructuredName) -> AuthorEntry {
        AuthorEntry {
            author: join_name(name, JoinOptions::display()),
            author_sort: join_name(name, JoinOptions::sort()),
            role: name.role.clone(),
        }
    }
}

/// Drop a trailing `et al.` and surrounding separators.
fn strip_et_al(raw: &str) -> &str {
    let trimmed = raw.trim();
    match ET_AL.find(trimmed) {
        Some(m) => trimmed[..m.start()].trim_end_matches([',', ' ']),
        None => trimmed,
    }
}

/// Split off the role marker: the last `( ... )` group with no `(` after it.
///
/// One left-to-right pass: every `(` opens a candidate and discards the
/// previous one, every `)` closes the open candidate. Whatever candidate is
/// still standing at the end is the trailing group.
fn split_role_marker(text: &str) -> (String, Option<&str>) {
    let mut open: Option<usize> = None;
    let mut group: Option<(usize, usize)> = None;
    for (i, c) in text.char_indices() {
        match c {
            '(' => {
                open = Some(i);
                group = None;
            }
            ')' => {
                if let Some(start) = open.take() {
                    group = Some((start, i));
                }
            }
            _ => {}
        }
    }

    let Some((start, end)) = group else {
        return (text.to_string(), None);
    };
    let marker = text[start + 1..end].trim();
    if marker.is_empty() {
        return (text.to_string(), None);
    }

    let before = text[..start].trim_end();
    let after = text[end + 1..].trim_start();
    let joined = if before.is_empty() || after.is_empty() {
        format!("{before}{after}")
    } else if after.starts_with(|c: char| c.is_ascii_punctuation()) {
        format!("{before}{after}")
    } else {
        format!("{before} {after}")
    };
    (joined, Some(marker))
}

/// Join a name into a single string.
///
/// Display order is prefix, first, middle, last, suffix. Alphabetical order
/// is `last,` followed by prefix, first, middle, suffix.
pub fn join_name(name: &StructuredName, options: JoinOptions) -> String {
    let fields: Vec<Option<String>> = if options.alphabetical {
        vec![
            name.last.as_ref().map(|last| format!("{last},")),
            name.prefix.clone(),
            name.first.clone(),
            name.middle.clone(),
            name.suffix.clone(),
        ]
    } else {
        vec![
            name.prefix.clone(),
            name.first.clone(),
            name.middle.clone(),
            name.last.clone(),
            name.suffix.clone(),
        ]
    };

    let mut joined = fields.into_iter().flatten().collect::<Vec<_>>().join(" ");
    if options.include_role {
        if let Some(role) = &name.role {
            joined.push_str(&format!(" ({role})"));
        }
    }
    joined
}

/// Sort form of a title: a leading `The`, `A` or `An` moves to the end.
///
/// `"The Art of War"` sorts as `"Art of War, The"`. Only whole words match,
/// so `"Annual Report"` is unchanged.
pub fn alphabetized_title(title: &str) -> String {
    for article in ["The ", "An ", "A "] {
        let n = article.len();
        let Some(head) = title.get(..n) else {
            continue;
        };
        let rest = title[n..].trim_start();
        if head.eq_ignore_ascii_case(article) && !rest.trim_end().is_empty() {
            return format!("{}, {}", rest, &head[..n - 1]);
        }
    }
    title.to_string()
}

/// [`NameProcessor::parse_name`] with the default tokenizer and role table.
pub fn parse_name(raw: &str) -> Option<StructuredName> {
    DEFAULT_PROCESSOR.parse_name(raw)
}

/// [`NameProcessor::parse_names`] with the default tokenizer and role table.
pub fn parse_names<S: AsRef<str>>(raw: &[S]) -> Vec<StructuredName> {
    DEFAULT_PROCESSOR.parse_names(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_et_al_is_absent() {
        assert!(parse_name("et al.").is_none());
        assert!(parse_name("  Et al. ").is_none());
    }

    #[test]
    fn test_et_al_trailer_dropped() {
        let name = parse_name("kuda.org, et al.").unwrap();
        assert_eq!(name.first.as_deref(), Some("kuda.org"));
        assert_eq!(name.last, None);
        assert_eq!(name.original, "kuda.org, et al.");
    }

    #[test]
    fn test_et_al_needs_word_boundary() {
        let name = parse_name("Rebet al.").unwrap();
        assert_eq!(name.first.as_deref(), Some("Rebet"));
    }

    #[test]
    fn test_role_abbreviation_expanded() {
        let name = parse_name("BAVO (eds.)").unwrap();
        assert_eq!(name.first.as_deref(), Some("BAVO"));
        assert_eq!(name.role, Some(Role::Editors));
        assert_eq!(name.original, "BAVO (eds.)");

        let name = parse_name("Lydia Davis (trans.)").unwrap();
        assert_eq!(name.role, Some(Role::Translator));
        assert_eq!(name.last.as_deref(), Some("Davis"));
    }

    #[test]
    fn test_role_marker_mid_string() {
        let name = parse_name("Chevalier (Editor), Tracy").unwrap();
        assert_eq!(name.first.as_deref(), Some("Tracy"));
        assert_eq!(name.last.as_deref(), Some("Chevalier"));
        assert_eq!(name.role, Some(Role::Other("Editor".into())));
    }

    #[test]
    fn test_only_trailing_group_is_a_role() {
        // A '(' after the last group means there is no trailing group
        let name = parse_name("Smith (ed.) (").unwrap();
        assert_eq!(name.role, None);
    }

    #[test]
    fn test_empty_parenthetical_is_not_a_role() {
        let (text, marker) = split_role_marker("Edward Said ()");
        assert_eq!(text, "Edward Said ()");
        assert_eq!(marker, None);
    }

    #[test]
    fn test_no_role_without_parenthetical() {
        let name = parse_name("Edward Said").unwrap();
        assert_eq!(name.role, None);
    }

    #[test]
    fn test_plural_editors_propagate() {
        let names = parse_names(&["X", "Y (eds.)"]);
        assert_eq!(names.len(), 2);
        assert_eq!(names[0].role, Some(Role::Editors));
        assert_eq!(names[1].role, Some(Role::Editors));
    }

    #[test]
    fn test_singular_editor_does_not_propagate() {
        let names = parse_names(&["X (ed.)", "Y"]);
        assert_eq!(names[0].role, Some(Role::Editor));
        assert_eq!(names[1].role, None);

        let names = parse_names(&["X", "Y (ed.)"]);
        assert_eq!(names[0].role, None);
        assert_eq!(names[1].role, Some(Role::Editor));
    }

    #[test]
    fn test_parse_names_filters_et_al() {
        let names = parse_names(&["Buden, Boris", "et al."]);
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_join_display_and_sort() {
        let name = parse_name("Dr. Martin Luther King Jr.").unwrap();
        assert_eq!(join_name(&name, JoinOptions::display()), "Dr. Martin Luther King Jr.");
        assert_eq!(join_name(&name, JoinOptions::sort()), "King, Dr. Martin Luther Jr.");
    }

    #[test]
    fn test_join_without_surname() {
        let name = parse_name("BAVO").unwrap();
        assert_eq!(join_name(&name, JoinOptions::sort()), "BAVO");
    }

    #[test]
    fn test_join_with_role_uses_expanded_text() {
        let name = parse_name("BAVO (eds.)").unwrap();
        assert_eq!(join_name(&name, JoinOptions::display().with_role()), "BAVO (editors)");
        assert_eq!(join_name(&name, JoinOptions::display()), "BAVO");
    }

    #[test]
    fn test_author_entry() {
        let processor = NameProcessor::default();
        let name = processor.parse_name("Susan Buck-Morss").unwrap();
        let entry = processor.author_entry(&name);
        assert_eq!(entry.author, "Susan Buck-Morss");
        assert_eq!(entry.author_sort, "Buck-Morss, Susan");
        assert_eq!(entry.role, None);
    }

    #[test]
    fn test_custom_tokenizer() {
        struct Upper;
        impl NameTokenizer for Upper {
            fn tokenize(&self, raw: &str) -> NameParts {
                NameParts {
                    last: Some(raw.to_uppercase()),
                    original: raw.to_string(),
                    ..Default::default()
                }
            }
        }

        let processor = NameProcessor::default().with_tokenizer(Upper);
        let name = processor.parse_name("said (ed.)").unwrap();
        assert_eq!(name.last.as_deref(), Some("SAID"));
        assert_eq!(name.role, Some(Role::Editor));
    }

    #[test]
    fn test_alphabetized_title() {
        assert_eq!(alphabetized_title("The Art of War"), "Art of War, The");
        assert_eq!(alphabetized_title("A Room"), "Room, A");
        assert_eq!(alphabetized_title("An Essay"), "Essay, An");
        assert_eq!(alphabetized_title("the hobbit"), "hobbit, the");
        assert_eq!(alphabetized_title("The  Art"), "Art, The");
    }

    #[test]
    fn test_alphabetized_title_boundaries() {
        assert_eq!(alphabetized_title("Annual Report"), "Annual Report");
        assert_eq!(alphabetized_title("Theory of Justice"), "Theory of Justice");
        assert_eq!(alphabetized_title("Ab"), "Ab");
        assert_eq!(alphabetized_title("The "), "The ");
        assert_eq!(alphabetized_title("Žižek"), "Žižek");
    }
}
