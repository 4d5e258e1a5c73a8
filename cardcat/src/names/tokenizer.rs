//! Human-name tokenizer capability.
//!
//! [`NameTokenizer`] splits a free-text name (already stripped of any role
//! parenthetical) into first/middle/last/prefix/suffix. The crate ships
//! [`HeuristicTokenizer`]; callers with better name data can plug in their
//! own implementation through [`crate::names::NameProcessor::with_tokenizer`].

/// Name parts produced by a tokenizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameParts {
    pub first: Option<String>,
    pub middle: Option<String>,
    pub last: Option<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    /// The string that was tokenized.
    pub original: String,
}

/// Splits a free-text name into its parts.
pub trait NameTokenizer: Send + Sync {
    fn tokenize(&self, raw: &str) -> NameParts;
}

/// Honorifics that open a name (compared without dots, lowercase).
const HONORIFICS: &[&str] = &[
    "dr", "mr", "mrs", "ms", "miss", "mx", "prof", "sir", "dame", "rev", "fr", "lord", "lady",
];

/// Generational and degree suffixes (compared without dots, lowercase).
const SUFFIXES: &[&str] = &["jr", "jnr", "sr", "snr", "ii", "iii", "iv", "phd", "md", "esq"];

/// Lowercase surname particles that bind to the following token.
const PARTICLES: &[&str] = &[
    "van", "von", "de", "da", "di", "du", "del", "della", "der", "den", "la", "le", "ter", "ten",
    "dos", "das",
];

/// Rule-based tokenizer for Western name order.
///
/// Handles `Last, First Middle` and `First Middle Last`, honorifics,
/// suffixes and lowercase surname particles. A lone token is a first name:
/// collective names like `BAVO` or `kuda.org` have no surname to sort on.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTokenizer;

impl NameTokenizer for HeuristicTokenizer {
    fn tokenize(&self, raw: &str) -> NameParts {
        let cleaned = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        let sections: Vec<&str> = cleaned
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        let mut parts = match sections.as_slice() {
            [] => NameParts::default(),
            [single] => natural_order(single),
            [surname, rest @ ..] => inverted_order(surname, rest),
        };
        parts.original = raw.to_string();
        parts
    }
}

fn key(token: &str) -> String {
    token.trim_matches(|c| c == '.' || c == ',').to_lowercase()
}

fn is_honorific(token: &str) -> bool {
    HONORIFICS.contains(&key(token).as_str())
}

fn is_suffix(token: &str) -> bool {
    SUFFIXES.contains(&key(token).as_str())
}

fn is_particle(token: &str) -> bool {
    PARTICLES.contains(&token)
}

fn join(tokens: &[&str]) -> Option<String> {
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

/// Peel honorifics off the front and suffixes off the back, always keeping
/// at least one token in the middle.
fn peel<'a>(tokens: &'a [&'a str]) -> (&'a [&'a str], &'a [&'a str], &'a [&'a str]) {
    let mut start = 0;
    while tokens.len() - start > 1 && is_honorific(tokens[start]) {
        start += 1;
    }
    let mut end = tokens.len();
    while end - start > 1 && is_suffix(tokens[end - 1]) {
        end -= 1;
    }
    (&tokens[..start], &tokens[start..end], &tokens[end..])
}

/// `First Middle Last`
fn natural_order(text: &str) -> NameParts {
    let tokens: Vec<&str> = text.split(' ').collect();
    let (prefix, core, suffix) = peel(&tokens);

    let mut parts = NameParts {
        prefix: join(prefix),
        suffix: join(suffix),
        ..Default::default()
    };

    if let [only] = core {
        parts.first = Some((*only).to_string());
        return parts;
    }

    let mut surname_start = core.len() - 1;
    while surname_start > 1 && is_particle(core[surname_start - 1]) {
        surname_start -= 1;
    }
    parts.first = Some(core[0].to_string());
    parts.middle = join(&core[1..surname_start]);
    parts.last = join(&core[surname_start..]);
    parts
}

/// `Last, First Middle[, Suffix]`
fn inverted_order(surname: &str, rest: &[&str]) -> NameParts {
    let surname_tokens: Vec<&str> = surname.split(' ').collect();
    let (_, surname_core, surname_suffix) = peel(&surname_tokens);

    let mut suffixes: Vec<&str> = surname_suffix.to_vec();
    let mut given: Vec<&str> = Vec::new();
    for section in rest {
        let tokens: Vec<&str> = section.split(' ').collect();
        if tokens.iter().all(|t| is_suffix(t)) {
            suffixes.extend(tokens);
        } else {
            given.extend(tokens);
        }
    }

    let (prefix, given_core, given_suffix) = peel(&given);
    suffixes.extend_from_slice(given_suffix);

    NameParts {
        first: given_core.first().map(|t| (*t).to_string()),
        middle: given_core.get(1..).and_then(join),
        last: join(surname_core),
        prefix: join(prefix),
        suffix: join(&suffixes),
        original: String::new(),
    }
}
