//! # Cardcat - digital-library catalog path parsing
//!
//! Cardcat reads bibliographic metadata (authors, title, sort keys, roles)
//! out of file paths laid out by digital-library tools, and writes the same
//! metadata back out in any supported layout.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ PathEngine  │────▶│  Registry   │────▶│   Names     │
//! │ (dispatch)  │     │ (grammars)  │     │ (roles/sort)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use cardcat::{format_path, recognize};
//!
//! let entry = recognize("Said, Edward - Orientalism.pdf", None).unwrap();
//! assert_eq!(entry.authors[0].author, "Edward Said");
//!
//! let calibre = format_path(&["Said, Edward"], &entry.title, "metadata.opf", Some("calibre"));
//! assert_eq!(calibre.unwrap().as_path(), Some("Edward Said/Orientalism/metadata.opf"));
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types for config, scan and CLI
//! - [`config`] - Engine configuration
//! - [`models`] - Domain models (CatalogEntry, StructuredName, Role)
//! - [`names`] - Name parsing, joining and title sort keys
//! - [`formats`] - Catalog grammars (calibre, flat, oml, opf)
//! - [`engine`] - Path normalization and format dispatch
//! - [`scan`] - Library scanning and migration planning

// Core modules
pub mod error;
pub mod models;
pub mod config;

// Names and grammars
pub mod names;
pub mod formats;

// Entry point
pub mod engine;

// Library scanning
pub mod scan;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CardcatError, ConfigError, FormatError, ScanError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{AuthorEntry, CatalogEntry, Formatted, OpfAuthor, OpfPackage, Role, StructuredName};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::EngineConfig;

// =============================================================================
// Re-exports - Names
// =============================================================================

pub use names::{
    alphabetized_title,
    join_name,
    parse_name,
    parse_names,
    HeuristicTokenizer,
    JoinOptions,
    NameParts,
    NameProcessor,
    NameTokenizer,
    RoleTable,
};

// =============================================================================
// Re-exports - Formats
// =============================================================================

pub use formats::{FormatContext, FormatRegistry, FormatTag, PathFormat};

// =============================================================================
// Re-exports - Engine
// =============================================================================

pub use engine::{format_path, recognize, PathEngine};

// =============================================================================
// Re-exports - Scan
// =============================================================================

pub use scan::{plan_migration, scan_dir, MigrationPlan, MigrationStep, ScanReport};
