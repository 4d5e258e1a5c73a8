//! Library scanning and migration planning.
//!
//! The engine itself never touches the filesystem. This module is the
//! caller side: it walks a library root, feeds every file path (relative to
//! the root) to a [`PathEngine`], and can plan a move of every recognized
//! entry into another catalog format. Plans are dry runs; nothing is moved.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::engine::PathEngine;
use crate::error::{ScanError, ScanResult};
use crate::formats::FormatTag;
use crate::models::{CatalogEntry, Formatted};

// =============================================================================
// Scan
// =============================================================================

/// Result of scanning a library root.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub root: PathBuf,
    pub scanned_at: DateTime<Utc>,
    /// Files visited, ignored ones included.
    pub files_seen: usize,
    /// Files skipped because their name is on the ignore list.
    pub ignored: usize,
    pub entries: Vec<CatalogEntry>,
    /// Relative paths no format recognized.
    pub unrecognized: Vec<String>,
}

impl ScanReport {
    /// Number of entries recognized per format.
    pub fn counts(&self) -> Vec<(FormatTag, usize)> {
        FormatTag::ALL
            .iter()
            .map(|tag| (*tag, self.entries.iter().filter(|e| e.format == *tag).count()))
            .filter(|(_, n)| *n > 0)
            .collect()
    }
}

/// Path of `path` relative to `root`, with `/` separators.
fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Walk `root` and recognize every file under it.
///
/// With `format` set only that grammar is tried; otherwise every format is
/// tried in priority order. Entries are reported in file-name order.
pub fn scan_dir(
    engine: &PathEngine,
    root: impl AsRef<Path>,
    format: Option<FormatTag>,
) -> ScanResult<ScanReport> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let context = engine.registry().context();
    let mut report = ScanReport {
        root: root.to_path_buf(),
        scanned_at: Utc::now(),
        files_seen: 0,
        ignored: 0,
        entries: Vec::new(),
        unrecognized: Vec::new(),
    };

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "scan: skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        report.files_seen += 1;

        let leaf = entry.file_name().to_string_lossy();
        if context.is_ignored(&leaf) {
            report.ignored += 1;
            continue;
        }

        let relative = relative_path(root, entry.path());
        let recognized = match format {
            Some(tag) => engine.recognize_as(&relative, tag),
            None => engine.detect(&relative),
        };
        match recognized {
            Some(found) => report.entries.push(found),
            None => report.unrecognized.push(relative),
        }
    }

    info!(
        root = %root.display(),
        files = report.files_seen,
        recognized = report.entries.len(),
        unrecognized = report.unrecognized.len(),
        "scan complete"
    );
    Ok(report)
}

// =============================================================================
// Migration
// =============================================================================

/// One planned move.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationStep {
    /// Current path, relative to the library root.
    pub from: String,
    /// Path (or export object) in the target format.
    pub to: Formatted,
    /// False when the entry already sits at its target path.
    pub changed: bool,
}

/// Every move needed to lay a scanned library out in `target`.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationPlan {
    pub target: FormatTag,
    pub steps: Vec<MigrationStep>,
    /// Entries the target format could not express.
    pub skipped: Vec<String>,
}

impl MigrationPlan {
    /// Steps that actually move something.
    pub fn changes(&self) -> impl Iterator<Item = &MigrationStep> {
        self.steps.iter().filter(|s| s.changed)
    }
}

/// Plan the migration of every entry in `report` to `target`.
pub fn plan_migration(
    engine: &PathEngine,
    report: &ScanReport,
    target: FormatTag,
) -> MigrationPlan {
    let mut plan = MigrationPlan {
        target,
        steps: Vec::new(),
        skipped: Vec::new(),
    };

    for entry in &report.entries {
        match engine.regenerate(entry, target) {
            Some(to) => {
                let changed = to.as_path() != Some(entry.path.as_str());
                plan.steps.push(MigrationStep {
                    from: entry.path.clone(),
                    to,
                    changed,
                });
            }
            None => {
                debug!(path = %entry.path, %target, "migrate: target cannot express entry");
                plan.skipped.push(entry.path.clone());
            }
        }
    }
    plan
}
