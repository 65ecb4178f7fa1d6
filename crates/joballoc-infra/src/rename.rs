//! Report file renaming
//!
//! The export tool prefixes every downloaded report with its report type
//! ("Time on Site Report - 12345 - Site A.csv"), which buries the job
//! number the rest of the pipeline keys on. This strips that prefix.

use std::path::{Path, PathBuf};

use joballoc_types::Result;
use log::warn;
use serde::Serialize;

/// Prefix the export tool puts on every report file name
pub const DEFAULT_REPORT_PREFIX: &str = "Time on Site Report - ";

/// One planned or applied rename
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

/// Strip `part` from every file name in `dir` that contains it.
///
/// Returns the renames in file-name order. With `dry_run` the plan is
/// returned without touching any files.
pub fn strip_from_file_names(dir: &Path, part: &str, dry_run: bool) -> Result<Vec<Rename>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();

    files.sort_by(|a, b| {
        a.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .cmp(b.file_name().and_then(|n| n.to_str()).unwrap_or(""))
    });

    let mut renames = Vec::new();
    for path in &files {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.contains(part) {
            continue;
        }

        let new_name = name.replace(part, "");
        if new_name.is_empty() {
            warn!("skipping {:?}: stripping {:?} leaves an empty name", name, part);
            continue;
        }

        if !dry_run {
            std::fs::rename(path, path.with_file_name(&new_name))?;
        }
        renames.push(Rename {
            from: name.to_string(),
            to: new_name,
        });
    }

    Ok(renames)
}
