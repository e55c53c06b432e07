//! Directory scanning and graph construction.
//!
//! Walks a database project tree: top-level subdirectories whose name starts
//! with an uppercase letter group the definition files for one schema, and
//! every `.sql` file under them is run through the extractor. Results merge
//! into a single reference graph plus a table-to-description map.

use crate::extract::{self, is_ignored_schema};
use crate::graph::RelationalGraph;
use ahash::AHashMap;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Accumulated result of scanning a project tree.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// The full table-reference graph.
    pub graph: RelationalGraph,
    /// Hover description per declared table identifier.
    pub descriptions: AHashMap<String, String>,
    /// Number of `.sql` files processed.
    pub files_scanned: usize,
}

/// Collect every `.sql` file under the qualifying top-level directories of
/// `root`, in sorted order so repeated runs see the same sequence.
pub fn collect_sql_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut schema_dirs = Vec::new();
    let entries = fs::read_dir(root)
        .with_context(|| format!("failed to read project root: {}", root.display()))?;

    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        // Schema directories are capitalized; everything else is tooling.
        let starts_upper = name.chars().next().is_some_and(|c| c.is_ascii_uppercase());
        if starts_upper && !is_ignored_schema(&name) {
            schema_dirs.push(entry.path());
        }
    }
    schema_dirs.sort();

    let mut files = Vec::new();
    for dir in schema_dirs {
        for entry in WalkDir::new(&dir).sort_by_file_name() {
            let entry =
                entry.with_context(|| format!("failed to walk directory: {}", dir.display()))?;
            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|e| e == "sql")
            {
                files.push(entry.into_path());
            }
        }
    }

    Ok(files)
}

/// Run the extractor over each file and merge into one graph and description
/// map. `on_file` is called with the running file count, for progress display.
pub fn scan_files<F>(files: &[PathBuf], mut on_file: F) -> Result<ScanResult>
where
    F: FnMut(usize),
{
    let mut result = ScanResult::default();

    for (i, path) in files.iter().enumerate() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let extracted = extract::extract(&content);

        for table in &extracted.tables {
            result.graph.add_table(table);
            result
                .descriptions
                .insert(table.clone(), extracted.hover_title());
        }

        // Every reference in a file is attributed to its first declared
        // table. Definition files in this dialect hold one table each.
        if let Some(first) = extracted.tables.first() {
            for relation in &extracted.relations {
                result.graph.add_reference(first, relation);
            }
        }

        result.files_scanned += 1;
        on_file(i + 1);
    }

    Ok(result)
}

/// Scan a project root in one call.
pub fn scan_project(root: &Path) -> Result<ScanResult> {
    let files = collect_sql_files(root)?;
    scan_files(&files, |_| {})
}
