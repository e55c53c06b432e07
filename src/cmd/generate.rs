//! Generate command implementation: scan, render, index.

use crate::graph::RelationalGraph;
use crate::render::{write_diagram, write_index, SchemaColors};
use crate::scanner::{self, ScanResult};
use anyhow::{bail, Result};
use glob::Pattern;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Environment variable pointing at the checked-out sources in CI.
const CI_SOURCES_VAR: &str = "BUILD_SOURCESDIRECTORY";

/// Default output directory name under the project root.
const DEFAULT_OUTPUT_DIR: &str = "documentation";

pub fn run(
    root: Option<PathBuf>,
    output: Option<PathBuf>,
    exclude: Option<String>,
    seed: Option<u64>,
    progress: bool,
    dry_run: bool,
) -> Result<()> {
    let root = resolve_root(root)?;
    let output_dir = output.unwrap_or_else(|| root.join(DEFAULT_OUTPUT_DIR));

    let exclude_patterns: Vec<Pattern> = exclude
        .map(|e| {
            e.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Pattern::new(s).map_err(|err| anyhow::anyhow!("invalid pattern '{s}': {err}")))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?
        .unwrap_or_default();

    eprintln!("Scanning {}", root.display());
    let start_time = Instant::now();

    let files = scanner::collect_sql_files(&root)?;

    let result = if progress {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files",
            )
            .unwrap()
            .progress_chars("█▓▒░  "),
        );
        let pb_clone = pb.clone();
        let result = scanner::scan_files(&files, move |n| pb_clone.set_position(n as u64))?;
        pb.finish_with_message("done");
        result
    } else {
        scanner::scan_files(&files, |_| {})?
    };

    let ScanResult {
        graph,
        descriptions,
        files_scanned,
    } = result;

    let graph = if exclude_patterns.is_empty() {
        graph
    } else {
        graph.filter_tables(|table| !exclude_patterns.iter().any(|p| p.matches(table)))
    };

    if graph.is_empty() {
        eprintln!("No tables found under {}", root.display());
        return Ok(());
    }

    let schemas = graph.schemas();

    if dry_run {
        eprintln!(
            "Dry run: {} files, {} tables, {} references, {} schemas ({})",
            files_scanned,
            graph.table_count(),
            graph.edge_count(),
            schemas.len(),
            schemas.join(", ")
        );
        return Ok(());
    }

    fs::create_dir_all(&output_dir)?;
    if !output_dir.is_dir() {
        bail!("output path is not a directory: {}", output_dir.display());
    }

    let mut rng = StdRng::seed_from_u64(seed.unwrap_or_else(rand::random));
    let mut colors = SchemaColors::new();

    write_diagram(&graph, &descriptions, &mut colors, &mut rng, &output_dir, None)?;
    for schema in &schemas {
        let subgraph: RelationalGraph = graph.subgraph_for_schema(schema);
        write_diagram(
            &subgraph,
            &descriptions,
            &mut colors,
            &mut rng,
            &output_dir,
            Some(schema),
        )?;
    }

    write_index(&output_dir, &schemas)?;

    eprintln!(
        "\nDiagrams: {} tables, {} references, {} schemas in {:.2?}",
        graph.table_count(),
        graph.edge_count(),
        schemas.len(),
        start_time.elapsed()
    );

    Ok(())
}

/// Resolve the project root: explicit argument first, then the CI sources
/// variable, then the current directory.
fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    let root = match root {
        Some(r) => r,
        None => match env::var_os(CI_SOURCES_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => env::current_dir()?,
        },
    };

    if !root.is_dir() {
        bail!("project root is not a directory: {}", root.display());
    }
    Ok(root)
}
