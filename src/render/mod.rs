//! Diagram rendering: layout, color assignment, and HTML generation.
//!
//! The renderer takes a [`RelationalGraph`] plus the hover-description map,
//! lays the nodes out with a spring layout, colors each node by its schema,
//! and writes a self-contained interactive HTML document. The same
//! [`SchemaColors`] instance must be passed to every call in a run so schema
//! colors stay identical between the overall diagram and the per-schema ones.

mod colors;
mod html;
mod index;
mod layout;

pub use colors::SchemaColors;
pub use html::{to_html, VisEdge, VisNode};
pub use index::{index_html, write_index};
pub use layout::spring_layout;

use crate::graph::{schema_of, RelationalGraph};
use ahash::AHashMap;
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the navigation page.
pub const INDEX_FILE_NAME: &str = "index.html";

/// Horizontal spread factor applied to normalized layout coordinates.
const X_SCALE: f64 = 4500.0;
/// Vertical spread factor applied to normalized layout coordinates.
const Y_SCALE: f64 = 3000.0;

/// Diagram file name: the overall diagram for `None`, the per-schema file
/// otherwise.
pub fn diagram_file_name(schema: Option<&str>) -> String {
    match schema {
        Some(s) => format!("EmbraceDiagram_{s}.html"),
        None => "EmbraceDiagram.html".to_string(),
    }
}

/// Build the serialized node and edge lists for one diagram.
pub fn build_diagram(
    graph: &RelationalGraph,
    descriptions: &AHashMap<String, String>,
    colors: &mut SchemaColors,
    rng: &mut StdRng,
) -> (Vec<VisNode>, Vec<VisEdge>) {
    let tables = graph.tables();
    let positions = spring_layout(tables.len(), &graph.edge_indices(), rng);

    let nodes = tables
        .iter()
        .zip(&positions)
        .map(|(table, &(x, y))| {
            let color = colors.color_for(schema_of(table), rng);
            let title = descriptions
                .get(*table)
                .cloned()
                .unwrap_or_else(|| table.to_string());
            VisNode {
                id: table.to_string(),
                label: table.to_string(),
                title,
                color,
                shape: "box",
                x: x * X_SCALE,
                y: y * Y_SCALE,
            }
        })
        .collect();

    let edges = graph
        .edge_set()
        .into_iter()
        .map(|(source, target)| VisEdge { source, target })
        .collect();

    (nodes, edges)
}

/// Render one diagram to `<output_dir>/<file name>` and return the written
/// path.
pub fn write_diagram(
    graph: &RelationalGraph,
    descriptions: &AHashMap<String, String>,
    colors: &mut SchemaColors,
    rng: &mut StdRng,
    output_dir: &Path,
    schema: Option<&str>,
) -> Result<PathBuf> {
    let (nodes, edges) = build_diagram(graph, descriptions, colors, rng);

    let title = match schema {
        Some(s) => format!("{s} Schema Diagram"),
        None => "Overall Schema Diagram".to_string(),
    };

    let path = output_dir.join(diagram_file_name(schema));
    fs::write(&path, to_html(&title, &nodes, &edges))
        .with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!("Created {}", path.display());
    Ok(path)
}
