//! Navigation page linking the generated diagrams.

use crate::render::{diagram_file_name, INDEX_FILE_NAME};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Build the `index.html` content: the overall diagram first, then one link
/// per schema diagram in alphabetical order.
pub fn index_html(schemas: &[String]) -> String {
    let mut sorted: Vec<&String> = schemas.iter().collect();
    sorted.sort();
    sorted.dedup();

    let mut content = String::from(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Schema Diagrams</title>
</head>
<body>
    <h1>Overall Diagrams</h1>
    <ul><li><a href="EmbraceDiagram.html">Overall Schema Diagram</a></li></ul>
    <h1>Schema Diagrams</h1>
    <ul>
"#,
    );

    for schema in &sorted {
        content.push_str(&format!(
            "        <li><a href=\"{}\">{} Schema Diagram</a></li>\n",
            diagram_file_name(Some(schema)),
            schema
        ));
    }

    content.push_str(&format!(
        r#"    </ul>
    <p><small>Generated {}</small></p>
</body>
</html>
"#,
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    ));

    content
}

/// Write `index.html` into the output directory.
pub fn write_index(output_dir: &Path, schemas: &[String]) -> Result<()> {
    let path = output_dir.join(INDEX_FILE_NAME);
    fs::write(&path, index_html(schemas))
        .with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_sorted_alphabetically() {
        let schemas = vec!["sales".to_string(), "hr".to_string()];
        let html = index_html(&schemas);
        let hr = html.find("EmbraceDiagram_hr.html").unwrap();
        let sales = html.find("EmbraceDiagram_sales.html").unwrap();
        assert!(hr < sales);
    }

    #[test]
    fn test_overall_link_present() {
        let html = index_html(&[]);
        assert!(html.contains(r#"<a href="EmbraceDiagram.html">Overall Schema Diagram</a>"#));
    }

    #[test]
    fn test_duplicate_schemas_collapse() {
        let schemas = vec!["hr".to_string(), "hr".to_string()];
        let html = index_html(&schemas);
        assert_eq!(html.matches("EmbraceDiagram_hr.html").count(), 1);
    }

    #[test]
    fn test_write_index_creates_file() {
        let dir = tempfile::TempDir::new().unwrap();
        write_index(dir.path(), &["sales".to_string()]).unwrap();
        let content = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(content.contains("sales Schema Diagram"));
    }
}
