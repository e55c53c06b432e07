//! Self-contained HTML output with an embedded vis-network diagram.

use serde::Serialize;

/// One node in the serialized diagram.
#[derive(Debug, Serialize)]
pub struct VisNode {
    pub id: String,
    pub label: String,
    /// Hover tooltip content.
    pub title: String,
    pub color: String,
    pub shape: &'static str,
    pub x: f64,
    pub y: f64,
}

/// One directed edge in the serialized diagram.
#[derive(Debug, Serialize)]
pub struct VisEdge {
    #[serde(rename = "from")]
    pub source: String,
    #[serde(rename = "to")]
    pub target: String,
}

/// Render a complete HTML page for the given nodes and edges.
///
/// Node positions are precomputed, so browser-side physics stays off and the
/// page opens directly on the laid-out graph. vis-network still provides
/// panning, zooming, dragging, and hover tooltips.
pub fn to_html(title: &str, nodes: &[VisNode], edges: &[VisEdge]) -> String {
    let nodes_json = escape_script(&serde_json::to_string(nodes).unwrap_or_else(|_| "[]".into()));
    let edges_json = escape_script(&serde_json::to_string(edges).unwrap_or_else(|_| "[]".into()));
    let stats = format!("{} tables · {} references", nodes.len(), edges.len());

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <script src="https://unpkg.com/vis-network@9/standalone/umd/vis-network.min.js"></script>
  <style>
    * {{ box-sizing: border-box; margin: 0; padding: 0; }}
    html, body {{ height: 100%; }}

    body {{
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
      background: #ffffff;
      color: #1f2328;
    }}

    #network {{
      width: 100%;
      height: 1080px;
    }}

    .bottom-bar {{
      position: fixed;
      bottom: 0;
      left: 0;
      right: 0;
      height: 36px;
      background: #f6f8fa;
      border-top: 1px solid #d0d7de;
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 0 16px;
      font-size: 13px;
      color: #656d76;
    }}
  </style>
</head>
<body>
  <div id="network"></div>

  <div class="bottom-bar">
    <span>{title}</span>
    <span>{stats}</span>
  </div>

  <script>
    const nodes = new vis.DataSet({nodes_json});
    const edges = new vis.DataSet({edges_json});
    const container = document.getElementById('network');

    new vis.Network(container, {{ nodes, edges }}, {{
      physics: false,
      edges: {{
        arrows: 'to',
        smooth: false,
        color: {{ color: '#848484' }}
      }},
      nodes: {{
        font: {{ color: '#1f2328' }}
      }},
      interaction: {{
        hover: true,
        tooltipDelay: 120
      }}
    }});
  </script>
</body>
</html>"##,
        title = escape_html(title),
        stats = stats,
        nodes_json = nodes_json,
        edges_json = edges_json,
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Keep embedded JSON from terminating the surrounding script element.
fn escape_script(s: &str) -> String {
    s.replace("</", "<\\/")
}
