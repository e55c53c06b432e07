//! Directed table-reference graph.
//!
//! Nodes are `schema.table` identifiers, edges are foreign-key references
//! from the declaring table to the referenced table. Backed by a petgraph
//! `DiGraph` with a name-to-index map; edges are deduplicated on the ordered
//! pair of endpoints, so multiple FKs between the same two tables collapse to
//! a single edge. Self-references are kept.

use ahash::{AHashMap, AHashSet};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::BTreeSet;

/// Schema prefix of a table identifier (substring before the first `.`).
pub fn schema_of(table: &str) -> &str {
    table.split('.').next().unwrap_or(table)
}

/// Directed graph of table-to-table foreign-key references.
#[derive(Debug, Default)]
pub struct RelationalGraph {
    graph: DiGraph<String, ()>,
    indices: AHashMap<String, NodeIndex>,
    edge_keys: AHashSet<(NodeIndex, NodeIndex)>,
}

impl RelationalGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table node, returning its index. Inserting the same identifier
    /// twice is a no-op.
    pub fn add_table(&mut self, table: &str) -> NodeIndex {
        if let Some(&idx) = self.indices.get(table) {
            return idx;
        }
        let idx = self.graph.add_node(table.to_string());
        self.indices.insert(table.to_string(), idx);
        idx
    }

    /// Add a directed reference edge. Missing endpoints are created
    /// implicitly, so references to tables outside the scanned tree still
    /// appear as nodes. Duplicate pairs are dropped; self-edges are allowed.
    pub fn add_reference(&mut self, from: &str, to: &str) {
        let from_idx = self.add_table(from);
        let to_idx = self.add_table(to);

        if !self.edge_keys.insert((from_idx, to_idx)) {
            return;
        }
        self.graph.add_edge(from_idx, to_idx, ());
    }

    pub fn contains_table(&self, table: &str) -> bool {
        self.indices.contains_key(table)
    }

    pub fn table_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Table identifiers in insertion order.
    pub fn tables(&self) -> Vec<&str> {
        self.graph.node_weights().map(String::as_str).collect()
    }

    /// Edges as index pairs into [`tables`](Self::tables) order, for layout.
    pub fn edge_indices(&self) -> Vec<(usize, usize)> {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
            .collect()
    }

    /// Node identifiers as an ordered set, for order-independent comparison.
    pub fn node_set(&self) -> BTreeSet<String> {
        self.graph.node_weights().cloned().collect()
    }

    /// Edges as an ordered set of `(from, to)` identifier pairs.
    pub fn edge_set(&self) -> BTreeSet<(String, String)> {
        self.graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].clone(),
                    self.graph[e.target()].clone(),
                )
            })
            .collect()
    }

    /// Distinct schema prefixes across all nodes, sorted alphabetically.
    pub fn schemas(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.graph.node_weights().map(|t| schema_of(t)).collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Copy of this graph restricted to nodes the predicate keeps. Edges
    /// survive only when both endpoints do.
    pub fn filter_tables<F>(&self, mut keep: F) -> RelationalGraph
    where
        F: FnMut(&str) -> bool,
    {
        let mut filtered = RelationalGraph::new();
        for table in self.graph.node_weights() {
            if keep(table) {
                filtered.add_table(table);
            }
        }
        for (from, to) in self.edge_set() {
            if filtered.contains_table(&from) && filtered.contains_table(&to) {
                filtered.add_reference(&from, &to);
            }
        }
        filtered
    }

    /// Induced subgraph of one schema: exactly the nodes prefixed
    /// `schema.` and the edges between them. Returns an independent copy.
    pub fn subgraph_for_schema(&self, schema: &str) -> RelationalGraph {
        self.filter_tables(|table| schema_of(table) == schema)
    }
}
