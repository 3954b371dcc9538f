//! Read-only queries over linked declarations.
//!
//! Lookups are by name. When several records share a name, the last one in
//! corpus order shadows the others, matching how the name index is built.
//!
//! # Performance Characteristics
//!
//! - Build: O(|D|) over the declaration slice
//! - Transitive uses: O(|V| + |E|) BFS via `GraphTraversal`
//! - Cycles: O(|V| + |E|) Tarjan SCC on a `DiGraphMap`

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::common::GraphTraversal;
use crate::declaration::{Declaration, Role};

/// Summary numbers for a linked graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    /// Distinct declaration names.
    pub nodes: usize,
    /// Distinct `uses` edges between distinct names.
    pub edges: usize,
    /// Strongly connected groups of more than one name.
    pub cycles: usize,
    /// Supporting declarations nothing uses.
    pub orphans: usize,
}

// ============================================================================
// Core Dependency Graph
// ============================================================================

/// Name-indexed view over a linked declaration slice.
#[derive(Debug)]
pub struct DependencyGraph<'a> {
    decls: &'a [Declaration],
    /// name -> index of the last record with that name
    index: HashMap<&'a str, usize>,
}

impl<'a> DependencyGraph<'a> {
    pub fn new(decls: &'a [Declaration]) -> Self {
        let index = decls
            .iter()
            .enumerate()
            .map(|(i, d)| (d.name.as_str(), i))
            .collect();
        Self { decls, index }
    }

    /// The declaration a name resolves to.
    pub fn get(&self, name: &str) -> Option<&'a Declaration> {
        self.index.get(name).map(|&i| &self.decls[i])
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Direct dependencies of `name`, empty for unknown names.
    pub fn uses(&self, name: &str) -> &'a [String] {
        self.get(name).map(|d| d.uses.as_slice()).unwrap_or_default()
    }

    /// Direct dependents of `name`, empty for unknown names.
    pub fn used_by(&self, name: &str) -> &'a [String] {
        self.get(name).map(|d| d.used_by.as_slice()).unwrap_or_default()
    }

    /// Every name `name` depends on, directly or not, sorted.
    pub fn transitive_uses(&self, name: &str) -> Vec<&'a str> {
        let Some(d) = self.get(name) else {
            return Vec::new();
        };
        let mut all: Vec<&'a str> = self.descendants(&d.name.as_str()).into_iter().collect();
        all.sort_unstable();
        all
    }

    /// Petgraph view: one node per distinct name, one edge per `uses` entry.
    pub fn to_digraph(&self) -> DiGraphMap<&'a str, ()> {
        let mut g = DiGraphMap::new();

        // Nodes in corpus order so traversal order is stable.
        for d in self.resolved() {
            g.add_node(d.name.as_str());
        }
        for d in self.resolved() {
            for used in &d.uses {
                if self.index.contains_key(used.as_str()) {
                    g.add_edge(d.name.as_str(), used.as_str(), ());
                }
            }
        }
        g
    }

    /// Mutually dependent groups of names, each sorted, sorted by first name.
    pub fn cycles(&self) -> Vec<Vec<&'a str>> {
        let g = self.to_digraph();
        let mut groups: Vec<Vec<&'a str>> = tarjan_scc(&g)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|mut scc| {
                scc.sort_unstable();
                scc
            })
            .collect();
        groups.sort();
        groups
    }

    /// Supporting declarations with no dependents, in corpus order.
    pub fn orphans(&self) -> Vec<&'a Declaration> {
        self.resolved()
            .filter(|d| d.role == Role::Supporting && d.used_by.is_empty())
            .collect()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.len(),
            edges: self.to_digraph().edge_count(),
            cycles: self.cycles().len(),
            orphans: self.orphans().len(),
        }
    }

    /// Graphviz rendering: primary results filled, edges point to dependencies.
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph Dependencies {\n");
        dot.push_str("    rankdir=LR;\n");
        dot.push_str("    node [shape=box, fontname=\"monospace\"];\n\n");

        for d in self.resolved() {
            let color = if d.is_primary() { "lightblue" } else { "white" };
            dot.push_str(&format!(
                "    \"{}\" [label=\"{}\\n{}\" style=filled fillcolor={}];\n",
                d.name, d.name, d.kind, color
            ));
        }

        dot.push('\n');

        let edges: BTreeSet<(&str, &str)> = self
            .resolved()
            .flat_map(|d| d.uses.iter().map(move |u| (d.name.as_str(), u.as_str())))
            .filter(|(_, to)| self.index.contains_key(to))
            .collect();
        for (from, to) in edges {
            dot.push_str(&format!("    \"{}\" -> \"{}\";\n", from, to));
        }

        dot.push_str("}\n");
        dot
    }

    /// Records that win their name's lookup, in corpus order.
    fn resolved(&self) -> impl Iterator<Item = &'a Declaration> + '_ {
        self.decls
            .iter()
            .enumerate()
            .filter(|(i, d)| self.index.get(d.name.as_str()) == Some(i))
            .map(|(_, d)| d)
    }
}

// ============================================================================
// GraphTraversal Implementation (shared BFS logic)
// ============================================================================

impl<'a> GraphTraversal for DependencyGraph<'a> {
    type Node = &'a str;

    fn neighbors(&self, node: &&'a str) -> Vec<&'a str> {
        self.uses(node).iter().map(String::as_str).collect()
    }

    fn contains_node(&self, node: &&'a str) -> bool {
        self.index.contains_key(node)
    }
}
