//! Shared graph traversal abstraction.
//!
//! The dependency graph exposes its adjacency through this trait so the
//! breadth-first walks live in one place.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// Trait for graph traversal operations.
///
/// # Example
/// ```ignore
/// impl GraphTraversal for DependencyGraph {
///     type Node = String;
///
///     fn neighbors(&self, node: &String) -> Vec<String> {
///         self.uses.get(node).cloned().unwrap_or_default()
///     }
///
///     fn contains_node(&self, node: &String) -> bool {
///         self.index.contains_key(node)
///     }
/// }
///
/// let everything_below = graph.descendants(&"main_theorem".to_string());
/// ```
pub trait GraphTraversal {
    /// The type used to identify nodes in the graph.
    type Node: Clone + Eq + Hash;

    /// Returns all neighbors (outgoing edges) of a node.
    fn neighbors(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Checks if the graph contains a node.
    fn contains_node(&self, node: &Self::Node) -> bool;

    /// Multi-source BFS: every node reachable from any of the roots,
    /// roots included. Roots missing from the graph are ignored.
    ///
    /// Complexity: O(|V| + |E|) regardless of the number of roots.
    fn reachable_from<I>(&self, roots: I) -> HashSet<Self::Node>
    where
        I: IntoIterator<Item = Self::Node>,
    {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        for root in roots {
            if self.contains_node(&root) && visited.insert(root.clone()) {
                queue.push_back(root);
            }
        }

        while let Some(node) = queue.pop_front() {
            for neighbor in self.neighbors(&node) {
                if visited.insert(neighbor.clone()) {
                    queue.push_back(neighbor);
                }
            }
        }

        visited
    }

    /// Nodes reachable through at least one edge from `root`.
    ///
    /// `root` itself is only included when it lies on a cycle.
    fn descendants(&self, root: &Self::Node) -> HashSet<Self::Node> {
        if !self.contains_node(root) {
            return HashSet::new();
        }
        self.reachable_from(self.neighbors(root))
    }
}
