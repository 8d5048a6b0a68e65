//! Hop expansion: breadth-first neighborhood growth from a filtered seed set.
//!
//! Expansion runs over the undirected adjacency induced by ALL rows, not just
//! the filtered ones. Selecting rows that touch any expanded node therefore
//! pulls in triples outside the original filter — intentional context
//! discovery around the matched entities.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::graph::{NodeIndex, UnGraph};

use crate::model::TripleRow;

/// Undirected entity-name adjacency over a row set.
pub struct NameAdjacency {
    graph: UnGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

impl NameAdjacency {
    /// Build the adjacency once per row set; expansion queries reuse it.
    pub fn new(rows: &[TripleRow]) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut index: HashMap<String, NodeIndex> = HashMap::new();

        for row in rows {
            let subject = *index
                .entry(row.subject_name.clone())
                .or_insert_with(|| graph.add_node(row.subject_name.clone()));
            let object = *index
                .entry(row.object_name.clone())
                .or_insert_with(|| graph.add_node(row.object_name.clone()));
            graph.update_edge(subject, object, ());
        }

        Self { graph, index }
    }

    /// Expand a seed set by exactly `hops` BFS levels. Hop 0 is the identity.
    ///
    /// Seed names absent from the adjacency pass through unchanged; they
    /// simply have no neighbors to contribute.
    pub fn expand(&self, seeds: &HashSet<String>, hops: usize) -> HashSet<String> {
        let mut expanded: HashSet<String> = seeds.clone();
        if hops == 0 {
            return expanded;
        }

        let mut queue: VecDeque<(NodeIndex, usize)> = seeds
            .iter()
            .filter_map(|name| self.index.get(name))
            .map(|&idx| (idx, 0))
            .collect();
        let mut visited: HashSet<NodeIndex> = queue.iter().map(|&(idx, _)| idx).collect();

        while let Some((node, depth)) = queue.pop_front() {
            if depth >= hops {
                continue;
            }
            for neighbor in self.graph.neighbors(node) {
                if visited.insert(neighbor) {
                    expanded.insert(self.graph[neighbor].clone());
                    queue.push_back((neighbor, depth + 1));
                }
            }
        }
        expanded
    }
}

/// Names of every entity appearing in the filtered rows — the expansion seeds.
pub fn seed_names(filtered_rows: &[TripleRow]) -> HashSet<String> {
    let mut seeds = HashSet::new();
    for row in filtered_rows {
        seeds.insert(row.subject_name.clone());
        seeds.insert(row.object_name.clone());
    }
    seeds
}

/// Select every row touching at least one node of the expanded set.
pub fn select_rows(all_rows: &[TripleRow], expanded: &HashSet<String>) -> Vec<TripleRow> {
    all_rows
        .iter()
        .filter(|row| expanded.contains(&row.subject_name) || expanded.contains(&row.object_name))
        .cloned()
        .collect()
}
