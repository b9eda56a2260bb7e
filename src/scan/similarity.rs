//! Structural similarity computation

use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;
use rayon::prelude::*;

use crate::graph::CompressedGraph;
use crate::scan::UndirectedEdge;

/// Structural similarity of every pair of adjacent vertices, keyed by
/// canonical undirected edge. Read-only once computed.
#[derive(Debug, Default)]
pub struct StructuralSimilarities {
    scores: DashMap<UndirectedEdge, f32>,
}

impl StructuralSimilarities {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            scores: DashMap::with_capacity(capacity),
        }
    }

    fn insert(&self, edge: UndirectedEdge, similarity: f32) {
        self.scores.insert(edge, similarity);
    }

    /// Look up an edge's similarity, falling back to `default` for absent keys
    pub fn find(&self, edge: UndirectedEdge, default: f32) -> f32 {
        self.get(edge).unwrap_or(default)
    }

    /// Look up an edge's similarity
    pub fn get(&self, edge: UndirectedEdge) -> Option<f32> {
        self.scores.get(&edge).map(|entry| *entry.value())
    }

    /// Number of scored edges
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Compute structural similarities (as defined by SCAN) between each pair of
/// adjacent vertices.
///
/// The structural similarity between two vertices u and v is
///   (size of intersection of closed neighborhoods of u and v) /
///   (geometric mean of sizes of closed neighborhoods of u and of v)
/// where the closed neighborhood of a vertex x consists of all neighbors of x
/// along with x itself.
pub fn compute_structural_similarities(graph: &CompressedGraph) -> StructuralSimilarities {
    // One membership set per vertex, sized to its degree
    let adjacency_sets: Vec<HashSet<u32>> = (0..graph.node_count)
        .into_par_iter()
        .map(|vertex| graph.neighbors(vertex).iter().copied().collect())
        .collect();

    let similarities = StructuralSimilarities::with_capacity(graph.edge_count());

    (0..graph.node_count).into_par_iter().for_each(|u| {
        for &v in graph.neighbors(u) {
            // Only perform this computation once for each undirected edge
            if u as u32 >= v {
                continue;
            }

            let u_degree = graph.degree(u);
            let v_degree = graph.degree(v as usize);

            // Scan the smaller neighborhood, probing the larger one's set
            let (smaller_vertex, larger_neighbors) = if u_degree < v_degree {
                (u, &adjacency_sets[v as usize])
            } else {
                (v as usize, &adjacency_sets[u])
            };

            let shared_neighbors = AtomicU32::new(0);
            graph.neighbors(smaller_vertex).par_iter().for_each(|neighbor| {
                if larger_neighbors.contains(neighbor) {
                    shared_neighbors.fetch_add(1, Ordering::Relaxed);
                }
            });

            // The neighborhoods above are open neighborhoods -- structural
            // similarity uses closed ones, so u and v themselves are added to
            // the intersection count and to both denominator sizes
            let similarity = (shared_neighbors.load(Ordering::Relaxed) + 2) as f32
                / (((u_degree + 1) as f32).sqrt() * ((v_degree + 1) as f32).sqrt());
            similarities.insert(UndirectedEdge::new(u as u32, v), similarity);
        }
    });

    similarities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn path_graph() -> CompressedGraph {
        // 0 - 1 - 2 - 3
        let mut builder = GraphBuilder::new(4);
        builder.add_edge(0, 1);
        builder.add_edge(1, 2);
        builder.add_edge(2, 3);
        builder.build()
    }

    #[test]
    fn path_graph_similarities() {
        let similarities = compute_structural_similarities(&path_graph());
        assert_eq!(similarities.len(), 3);

        // No shared neighbors on any edge of the path
        let expected_end = 2.0 / (2.0_f32 * 3.0).sqrt();
        let expected_mid = 2.0 / 3.0;
        assert!((similarities.find(UndirectedEdge::new(0, 1), 0.0) - expected_end).abs() < 1e-6);
        assert!((similarities.find(UndirectedEdge::new(2, 3), 0.0) - expected_end).abs() < 1e-6);
        assert!((similarities.find(UndirectedEdge::new(1, 2), 0.0) - expected_mid).abs() < 1e-6);
    }

    #[test]
    fn edge_direction_does_not_matter() {
        let similarities = compute_structural_similarities(&path_graph());
        assert_eq!(
            similarities.get(UndirectedEdge::new(1, 0)),
            similarities.get(UndirectedEdge::new(0, 1)),
        );
    }

    #[test]
    fn triangle_edges_are_maximally_similar() {
        let mut builder = GraphBuilder::new(3);
        builder.add_edge(0, 1);
        builder.add_edge(1, 2);
        builder.add_edge(0, 2);
        let similarities = compute_structural_similarities(&builder.build());

        // Closed neighborhoods coincide, so every edge scores exactly 1
        for (u, v) in [(0, 1), (1, 2), (0, 2)] {
            assert_eq!(similarities.find(UndirectedEdge::new(u, v), 0.0), 1.0);
        }
    }

    #[test]
    fn absent_edges_fall_back_to_default() {
        let similarities = compute_structural_similarities(&path_graph());
        assert_eq!(similarities.get(UndirectedEdge::new(0, 3)), None);
        assert_eq!(similarities.find(UndirectedEdge::new(0, 3), -1.0), -1.0);
    }
}
