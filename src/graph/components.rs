//! Connected component labeling

use petgraph::unionfind::UnionFind;

use crate::graph::CompressedGraph;

/// Compute a component label for every vertex of an undirected graph.
///
/// Labels carry no meaning beyond equality: two vertices share a label iff
/// they are connected. Isolated vertices get singleton labels.
pub fn connected_components(graph: &CompressedGraph) -> Vec<u32> {
    let mut sets: UnionFind<u32> = UnionFind::new(graph.node_count);

    for u in 0..graph.node_count {
        for &v in graph.neighbors(u) {
            // Each undirected edge is stored in both directions; one suffices
            if (u as u32) < v {
                sets.union(u as u32, v);
            }
        }
    }

    sets.into_labeling()
}
