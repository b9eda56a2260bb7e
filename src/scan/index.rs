//! Reusable per-graph SCAN index

use crate::graph::CompressedGraph;
use crate::scan::core_order::{compute_core_order, CoreOrder};
use crate::scan::neighbor_order::{compute_neighbor_order, NeighborOrder};
use crate::scan::similarity::compute_structural_similarities;
use crate::Result;

/// Immutable per-graph index answering arbitrarily many clustering queries.
///
/// Building runs three stages in sequence, each parallel internally:
/// structural similarities over all edges, per-vertex neighbor ranking, and
/// per-density-threshold core ranking. The index holds no references to the
/// graph and never changes afterwards, so any number of queries may run
/// against it concurrently. A mutated graph requires a full rebuild.
#[derive(Debug)]
pub struct ScanIndex {
    pub(crate) num_vertices: usize,
    pub(crate) neighbor_order: NeighborOrder,
    pub(crate) core_order: CoreOrder,
}

impl ScanIndex {
    /// Build the index for a graph
    pub fn build(graph: &CompressedGraph) -> Result<Self> {
        let similarities = compute_structural_similarities(graph);
        log::debug!("Computed {} structural similarities", similarities.len());

        let neighbor_order = compute_neighbor_order(graph, &similarities)?;
        let core_order = compute_core_order(&neighbor_order);
        log::debug!(
            "Ranked core candidates for {} density thresholds",
            core_order.len()
        );

        Ok(Self {
            num_vertices: graph.node_count,
            neighbor_order,
            core_order,
        })
    }

    /// Number of vertices of the indexed graph
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }
}
