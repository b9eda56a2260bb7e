//! Per-vertex neighbor ranking by structural similarity

use std::ops::Index;

use rayon::prelude::*;

use crate::graph::CompressedGraph;
use crate::scan::similarity::StructuralSimilarities;
use crate::scan::{NeighborSimilarity, UndirectedEdge};
use crate::{Error, Result};

/// An adjacency list per vertex in which each neighbor list is sorted by
/// descending structural similarity with the source vertex.
///
/// `order[v][i]` is the neighbor of `v` with the (zero-indexed) `i`-th highest
/// structural similarity with `v`. A vertex is never listed among its own
/// neighbors.
#[derive(Debug)]
pub struct NeighborOrder {
    orders: Vec<Vec<NeighborSimilarity>>,
}

impl NeighborOrder {
    /// Number of vertices
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl Index<usize> for NeighborOrder {
    type Output = [NeighborSimilarity];

    fn index(&self, vertex: usize) -> &Self::Output {
        &self.orders[vertex]
    }
}

/// Rank every vertex's neighbors by descending structural similarity.
///
/// Every adjacency edge must already be scored; an unscored edge means the
/// similarity pass was skipped or saw a different graph, and fails the build.
pub fn compute_neighbor_order(
    graph: &CompressedGraph,
    similarities: &StructuralSimilarities,
) -> Result<NeighborOrder> {
    let orders = (0..graph.node_count)
        .into_par_iter()
        .map(|vertex| {
            let mut order = graph
                .neighbors(vertex)
                .iter()
                .map(|&neighbor| {
                    let edge = UndirectedEdge::new(vertex as u32, neighbor);
                    let similarity = similarities.get(edge).ok_or_else(|| {
                        Error::InternalConsistency(format!(
                            "edge ({vertex}, {neighbor}) missing from similarity map"
                        ))
                    })?;
                    Ok(NeighborSimilarity {
                        neighbor,
                        similarity,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            // Sort by descending structural similarity
            order.sort_unstable_by(|a, b| b.similarity.total_cmp(&a.similarity));
            Ok(order)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(NeighborOrder { orders })
}
