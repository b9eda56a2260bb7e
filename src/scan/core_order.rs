//! Per-density-threshold core ranking

use std::ops::Index;

use rayon::prelude::*;

use crate::scan::neighbor_order::NeighborOrder;
use crate::scan::CoreThreshold;

/// Holds a vertex and its degree.
#[derive(Debug, Clone, Copy)]
struct VertexDegree {
    vertex: u32,
    degree: u32,
}

/// For each density parameter mu, the vertices that can be cores at that mu,
/// ranked by descending core threshold.
///
/// `order[mu]` for mu >= 2 lists every vertex of degree at least mu - 1
/// together with the maximum epsilon at which it remains a core. Slots 0 and 1
/// are left empty: with mu below 2 every vertex would trivially be a core, a
/// mode that is rejected at query time.
#[derive(Debug)]
pub struct CoreOrder {
    orders: Vec<Vec<CoreThreshold>>,
}

impl CoreOrder {
    /// Number of mu slots (max degree + 2 for a non-empty graph)
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl Index<usize> for CoreOrder {
    type Output = [CoreThreshold];

    fn index(&self, mu: usize) -> &Self::Output {
        &self.orders[mu]
    }
}

/// Rank core candidates for every mu in one coordinated pass.
///
/// A vertex is a core under (epsilon, mu) iff at least mu - 1 of its neighbors
/// reach similarity epsilon with it, so its core threshold at mu is the
/// similarity of its (mu - 1)-th best-ranked neighbor. Vertices of degree
/// below mu - 1 can never be cores at that mu and are excluded.
pub fn compute_core_order(neighbor_order: &NeighborOrder) -> CoreOrder {
    if neighbor_order.is_empty() {
        return CoreOrder { orders: Vec::new() };
    }

    let mut vertex_degrees: Vec<VertexDegree> = (0..neighbor_order.len())
        .map(|vertex| VertexDegree {
            vertex: vertex as u32,
            degree: neighbor_order[vertex].len() as u32,
        })
        .collect();
    // Sort by ascending degree
    vertex_degrees.par_sort_unstable_by_key(|vd| vd.degree);

    let max_degree = vertex_degrees[vertex_degrees.len() - 1].degree as usize;

    // degree_offsets[d] is the first index i at which vertex_degrees[i].degree >= d
    let mut degree_offsets = vec![0u32; max_degree + 1];
    for i in 1..vertex_degrees.len() {
        let degree = vertex_degrees[i].degree as usize;
        let prev_degree = vertex_degrees[i - 1].degree as usize;
        if degree != prev_degree {
            for slot in &mut degree_offsets[prev_degree + 1..=degree] {
                *slot = i as u32;
            }
        }
    }

    let orders: Vec<Vec<CoreThreshold>> = (0..max_degree + 2)
        .into_par_iter()
        .map(|mu| {
            if mu <= 1 {
                return Vec::new();
            }

            // Only vertices with high enough degree can be cores
            let eligible = &vertex_degrees[degree_offsets[mu - 1] as usize..];

            let mut thresholds: Vec<CoreThreshold> = eligible
                .iter()
                .map(|vd| CoreThreshold {
                    vertex: vd.vertex,
                    threshold: neighbor_order[vd.vertex as usize][mu - 2].similarity,
                })
                .collect();
            // Sort by descending threshold
            thresholds.sort_unstable_by(|a, b| b.threshold.total_cmp(&a.threshold));
            thresholds
        })
        .collect();

    CoreOrder { orders }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::scan::neighbor_order::compute_neighbor_order;
    use crate::scan::similarity::compute_structural_similarities;

    fn path_core_order() -> CoreOrder {
        // 0 - 1 - 2 - 3
        let mut builder = GraphBuilder::new(4);
        builder.add_edge(0, 1);
        builder.add_edge(1, 2);
        builder.add_edge(2, 3);
        let graph = builder.build();
        let similarities = compute_structural_similarities(&graph);
        let neighbor_order =
            compute_neighbor_order(&graph, &similarities).expect("similarity map is complete");
        compute_core_order(&neighbor_order)
    }

    #[test]
    fn low_mu_slots_are_empty() {
        let order = path_core_order();
        assert!(order[0].is_empty());
        assert!(order[1].is_empty());
    }

    #[test]
    fn slot_count_tracks_max_degree() {
        // max degree 2, so mu ranges up to 3
        assert_eq!(path_core_order().len(), 4);
    }

    #[test]
    fn eligibility_follows_degree() {
        let order = path_core_order();

        // Every vertex has at least one neighbor
        let mut at_two: Vec<u32> = order[2].iter().map(|ct| ct.vertex).collect();
        at_two.sort_unstable();
        assert_eq!(at_two, vec![0, 1, 2, 3]);

        // Only the interior vertices have degree two
        let mut at_three: Vec<u32> = order[3].iter().map(|ct| ct.vertex).collect();
        at_three.sort_unstable();
        assert_eq!(at_three, vec![1, 2]);
    }

    #[test]
    fn thresholds_match_ranked_neighbors() {
        let order = path_core_order();
        let end_similarity = 2.0 / (2.0_f32 * 3.0).sqrt();
        let mid_similarity = 2.0 / 3.0;

        for ct in &order[2] {
            // Best-ranked neighbor similarity: 2/sqrt(6) for every vertex
            assert!((ct.threshold - end_similarity).abs() < 1e-6);
        }
        for ct in &order[3] {
            // Second-best similarity of the interior vertices is the middle edge
            assert!((ct.threshold - mid_similarity).abs() < 1e-6);
        }
    }

    #[test]
    fn slots_are_sorted_descending() {
        let order = path_core_order();
        for mu in 0..order.len() {
            for window in order[mu].windows(2) {
                assert!(window[0].threshold >= window[1].threshold);
            }
        }
    }

    #[test]
    fn empty_neighbor_order_yields_empty_core_order() {
        let graph = GraphBuilder::new(0).build();
        let similarities = compute_structural_similarities(&graph);
        let neighbor_order =
            compute_neighbor_order(&graph, &similarities).expect("empty map suffices");
        assert!(compute_core_order(&neighbor_order).is_empty());
    }
}
