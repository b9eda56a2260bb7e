//! Clustering queries against a built index

use std::collections::{HashMap, HashSet};

use dashmap::DashMap;
use rayon::prelude::*;

use crate::graph::{components, CompressedGraph};
use crate::scan::index::ScanIndex;
use crate::scan::{search, Cluster, Clustering};
use crate::{Error, Result};

impl ScanIndex {
    /// Cluster the indexed graph under similarity threshold `epsilon` and
    /// density threshold `mu`.
    ///
    /// A vertex is a core iff at least `mu - 1` of its neighbors reach
    /// similarity `epsilon` with it. Cores whose qualifying neighborhoods
    /// touch belong to the same cluster; a non-core adjacent (with sufficient
    /// similarity) to exactly one cluster joins it, one adjacent to several
    /// becomes a hub, and the rest are outliers.
    ///
    /// Pure function of the index and the two parameters: repeated calls
    /// return equal clusterings.
    pub fn cluster(&self, epsilon: f32, mu: usize) -> Result<Clustering> {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(Error::InvalidArgument(format!(
                "epsilon must be within [0, 1], got {epsilon}"
            )));
        }
        if mu <= 1 {
            // Every vertex would trivially be a core with threshold 1
            return Err(Error::UnsupportedParameter(format!(
                "clustering with mu <= 1 is not implemented, got {mu}"
            )));
        }

        if mu >= self.core_order.len() {
            // No vertex has enough neighbors to be a core
            return Ok(self.all_outliers());
        }

        // Longest prefix of ranked candidates whose threshold still reaches epsilon
        let candidates = &self.core_order[mu];
        let cores_end = search::prefix_length(candidates, |ct| ct.threshold >= epsilon);
        let cores = &candidates[..cores_end];
        if cores.is_empty() {
            return Ok(self.all_outliers());
        }
        log::debug!("Query (epsilon={epsilon}, mu={mu}) selected {} cores", cores.len());

        let core_set: HashSet<u32> = cores.iter().map(|ct| ct.vertex).collect();

        // Directed (core, neighbor) pairs with similarity at least epsilon.
        // A pair between two cores appears once per direction; a pair reaching
        // a non-core appears exactly once.
        let core_incident_pairs: Vec<(u32, u32)> = cores
            .par_iter()
            .flat_map_iter(|ct| {
                let neighbors = &self.neighbor_order[ct.vertex as usize];
                let eps_end = search::prefix_length(neighbors, |ns| ns.similarity >= epsilon);
                neighbors[..eps_end]
                    .iter()
                    .map(move |ns| (ct.vertex, ns.neighbor))
            })
            .collect();

        let (core_to_core, core_to_noncore): (Vec<(u32, u32)>, Vec<(u32, u32)>) =
            core_incident_pairs
                .into_par_iter()
                .partition(|&(_, endpoint)| core_set.contains(&endpoint));

        // Contract to the core-only subgraph; its connectivity fixes the clusters
        let core_graph = core_subgraph(self.num_vertices, &core_to_core);
        let labels = components::connected_components(&core_graph);

        // Each component holding at least one core is a cluster; a core
        // without qualifying core neighbors still forms its own
        let mut members_by_label: HashMap<u32, Vec<u32>> = HashMap::new();
        for ct in cores {
            members_by_label
                .entry(labels[ct.vertex as usize])
                .or_default()
                .push(ct.vertex);
        }

        // Distinct adjacent cluster labels per reachable non-core vertex
        let adjacent_labels: DashMap<u32, HashSet<u32>> = DashMap::new();
        core_to_noncore.par_iter().for_each(|&(core, vertex)| {
            adjacent_labels
                .entry(vertex)
                .or_default()
                .insert(labels[core as usize]);
        });

        let mut hubs: Vec<u32> = Vec::new();
        for (vertex, adjacent) in adjacent_labels.into_iter() {
            if adjacent.len() >= 2 {
                // Bridges several clusters without belonging to any
                hubs.push(vertex);
            } else if let Some(&label) = adjacent.iter().next() {
                members_by_label.entry(label).or_default().push(vertex);
            }
        }

        // Canonical form: members ascending, clusters by smallest member
        let mut member_lists: Vec<Vec<u32>> = members_by_label.into_values().collect();
        for members in &mut member_lists {
            members.sort_unstable();
        }
        member_lists.sort_unstable_by_key(|members| members[0]);

        let clusters: Vec<Cluster> = member_lists
            .into_iter()
            .enumerate()
            .map(|(id, members)| Cluster {
                id: id as u32,
                size: members.len(),
                members,
            })
            .collect();

        hubs.sort_unstable();

        let mut clustered = vec![false; self.num_vertices];
        for cluster in &clusters {
            for &vertex in &cluster.members {
                clustered[vertex as usize] = true;
            }
        }
        for &vertex in &hubs {
            clustered[vertex as usize] = true;
        }
        let outliers: Vec<u32> = (0..self.num_vertices as u32)
            .filter(|&vertex| !clustered[vertex as usize])
            .collect();

        Ok(Clustering {
            clusters,
            hubs,
            outliers,
        })
    }

    /// Result for queries no vertex can satisfy
    fn all_outliers(&self) -> Clustering {
        Clustering {
            clusters: Vec::new(),
            hubs: Vec::new(),
            outliers: (0..self.num_vertices as u32).collect(),
        }
    }
}

/// Build a graph over all vertices containing only the given directed pairs.
///
/// Both directions of every core-to-core edge are present in `pairs`, so the
/// result is symmetric; vertices touching no pair stay isolated.
fn core_subgraph(node_count: usize, pairs: &[(u32, u32)]) -> CompressedGraph {
    let mut degrees = vec![0u32; node_count];
    for &(source, _) in pairs {
        degrees[source as usize] += 1;
    }

    let mut offsets = Vec::with_capacity(node_count + 1);
    offsets.push(0);

    let mut offset = 0;
    for &count in &degrees {
        offset += count;
        offsets.push(offset);
    }

    // Fill each source's slice using a per-vertex write cursor
    let mut edges = vec![0u32; pairs.len()];
    let mut cursor = vec![0u32; node_count];
    for &(source, target) in pairs {
        let position = offsets[source as usize] + cursor[source as usize];
        edges[position as usize] = target;
        cursor[source as usize] += 1;
    }

    CompressedGraph {
        node_count,
        offsets,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    #[test]
    fn core_subgraph_keeps_all_vertices() {
        let pairs = vec![(0u32, 2u32), (2, 0), (2, 3), (3, 2)];
        let graph = core_subgraph(5, &pairs);

        assert_eq!(graph.node_count, 5);
        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(1), 0);
        assert_eq!(graph.degree(2), 2);
        assert_eq!(graph.degree(4), 0);
        assert_eq!(graph.neighbors(0), &[2]);
    }

    #[test]
    fn rejects_out_of_range_epsilon() {
        let mut builder = GraphBuilder::new(2);
        builder.add_edge(0, 1);
        let index = ScanIndex::build(&builder.build()).expect("index builds");

        assert!(matches!(
            index.cluster(1.5, 2),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            index.cluster(-0.1, 2),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_trivial_core_mode() {
        let mut builder = GraphBuilder::new(2);
        builder.add_edge(0, 1);
        let index = ScanIndex::build(&builder.build()).expect("index builds");

        assert!(matches!(
            index.cluster(0.5, 0),
            Err(Error::UnsupportedParameter(_))
        ));
        assert!(matches!(
            index.cluster(0.5, 1),
            Err(Error::UnsupportedParameter(_))
        ));
    }
}
