//! Graph construction module

use crate::graph::CompressedGraph;

/// Builder for incrementally constructing an undirected CompressedGraph
pub struct GraphBuilder {
    /// Number of vertices
    node_count: usize,

    /// Adjacency lists for each vertex
    adjacency_lists: Vec<Vec<u32>>,
}

impl GraphBuilder {
    /// Create a new graph builder over `node_count` vertices
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            adjacency_lists: vec![Vec::new(); node_count],
        }
    }

    /// Add an undirected edge between two vertices.
    ///
    /// Self-loops are dropped so that a vertex never appears in its own
    /// neighborhood. Duplicate edges are removed in `build`. Grows the vertex
    /// range if an endpoint is out of bounds.
    pub fn add_edge(&mut self, u: u32, v: u32) {
        if u == v {
            return;
        }

        let needed = (u.max(v) as usize) + 1;
        if needed > self.node_count {
            self.adjacency_lists.resize(needed, Vec::new());
            self.node_count = needed;
        }

        self.adjacency_lists[u as usize].push(v);
        self.adjacency_lists[v as usize].push(u);
    }

    /// Build the compressed graph
    pub fn build(mut self) -> CompressedGraph {
        // Sort and deduplicate each adjacency list; sorted order enables
        // binary-search edge lookups
        for list in &mut self.adjacency_lists {
            list.sort_unstable();
            list.dedup();
        }

        // Count total directed edge slots
        let edge_count: usize = self.adjacency_lists.iter()
            .map(|list| list.len())
            .sum();

        // Create offsets array
        let mut offsets = Vec::with_capacity(self.node_count + 1);
        offsets.push(0);

        let mut offset = 0;
        for list in &self.adjacency_lists {
            offset += list.len() as u32;
            offsets.push(offset);
        }

        // Create edges array
        let mut edges = Vec::with_capacity(edge_count);
        for list in &self.adjacency_lists {
            edges.extend_from_slice(list);
        }

        CompressedGraph {
            node_count: self.node_count,
            offsets,
            edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_symmetric_adjacency() {
        let mut builder = GraphBuilder::new(3);
        builder.add_edge(0, 1);
        builder.add_edge(1, 2);
        let graph = builder.build();

        assert_eq!(graph.node_count, 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(0), &[1]);
        assert_eq!(graph.neighbors(1), &[0, 2]);
        assert_eq!(graph.neighbors(2), &[1]);
        assert!(graph.has_edge(0, 1));
        assert!(!graph.has_edge(0, 2));
    }

    #[test]
    fn drops_self_loops_and_duplicates() {
        let mut builder = GraphBuilder::new(2);
        builder.add_edge(0, 0);
        builder.add_edge(0, 1);
        builder.add_edge(1, 0);
        let graph = builder.build();

        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(1), 1);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn grows_for_out_of_range_endpoints() {
        let mut builder = GraphBuilder::new(0);
        builder.add_edge(4, 2);
        let graph = builder.build();

        assert_eq!(graph.node_count, 5);
        assert_eq!(graph.degree(3), 0);
        assert_eq!(graph.neighbors(4), &[2]);
    }
}
