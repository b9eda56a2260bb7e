//! Memory-efficient graph representation

use std::mem;
use serde::{Serialize, Deserialize};

/// Compressed sparse representation of a simple undirected graph.
///
/// Each undirected edge is stored twice, once in the adjacency list of each
/// endpoint, so `neighbors(v).len()` is the degree of `v`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressedGraph {
    /// Number of vertices in the graph
    pub node_count: usize,

    /// Offset array: index where each vertex's neighbor list begins
    /// offsets[v] to offsets[v+1] defines the neighbor range for vertex v
    pub offsets: Vec<u32>,

    /// Neighbor array: concatenated sorted adjacency lists
    pub edges: Vec<u32>,
}

impl CompressedGraph {
    /// Get the neighbors of a vertex
    pub fn neighbors(&self, vertex: usize) -> &[u32] {
        let start = self.offsets[vertex] as usize;
        let end = self.offsets[vertex + 1] as usize;
        &self.edges[start..end]
    }

    /// Check if there's an edge between u and v
    pub fn has_edge(&self, u: usize, v: u32) -> bool {
        self.neighbors(u).binary_search(&v).is_ok()
    }

    /// Get the degree of a vertex
    pub fn degree(&self, vertex: usize) -> usize {
        let start = self.offsets[vertex] as usize;
        let end = self.offsets[vertex + 1] as usize;
        end - start
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// Largest degree over all vertices, 0 for the empty graph
    pub fn max_degree(&self) -> usize {
        (0..self.node_count).map(|v| self.degree(v)).max().unwrap_or(0)
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = self.offsets.capacity() * mem::size_of::<u32>();
        let edges = self.edges.capacity() * mem::size_of::<u32>();

        base + offsets + edges
    }
}
