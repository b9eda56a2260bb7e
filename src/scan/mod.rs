//! Index-based SCAN structural clustering module

pub mod core_order;
pub mod index;
pub mod neighbor_order;
pub mod query;
pub mod search;
pub mod similarity;

use serde::{Serialize, Deserialize};

pub use index::ScanIndex;
pub use similarity::StructuralSimilarities;

/// An undirected edge, canonicalized so the smaller endpoint comes first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UndirectedEdge(pub u32, pub u32);

impl UndirectedEdge {
    pub fn new(u: u32, v: u32) -> Self {
        if u <= v {
            Self(u, v)
        } else {
            Self(v, u)
        }
    }
}

/// A neighbor of a fixed source vertex and the structural similarity of the
/// connecting edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborSimilarity {
    /// The neighboring vertex
    pub neighbor: u32,

    /// Structural similarity between the source vertex and the neighbor
    pub similarity: f32,
}

/// The largest similarity threshold at which a vertex still qualifies as a
/// core, for a fixed density parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreThreshold {
    /// The candidate core vertex
    pub vertex: u32,

    /// Maximum epsilon at which the vertex remains a core
    pub threshold: f32,
}

/// Represents one structural cluster found by a query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cluster {
    /// Unique identifier for this cluster
    pub id: u32,

    /// Members of this cluster (vertex indices, ascending)
    pub members: Vec<u32>,

    /// Size of the cluster
    pub size: usize,
}

/// Result of one clustering query.
///
/// Every vertex of the queried graph appears in exactly one place: the member
/// list of a single cluster, the hub list, or the outlier list. All lists are
/// sorted ascending and clusters are ordered by their smallest member, so two
/// equal clusterings compare equal with `==`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Clustering {
    /// Clusters: core vertices plus their attached non-core members
    pub clusters: Vec<Cluster>,

    /// Non-core vertices bridging two or more clusters
    pub hubs: Vec<u32>,

    /// Vertices belonging to no cluster
    pub outliers: Vec<u32>,
}
