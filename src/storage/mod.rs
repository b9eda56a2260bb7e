//! Results persistence module

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde_json::{json, to_string_pretty};

use crate::graph::CompressedGraph;
use crate::scan::Clustering;
use crate::Result;

/// Save one query's clustering to the specified directory
pub fn save_results(
    clustering: &Clustering,
    graph: &CompressedGraph,
    epsilon: f32,
    mu: usize,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving {} clusters to {}", clustering.clusters.len(), output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_summary(clustering, graph, epsilon, mu, output_dir)?;
    save_clustering(clustering, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save summary information
fn save_summary(
    clustering: &Clustering,
    graph: &CompressedGraph,
    epsilon: f32,
    mu: usize,
    output_dir: &str,
) -> Result<()> {
    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let clustered_vertices: usize = clustering.clusters.iter().map(|c| c.size).sum();

    let summary = json!({
        "graph_stats": {
            "node_count": graph.node_count,
            "edge_count": graph.edge_count(),
            "max_degree": graph.max_degree(),
            "avg_degree": if graph.node_count == 0 { 0.0 } else {
                graph.edges.len() as f64 / graph.node_count as f64
            },
        },
        "query": {
            "epsilon": epsilon,
            "mu": mu,
        },
        "clustering_stats": {
            "cluster_count": clustering.clusters.len(),
            "clustered_vertices": clustered_vertices,
            "hub_count": clustering.hubs.len(),
            "outlier_count": clustering.outliers.len(),
            "largest_cluster_size": clustering.clusters.iter().map(|c| c.size).max().unwrap_or(0),
            "smallest_cluster_size": clustering.clusters.iter().map(|c| c.size).min().unwrap_or(0),
        }
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save the full partition
fn save_clustering(clustering: &Clustering, output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("clustering.json");
    let mut file = File::create(path)?;

    file.write_all(to_string_pretty(clustering)?.as_bytes())?;

    Ok(())
}
