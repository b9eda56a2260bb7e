use anyhow::Result;
use clap::Parser;

use scan_cluster_analyzer::config::Config;
use scan_cluster_analyzer::scan::ScanIndex;
use scan_cluster_analyzer::{data, storage};

#[derive(Parser, Debug)]
#[clap(
    name = "scan-cluster-analyzer",
    about = "High-performance index-based structural clustering of graph data"
)]
struct Cli {
    /// Path to input edge list file
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "scan_results")]
    output_dir: String,

    /// Similarity threshold epsilon (0.0-1.0)
    #[clap(long, default_value = "0.6")]
    epsilon: f32,

    /// Density threshold mu (at least 2)
    #[clap(long, default_value = "2")]
    mu: usize,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let config = Config::new(args.epsilon, args.mu, args.threads);

    // Set number of threads
    let num_threads = if config.threads > 0 {
        config.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Starting structural graph clustering");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    // Create output directory
    std::fs::create_dir_all(&args.output_dir)?;

    // 1. Load the graph
    let graph = data::load_edge_list(&args.input)?;

    log::info!(
        "Loaded graph with {} vertices and {} edges ({:.1} MiB)",
        graph.node_count,
        graph.edge_count(),
        graph.memory_usage() as f64 / (1024.0 * 1024.0)
    );

    // 2. Build the reusable index
    let index = ScanIndex::build(&graph)?;

    log::info!("Built SCAN index over {} vertices", index.num_vertices());

    // 3. Answer the clustering query
    let clustering = index.cluster(config.epsilon, config.mu)?;

    log::info!(
        "Found {} clusters, {} hubs, {} outliers at epsilon={}, mu={}",
        clustering.clusters.len(),
        clustering.hubs.len(),
        clustering.outliers.len(),
        config.epsilon,
        config.mu
    );

    // 4. Save results
    storage::save_results(&clustering, &graph, config.epsilon, config.mu, &args.output_dir)?;

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
