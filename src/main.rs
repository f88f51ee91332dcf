use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use clique_cluster_analyzer::config::Config;
use clique_cluster_analyzer::{analyze, data, storage};

#[derive(Parser, Debug)]
#[clap(
    name = "clique-cluster-analyzer",
    about = "Cluster maximal cliques of a pairwise compatibility graph"
)]
struct Cli {
    /// Path to the tab-separated compatibility matrix
    input: String,

    /// Optional tab-separated per-node attribute file (e.g. sequence lengths)
    attributes: Option<String>,

    /// Output directory for results
    #[clap(long, default_value = "clique_results")]
    output_dir: String,

    /// Prefix for report file names
    #[clap(long, default_value = "compatibility")]
    prefix: String,

    /// Build clusters from adjacent k-cliques
    #[clap(long, short = 'k', default_value = "4")]
    clique_size: usize,

    /// Minimum shared nodes to link two cliques (default: clique size - 1)
    #[clap(long)]
    threshold: Option<usize>,

    /// Largest/second-largest cluster ratio for the structure diagnostic
    #[clap(long, default_value = "2.0")]
    structure_ratio: f64,

    /// Abort clique search after this many search states
    #[clap(long)]
    max_states: Option<usize>,

    /// Abort clique search after this many seconds
    #[clap(long)]
    max_seconds: Option<u64>,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Search input components one after another instead of in parallel
    #[clap(long)]
    sequential: bool,

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

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = Config::new(
        args.clique_size,
        args.threshold,
        args.structure_ratio,
        args.max_states,
        args.max_seconds.map(Duration::from_secs),
        !args.sequential,
    );
    config.validate()?;

    log::info!("Starting clique cluster analysis");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    // 1. Load data
    let matrix = data::load_compatibility_matrix(&args.input)?;
    let attributes = match &args.attributes {
        Some(path) => Some(data::load_attributes(path)?),
        None => None,
    };

    // 2. Build the compatibility graph
    let graph = matrix.to_graph()?;

    // 3. Cliques, overlap graph and clusters
    let analysis = analyze(&graph, attributes.as_ref(), &config)?;

    log::info!(
        "Found {} maximal cliques in {} clusters",
        analysis.cliques.len(),
        analysis.clusters.len()
    );
    if analysis.structure.highly_structured {
        println!("Community is highly structured according to Vicsek criterion.");
    }

    // 4. Save results
    storage::save_results(
        &analysis,
        &graph,
        attributes.as_ref(),
        &args.output_dir,
        &args.prefix,
    )?;

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
