//! compdist command line
//!
//! Replays the composition-distance analyses on the built-in data.
//!
//! # Commands
//!
//! - `metrics`: the distance/divergence battery between V1 and V2
//! - `dendrogram`: hierarchical clustering of a built-in Hellinger matrix,
//!   written as an SVG figure with one panel per linkage
//! - `pairwise`: distance matrix and clustering of random composition profiles
//!
//! Exit code 1 on error.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use compdist::config::Config;
use compdist::{
    AgglomerativeClustering, Dendrogram, DistanceMatrix, DistanceSort, Figure, Linkage, Metric,
    MetricReport, Panel, datasets,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// Distance metrics and hierarchical clustering of composition profiles
#[derive(Parser)]
#[command(name = "compdist")]
#[command(version)]
#[command(about = "Distance metrics and hierarchical clustering of composition profiles")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON configuration file; flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every metric between the two built-in vectors
    Metrics(MetricsArgs),
    /// Cluster a built-in distance matrix and draw its dendrograms
    Dendrogram(DendrogramArgs),
    /// Cluster random composition profiles under a chosen metric
    Pairwise(PairwiseArgs),
}

#[derive(Args)]
struct MetricsArgs {
    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Decimal places in the text report
    #[arg(long)]
    precision: Option<usize>,

    /// Order of the Minkowski distance
    #[arg(long)]
    minkowski_p: Option<f64>,
}

#[derive(Args)]
struct DendrogramArgs {
    /// Built-in matrix: sn123, sn2 or cultivar
    #[arg(long)]
    dataset: Option<String>,

    /// Linkage method; repeat for one panel each
    #[arg(long, value_enum)]
    linkage: Vec<Linkage>,

    /// Child ordering within each merge
    #[arg(long, value_enum)]
    sort: Option<DistanceSort>,

    /// SVG output path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct PairwiseArgs {
    #[arg(long, default_value_t = 8)]
    samples: usize,

    #[arg(long, default_value_t = 12)]
    features: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = Metric::Hellinger)]
    metric: Metric,

    #[arg(long, value_enum, default_value_t = Linkage::Average)]
    linkage: Linkage,

    /// Number of flat clusters to report
    #[arg(short = 'k', long, default_value_t = 2)]
    n_clusters: usize,

    /// Also write the dendrogram as SVG
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Metrics(args) => run_metrics(&config, args),
        Commands::Dendrogram(args) => run_dendrogram(&config, args),
        Commands::Pairwise(args) => run_pairwise(&config, args),
    }
}

/// Minkowski order and printed precision, flags first.
fn resolve_metrics(config: &Config, args: &MetricsArgs) -> (f64, usize) {
    (
        args.minkowski_p.unwrap_or(config.metrics.minkowski_p),
        args.precision.unwrap_or(config.metrics.precision),
    )
}

fn run_metrics(config: &Config, args: MetricsArgs) -> Result<()> {
    let (minkowski_p, precision) = resolve_metrics(config, &args);

    let report = MetricReport::compute_with(&datasets::v1(), &datasets::v2(), minkowski_p)
        .context("failed to compute metrics between V1 and V2")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report:.precision$}");
    }
    Ok(())
}

/// Dendrogram settings after applying flags over the config file.
#[derive(Debug, PartialEq)]
struct DendrogramRun {
    dataset: String,
    linkages: Vec<Linkage>,
    sort: DistanceSort,
    output: PathBuf,
}

fn resolve_dendrogram(config: &Config, args: DendrogramArgs) -> DendrogramRun {
    let settings = &config.dendrogram;
    DendrogramRun {
        dataset: args.dataset.unwrap_or_else(|| settings.dataset.clone()),
        linkages: if args.linkage.is_empty() {
            settings.linkages.clone()
        } else {
            args.linkage
        },
        sort: args.sort.unwrap_or(settings.distance_sort),
        output: args.output.unwrap_or_else(|| settings.output.clone()),
    }
}

fn run_dendrogram(config: &Config, args: DendrogramArgs) -> Result<()> {
    let DendrogramRun {
        dataset,
        linkages,
        sort,
        output,
    } = resolve_dendrogram(config, args);

    let distances = datasets::by_name(&dataset)?;
    info!(%dataset, linkages = linkages.len(), "clustering built-in matrix");

    let mut figure = Figure::new();
    for linkage in linkages {
        let dendrogram = cluster(&distances, linkage, 2, sort)?;
        figure.push(Panel::for_linkage(
            linkage,
            config.dendrogram.y_label.clone(),
            dendrogram,
        ));
    }

    figure
        .save_svg(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("Figure written to {}", output.display());
    Ok(())
}

fn run_pairwise(config: &Config, args: PairwiseArgs) -> Result<()> {
    let profiles = datasets::random_profiles(args.samples, args.features, args.seed)
        .context("failed to generate profiles")?;
    let labels = (1..=args.samples).map(|i| format!("S{i}")).collect();
    let distances = DistanceMatrix::pairwise(labels, &profiles, args.metric)
        .with_context(|| format!("failed to compute {} matrix", args.metric))?;

    println!("{} matrix:", args.metric);
    for (label, row) in distances.labels().iter().zip(distances.as_matrix().rows()) {
        let cells: Vec<String> = row.iter().map(|d| format!("{d:.4}")).collect();
        println!("{label:>4} {}", cells.join(" "));
    }
    println!();

    let dendrogram = cluster(
        &distances,
        args.linkage,
        args.n_clusters,
        config.dendrogram.distance_sort,
    )?;

    if let Some(output) = args.output {
        Figure::new()
            .panel(Panel::for_linkage(args.linkage, args.metric.caption(), dendrogram))
            .save_svg(&output)
            .with_context(|| format!("failed to write {}", output.display()))?;
        println!("Figure written to {}", output.display());
    }
    Ok(())
}

/// Fits one linkage, prints its merge table, flat labels and text tree.
fn cluster(
    distances: &DistanceMatrix,
    linkage: Linkage,
    n_clusters: usize,
    sort: DistanceSort,
) -> Result<Dendrogram> {
    if n_clusters == 0 {
        anyhow::bail!("n_clusters must be > 0");
    }

    let mut model = AgglomerativeClustering::new(linkage).n_clusters(n_clusters);
    let labels = model
        .fit_predict(distances)
        .with_context(|| format!("{linkage} linkage failed"))?;
    let linkage_matrix = model
        .linkage_matrix
        .context("clustering produced no linkage matrix")?;

    println!("Dendrogram (Linkage = {linkage})");
    print!("{linkage_matrix}");
    if let Some(c) = linkage_matrix.cophenetic_correlation(distances)? {
        println!("Cophenetic correlation: {c:.4}");
    }
    println!("Clusters (k = {n_clusters}): {labels:?}");

    let dendrogram = Dendrogram::new(&linkage_matrix, distances.labels(), sort)?;
    println!("{}", dendrogram.to_text());
    Ok(dendrogram)
}
