//! cinemetrics - command-line entry point
//!
//! Resolves the root folder, loads the bootstrap configuration, and
//! dispatches to import, analysis, report and sample commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use cinemetrics::analysis::{basic_report, run_comprehensive};
use cinemetrics::catalog::Catalog;
use cinemetrics::export::{export_results, export_samples};
use cinemetrics::ingest::{import_directory, ImportOptions};
use cinemetrics::logging::init_logging;
use cinemetrics::samples::SampleSet;
use cinemetrics_common::config::{load_toml_config, resolve_root_folder, RootFolder, TomlConfig};
use cinemetrics_common::MovieIdCache;

/// Command-line arguments for cinemetrics
#[derive(Parser, Debug)]
#[command(name = "cinemetrics")]
#[command(about = "Offline movie catalog analytics over downloaded TMDB documents")]
#[command(version)]
struct Args {
    /// Root folder holding the catalog snapshot, ID cache and exports
    #[arg(short, long, global = true, env = "CINEMETRICS_ROOT")]
    root: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import movie documents from a directory into the catalog
    Import {
        /// Directory containing TMDB movie JSON documents
        #[arg(short, long)]
        source: PathBuf,

        /// Maximum number of documents loaded concurrently
        #[arg(short, long)]
        workers: Option<usize>,

        /// Process at most this many documents
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Run all catalog analyses and export them as CSV
    Analyze {
        /// Output directory (defaults to the configured analysis directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the basic catalog report
    Report,

    /// Show the built-in sample datasets
    Samples {
        #[arg(value_enum, default_value_t = SampleArg::All)]
        set: SampleArg,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Also write the sample datasets as CSV into this directory
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Print the number of cached movie IDs
    Ids,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SampleArg {
    All,
    GenreTrends,
    BudgetEfficiency,
    StudioReturns,
}

impl SampleArg {
    fn sets(self) -> Vec<SampleSet> {
        match self {
            SampleArg::All => SampleSet::ALL.to_vec(),
            SampleArg::GenreTrends => vec![SampleSet::GenreTrends],
            SampleArg::BudgetEfficiency => vec![SampleSet::BudgetEfficiency],
            SampleArg::StudioReturns => vec![SampleSet::StudioReturns],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config =
        load_toml_config(args.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    info!("Starting cinemetrics");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Import {
            source,
            workers,
            limit,
        } => {
            let root = open_root(args.root.as_deref(), &config)?;
            run_import(&root, &config, &source, workers, limit).await
        }
        Command::Analyze { out } => {
            let root = open_root(args.root.as_deref(), &config)?;
            run_analyze(&root, &config, out)
        }
        Command::Report => {
            let root = open_root(args.root.as_deref(), &config)?;
            run_report(&root, &config)
        }
        Command::Samples {
            set,
            format,
            export,
        } => show_samples(set, format, export.as_deref()),
        Command::Ids => {
            let root = open_root(args.root.as_deref(), &config)?;
            let cache = MovieIdCache::load(&root.id_cache_path());
            println!("{} cached movie IDs", cache.len());
            Ok(())
        }
    }
}

/// Resolve the root folder and create it if missing
fn open_root(cli_root: Option<&Path>, config: &TomlConfig) -> Result<RootFolder> {
    let root = RootFolder::new(resolve_root_folder(cli_root, config));
    root.ensure_directory_exists().with_context(|| {
        format!("Failed to initialize root folder {}", root.path().display())
    })?;
    info!("Root folder: {}", root.path().display());
    Ok(root)
}

async fn run_import(
    root: &RootFolder,
    config: &TomlConfig,
    source: &Path,
    workers: Option<usize>,
    limit: Option<usize>,
) -> Result<()> {
    let catalog_path = root.catalog_path();
    let mut catalog = Catalog::load(&catalog_path)
        .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;
    let mut cache = MovieIdCache::load(&root.id_cache_path());

    let options = ImportOptions {
        workers: workers.unwrap_or(config.workers),
        cast_limit: config.cast_limit,
        limit,
        show_progress: true,
    };

    let summary = import_directory(source, &mut catalog, &mut cache, &options)
        .await
        .with_context(|| format!("Failed to import from {}", source.display()))?;

    catalog
        .save(&catalog_path)
        .with_context(|| format!("Failed to save catalog {}", catalog_path.display()))?;
    if !cache.save() {
        warn!("Movie ID cache was not saved, next import will rebuild it from the catalog");
    }

    println!(
        "Imported {} movies ({} already known, {} failed); catalog now holds {} movies",
        summary.processed,
        summary.skipped,
        summary.failed,
        catalog.movie_count()
    );
    Ok(())
}

fn load_catalog(root: &RootFolder) -> Result<Catalog> {
    let path = root.catalog_path();
    let catalog =
        Catalog::load(&path).with_context(|| format!("Failed to load catalog {}", path.display()))?;
    if catalog.is_empty() {
        warn!("Catalog is empty, run `cinemetrics import` first");
    }
    Ok(catalog)
}

fn run_analyze(root: &RootFolder, config: &TomlConfig, out: Option<PathBuf>) -> Result<()> {
    let catalog = load_catalog(root)?;

    info!("Starting comprehensive analysis...");
    let results = run_comprehensive(&catalog, &config.analysis);

    let dir = out.unwrap_or_else(|| root.analysis_dir(&config.analysis_dir));
    let paths = export_results(&results, &dir)
        .with_context(|| format!("Failed to export results to {}", dir.display()))?;

    for path in &paths {
        println!("{}", path.display());
    }
    Ok(())
}

fn run_report(root: &RootFolder, config: &TomlConfig) -> Result<()> {
    let catalog = load_catalog(root)?;
    print!("{}", basic_report(&catalog, &config.analysis));
    Ok(())
}

fn show_samples(set: SampleArg, format: OutputFormat, export: Option<&Path>) -> Result<()> {
    let charts: Vec<_> = set.sets().into_iter().map(SampleSet::chart).collect();

    match format {
        OutputFormat::Text => {
            for chart in &charts {
                println!("{}", chart);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&charts).context("Failed to serialize charts")?;
            println!("{}", json);
        }
    }

    if let Some(dir) = export {
        let paths = export_samples(dir)
            .with_context(|| format!("Failed to export samples to {}", dir.display()))?;
        info!("Exported {} sample files to {}", paths.len(), dir.display());
    }
    Ok(())
}
