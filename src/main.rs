//! pdfbench CLI

use clap::{Parser, Subcommand};
use pdfbench::{run_benchmark, BackendId, BackendRegistry, BenchConfig, Document, Result};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pdfbench")]
#[command(about = "Benchmark PDF text-extraction backends against one document page", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available backends and their granularity
    Backends,

    /// Extract one page with each selected backend and report timings
    Run {
        /// PDF document to benchmark
        file: PathBuf,

        /// 0-based page index to extract
        #[arg(short, long, default_value = "0")]
        page: usize,

        /// Backends to run (comma-separated); defaults to all
        #[arg(short, long, value_enum, value_delimiter = ',')]
        backends: Vec<BackendId>,

        /// Configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Emit results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pdfbench=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Backends => {
            for descriptor in BackendId::ALL.map(|id| id.descriptor()) {
                let granularity = match descriptor.granularity {
                    pdfbench::Granularity::PerPage => "per-page",
                    pdfbench::Granularity::WholeDocument => "whole-document",
                };
                println!("{:<18} {}", descriptor.display_name, granularity);
            }
            Ok(())
        }

        Commands::Run {
            file,
            page,
            backends,
            config,
            json,
        } => {
            let config = match config {
                Some(path) => BenchConfig::from_file(&path)?,
                None => BenchConfig::default(),
            };

            let registry = Arc::new(BackendRegistry::with_defaults(&config)?);
            let document = Document::open(&file, registry, &config)?;
            eprintln!(
                "Loaded '{}' ({} page(s)), benchmarking page {page}",
                document.name(),
                document.page_count()
            );

            let selection = if backends.is_empty() {
                BackendId::ALL.to_vec()
            } else {
                backends
            };

            let results = run_benchmark(&document, page, &selection)?;

            if json {
                let rows: Vec<_> = results.values().collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{:<18} {:>9} {:>8}  {}", "backend", "elapsed", "chars", "status");
                for (backend, result) in &results {
                    let status = if result.succeeded {
                        "ok".to_string()
                    } else {
                        result.error_detail.clone().unwrap_or_else(|| "failed".to_string())
                    };
                    println!(
                        "{:<18} {:>8.3}s {:>8}  {status}",
                        backend.as_str(),
                        result.elapsed_seconds,
                        result.text.chars().count(),
                    );
                }
            }

            Ok(())
        }
    }
}
