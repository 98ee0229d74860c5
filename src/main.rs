mod catalog;
mod config;
mod csv;
mod entry;
mod error;
mod extract;
mod fetch;
mod output;
mod pipeline;
mod roda;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use config::{Category, RunConfig, DEFAULT_BASE_URL};

/// Generate Registry of Open Data YAML files for the PhysioNet databases.
///
/// PhysioNet has no catalog API, so the database index and every dataset
/// page are scraped. The output is a skeleton meant for human review before
/// submission.
#[derive(Parser)]
#[command(name = "physionet_roda", version)]
struct Cli {
    /// "separate" for one file per dataset, "aggregate" for a single file
    #[arg(short, long, default_value = "separate")]
    format: String,

    /// Which access level of the database index to read
    #[arg(short = 't', long = "db-type", value_enum, default_value_t = Category::Open)]
    db_type: Category,

    /// Also write databases.csv for debugging
    #[arg(short, long)]
    csv: bool,

    /// Index of the first dataset to process
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Index one past the last dataset to process (0 = all)
    #[arg(long, default_value_t = 0)]
    end: usize,

    #[arg(short, long, env = "PHYSIONET_OUTPUT_DIR", default_value = "output")]
    output_dir: PathBuf,

    #[arg(long, env = "PHYSIONET_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        RunConfig {
            base_url: cli.base_url,
            category: cli.db_type,
            format: cli.format,
            start: cli.start,
            end: cli.end,
            output_dir: cli.output_dir,
            csv: cli.csv,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let config = RunConfig::from(Cli::parse());

    let source = fetch::HttpSource::new()?;
    let summary = pipeline::run(&config, &source).await?;

    println!(
        "Wrote {} files for {} of {} {} datasets to {}",
        summary.files.len(),
        summary.processed,
        summary.listed,
        config.category,
        config.output_dir.display()
    );
    println!("Done in {:.1}s", t0.elapsed().as_secs_f64());
    Ok(())
}
