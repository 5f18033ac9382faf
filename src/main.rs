use anyhow::{Context, Result};
use chargeboard::{build_figures, config::CountMetric, export, load_registry, RegistryConfig};
use clap::{Parser, ValueEnum};
use std::{
    fs::File,
    io::{self, BufWriter},
    path::PathBuf,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Metric {
    Installations,
    ChargingPoints,
}

impl From<Metric> for CountMetric {
    fn from(m: Metric) -> Self {
        match m {
            Metric::Installations => CountMetric::Installations,
            Metric::ChargingPoints => CountMetric::ChargingPoints,
        }
    }
}

/// Build the charging-station dashboard figures as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// YAML registry config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Registry CSV, overrides the config path
    #[arg(short, long)]
    registry: Option<PathBuf>,

    /// What to count per group
    #[arg(short, long, value_enum)]
    metric: Option<Metric>,

    /// Write figures here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also export the cleaned registry as Parquet
    #[arg(long)]
    cleaned_parquet: Option<PathBuf>,
}

fn main() -> Result<()> {
    // logs go to stderr, stdout carries the JSON
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RegistryConfig::from_yaml_file(path)?,
        None => RegistryConfig::default(),
    };
    if let Some(path) = args.registry {
        config.path = path;
    }
    if let Some(metric) = args.metric {
        config.metric = metric.into();
    }
    info!(path = %config.path.display(), metric = ?config.metric, "configuration");

    let figures = build_figures(&config)
        .with_context(|| format!("building figures from {}", config.path.display()))?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            export::write_figures_json(&figures, BufWriter::new(file))?;
            info!(path = %path.display(), "wrote figures");
        }
        None => export::write_figures_json(&figures, io::stdout().lock())?,
    }

    if let Some(path) = &args.cleaned_parquet {
        let table = load_registry(&config)?;
        export::write_table_parquet(&table, path)?;
    }

    Ok(())
}
