use std::path::PathBuf;

use cdm_schema_loader::ResolverConfig;
use cdm_schema_resolve::Resolver;
use cdm_schema_resolve::output::{OutputFormat, format_entity};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cdm-schema")]
#[command(about = "Extract the flattened attribute schema of a CDM entity document")]
#[command(version)]
struct Cli {
    /// Entity document to resolve (e.g. Account.cdm.json).
    entity: PathBuf,
    /// Directory holding the core attribute-group document.
    core_dir: PathBuf,
    /// Directory holding base entity documents.
    base_dir: PathBuf,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: OutputFormat,
    /// Resolver configuration YAML file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log resolution steps to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), String> {
    let config = match &cli.config {
        Some(path) => ResolverConfig::load(path).map_err(|e| e.to_string())?,
        None => ResolverConfig::default(),
    };

    let resolver = Resolver::new(cli.core_dir, cli.base_dir).with_config(config);
    let entity = resolver.resolve(&cli.entity).map_err(|e| e.to_string())?;

    let raw = format_entity(&entity, cli.format)?;
    print!("{raw}");
    if !raw.ends_with('\n') {
        println!();
    }
    Ok(())
}
