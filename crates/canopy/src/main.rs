use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::Table;
use tracing::info;
use tracing_subscriber::EnvFilter;

use canopy_core::{config, pipeline, Endpoint, Outcome, Settings};
use canopy_loader::formats::schema::REQUIRED_COLUMNS;
use canopy_loader::load_dataset;

#[derive(Parser, Debug)]
#[command(author, version, about = "Deforestation dataset upload client", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = "canopy.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a dataset file and send it to the configured server
    Send(SendArgs),
    /// Load a dataset file and print a preview without sending it
    Inspect(InspectArgs),
    /// Show or update the persisted server configuration
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
struct SendArgs {
    /// Dataset file (.xlsx, .xls, .csv, or .txt)
    file: PathBuf,
    /// Override the configured server host for this attempt
    #[arg(long)]
    host: Option<String>,
    /// Override the configured server port for this attempt
    #[arg(long)]
    port: Option<i64>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Dataset file (.xlsx, .xls, .csv, or .txt)
    file: PathBuf,
    /// Maximum number of rows to preview
    #[arg(long, default_value_t = 10)]
    limit: usize,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Validate and persist new server settings
    Set(ConfigSetArgs),
}

#[derive(Args, Debug)]
struct ConfigSetArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<i64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Send(args) => handle_send(&cli.config, args),
        Command::Inspect(args) => handle_inspect(args),
        Command::Config(args) => match args.action {
            ConfigAction::Show => handle_config_show(&cli.config),
            ConfigAction::Set(set) => handle_config_set(&cli.config, set),
        },
    }
}

fn handle_send(config_path: &Path, args: SendArgs) -> Result<()> {
    let settings = Settings::load(config_path)?;

    let host = args.host.unwrap_or(settings.host);
    let port = match args.port {
        Some(raw) => config::validate_port(raw)?,
        None => settings.port,
    };
    let endpoint = Endpoint::new(host, port)?;

    info!(%endpoint, file = %args.file.display(), "starting upload");
    let outcome = pipeline::spawn_upload(args.file, endpoint.clone())
        .recv()
        .context("upload worker terminated unexpectedly")?;

    match outcome {
        Outcome::Delivered {
            records,
            bytes_sent,
        } => {
            println!("Delivered {records} records ({bytes_sent} bytes) to {endpoint}");
            Ok(())
        }
        Outcome::LoadFailed(err) => {
            Err(anyhow::Error::new(err).context("the dataset could not be loaded"))
        }
        Outcome::TransmitFailed(err) => {
            Err(anyhow::Error::new(err).context("the dataset could not be transmitted"))
        }
    }
}

fn handle_inspect(args: InspectArgs) -> Result<()> {
    let dataset =
        load_dataset(&args.file).context("the dataset could not be loaded")?;

    let mut table = Table::new();
    table.set_header(REQUIRED_COLUMNS);
    for record in dataset.iter().take(args.limit) {
        table.add_row([
            record.country.clone(),
            record.code.clone(),
            record.year.to_string(),
            record.forest_loss_ha.to_string(),
        ]);
    }
    println!("{table}");

    if dataset.len() > args.limit {
        println!("({} of {} records shown)", args.limit, dataset.len());
    } else {
        println!("({} records)", dataset.len());
    }
    Ok(())
}

fn handle_config_show(config_path: &Path) -> Result<()> {
    let settings = Settings::load(config_path)?;
    println!("configuration file: {}", config_path.display());
    println!("host = {}", settings.host);
    println!("port = {}", settings.port);
    Ok(())
}

fn handle_config_set(config_path: &Path, args: ConfigSetArgs) -> Result<()> {
    let mut settings = Settings::load(config_path)?;

    if let Some(host) = args.host {
        settings.host = host;
    }
    if let Some(raw) = args.port {
        settings.port = config::validate_port(raw)?;
    }
    settings.save(config_path)?;

    info!(path = %config_path.display(), "configuration saved");
    println!("Saved {} = {}:{}", config_path.display(), settings.host, settings.port);
    Ok(())
}
