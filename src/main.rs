// ABOUTME: Entry point for the berth CLI application.
// ABOUTME: Parses arguments, picks an engine, and dispatches commands.

mod cli;

use berth::config::Config;
use berth::engine::{Engine, FixtureEngine, SocketEngine};
use berth::error::Result;
use berth::model::{ContainerRecord, DiskUsageSnapshot, ImageRecord, NetworkRecord};
use berth::output::{Output, OutputMode};
use berth::types::{ContainerId, ImageId};
use clap::Parser;
use cli::{Cli, Commands};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let output = Output::new(cli.output);
    let result = run(cli, &output).await;

    if let Err(e) = result {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    let engine = connect(&cli)?;

    match cli.command {
        Commands::Images => {
            let images = engine.list_images().await?;
            output.records(&images)?;
        }
        Commands::Containers { running } => {
            let mut containers = engine.list_containers().await?;
            if running {
                containers.retain(ContainerRecord::is_running);
            }
            output.records(&containers)?;
        }
        Commands::Networks => {
            let networks = engine.list_networks().await?;
            output.records(&networks)?;
        }
        Commands::Df => {
            let df = engine.disk_usage().await?;
            output.disk_usage(&df)?;
        }
        Commands::Overview => overview(engine.as_ref(), output).await?,
        Commands::Ping => {
            engine.ping().await?;
            output.message("OK");
        }
        Commands::Rmi { id } => {
            engine.remove_image(&ImageId::new(id.as_str())).await?;
            output.success("Removed image", &id);
        }
        Commands::Rm { id } => {
            engine.remove_container(&ContainerId::new(id.as_str())).await?;
            output.success("Removed container", &id);
        }
        Commands::Start { id } => {
            engine.start_container(&ContainerId::new(id.as_str())).await?;
            output.success("Started container", &id);
        }
        Commands::Stop { id } => {
            engine.stop_container(&ContainerId::new(id.as_str())).await?;
            output.success("Stopped container", &id);
        }
    }

    Ok(())
}

/// Pick the engine: canned fixture data, or the resolved socket.
fn connect(cli: &Cli) -> Result<Box<dyn Engine>> {
    if cli.fixture {
        return Ok(Box::new(FixtureEngine::sample()));
    }

    let config = Config::discover(cli.config.as_deref())?;
    let socket = config.socket_path(cli.socket.as_deref())?;
    let timeout = config.timeout(cli.timeout);
    tracing::debug!(socket = %socket.display(), ?timeout, "connecting to engine");

    Ok(Box::new(SocketEngine::new(socket, timeout)))
}

#[derive(Serialize)]
struct Overview {
    images: Vec<ImageRecord>,
    containers: Vec<ContainerRecord>,
    networks: Vec<NetworkRecord>,
    disk_usage: DiskUsageSnapshot,
}

/// All four reads at once; the first failure aborts the rest.
async fn overview(engine: &dyn Engine, output: &Output) -> Result<()> {
    let (images, containers, networks, disk_usage) = futures::try_join!(
        engine.list_images(),
        engine.list_containers(),
        engine.list_networks(),
        engine.disk_usage(),
    )?;

    if output.mode() == OutputMode::Json {
        output.json(&Overview {
            images,
            containers,
            networks,
            disk_usage,
        })?;
        return Ok(());
    }

    output.heading("IMAGES");
    output.records(&images)?;
    output.heading("CONTAINERS");
    output.records(&containers)?;
    output.heading("NETWORKS");
    output.records(&networks)?;
    output.heading("DISK USAGE");
    output.disk_usage(&disk_usage)?;
    Ok(())
}
