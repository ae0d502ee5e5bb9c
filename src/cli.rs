// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines global engine options and all subcommands.

use berth::output::OutputMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "berth")]
#[command(about = "Inspect and manage a local Docker or Podman engine")]
#[command(version)]
pub struct Cli {
    /// Engine socket path (overrides BERTH_SOCKET, DOCKER_HOST, and config)
    #[arg(long, global = true)]
    pub socket: Option<PathBuf>,

    /// Config file (defaults to the user config dir's berth/config.yml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Deadline for each engine request, e.g. 500ms or 5s
    #[arg(long, global = true, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Serve canned sample data instead of talking to an engine
    #[arg(long, global = true)]
    pub fixture: bool,

    /// Output format
    #[arg(long, short, global = true, value_enum, default_value_t = OutputMode::Normal)]
    pub output: OutputMode,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List images
    Images,

    /// List containers, including stopped ones
    Containers {
        /// Only show running containers
        #[arg(long)]
        running: bool,
    },

    /// List networks
    Networks,

    /// Show disk usage by images, containers, volumes, and build cache
    Df,

    /// Show images, containers, networks, and disk usage together
    Overview,

    /// Check that the engine answers
    Ping,

    /// Remove an image
    Rmi {
        /// Image ID, ID prefix, or reference
        id: String,
    },

    /// Remove a container
    Rm {
        /// Container ID, ID prefix, or name
        id: String,
    },

    /// Start a container
    Start {
        /// Container ID, ID prefix, or name
        id: String,
    },

    /// Stop a container
    Stop {
        /// Container ID, ID prefix, or name
        id: String,
    },
}
