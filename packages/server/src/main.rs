#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the tick sightings API server.

use std::path::PathBuf;

use clap::Parser;
use tick_sightings_server::{ServerConfig, run_server};

#[derive(Parser)]
#[command(name = "tick_sightings_server", about = "Tick sightings API server")]
struct Cli {
    /// Sightings source file (`.csv`, `.tsv` or `.json`). Overrides `TICK_DATA_PATH`.
    #[arg(long)]
    data: Option<PathBuf>,
    /// Address to bind. Overrides `BIND_ADDR`.
    #[arg(long)]
    bind: Option<String>,
    /// Port to listen on. Overrides `PORT`.
    #[arg(long)]
    port: Option<u16>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let config = ServerConfig::from_env().with_overrides(cli.data, cli.bind, cli.port);

    run_server(config).await
}
