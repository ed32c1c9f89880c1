use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use jobscout_engine::{
    Endpoints, JobList, ReqwestConnector, ReqwestGateway, StreamController, Surfaces,
};
use log::LevelFilter;
use scout_logging::{scout_info, scout_warn};

use super::cli::Cli;
use super::config::{self, AppConfig};
use super::input::{print_help, spawn_stdin_reader};
use super::ui::{TerminalAlert, TerminalRenderer, TerminalStatus};

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = config::load(&cli.config)?;
    config.apply_overrides(&cli);

    if let Err(err) = scout_logging::initialize(config.log, LevelFilter::Info, &config.log_path) {
        eprintln!("Logging disabled: {}", err);
    }
    scout_info!("Starting jobscout with config {:?}", cli.config);

    let endpoints = config.endpoints()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build the async runtime")?;
    runtime.block_on(run_session(&config, endpoints))
}

async fn run_session(config: &AppConfig, endpoints: Endpoints) -> anyhow::Result<()> {
    let list = Arc::new(JobList::new());
    let alert = Arc::new(TerminalAlert::new());
    let surfaces = Surfaces {
        alert: alert.clone(),
        renderer: Arc::new(TerminalRenderer::new(list.clone())),
        status: Arc::new(TerminalStatus::new()),
    };

    let gateway = ReqwestGateway::new(config.gateway_settings(), alert)
        .context("failed to build the request gateway")?;
    let connector = ReqwestConnector::new(config.stream_settings())
        .context("failed to build the stream connector")?;

    let controller =
        StreamController::new(endpoints, Arc::new(gateway), Arc::new(connector), surfaces);

    print_help();
    spawn_stdin_reader(controller.handle());
    controller.run().await;

    if list.is_empty() {
        scout_warn!("Session ended without any job offers");
    }
    println!("Received {} job offers this session", list.len());
    Ok(())
}
