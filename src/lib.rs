pub mod automation;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use crate::automation::pacing::Pacer;
use crate::automation::{Desktop, Pointer};
use crate::cli::Cli;
use crate::config::AppConfig;
use crate::engine::orchestrator;
use crate::engine::session::Session;
use crate::engine::types::{Configuration, RunReport};
use crate::errors::AutoconfResult;

/// Creates the automation session, runs every requested step and tears the
/// session down again.
pub fn run_session<D: Desktop, P: Pointer>(
    desktop: &D,
    pointer: P,
    pacer: &dyn Pacer,
    config: &AppConfig,
    app_path: &Path,
    conf: &Configuration,
) -> AutoconfResult<RunReport> {
    let mut session = Session::create(desktop, pointer, pacer, config, app_path)?;
    let result = orchestrator::run(&mut session, conf);
    let recoveries = session.teardown();
    let mut report = result?;
    report.recoveries = recoveries;
    Ok(report)
}

pub async fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load .env file if present (ignore error if not found)
    let _ = dotenvy::dotenv();

    let (app_path, conf) = Cli::parse().into_configuration();

    let config = match config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "failed to load config");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        app = %app_path.display(),
        cards = conf.number_of_cards,
        hbcc = conf.configure_hbcc,
        wattman = ?conf.wattman,
        "starting Radeon Settings configuration"
    );

    let joined = tokio::task::spawn_blocking(move || {
        automation::uia::run_automation(&config, &app_path, &conf)
    })
    .await;

    match joined {
        Ok(Ok(report)) => {
            tracing::info!(
                hbcc_cards = report.hbcc.len(),
                wattman_cards = report.wattman.len(),
                recoveries = report.recoveries,
                "configuration finished"
            );
            ExitCode::SUCCESS
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "configuration aborted");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "automation thread panicked");
            ExitCode::FAILURE
        }
    }
}
