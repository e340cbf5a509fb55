// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use vrfplane::config::consts::DEFAULT_LOG_LEVEL;
use vrfplane::config::{load_and_validate_config_with_dataplane, Provisioner};
use vrfplane::registry::DataplaneFactory;

#[derive(Parser, Debug)]
#[command(name = "vrfplane")]
#[command(about = "Drive VRF configuration through pluggable dataplane backends", long_about = None)]
struct Cli {
    /// Log filter (e.g. info, debug, vrfplane=trace); overrides the config and RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered dataplane types
    List,

    /// Run the reference VRF lifecycle twice on fresh handles
    Demo {
        /// Dataplane type to exercise
        #[arg(long, default_value = "linux")]
        dataplane: String,
    },

    /// Provision the networks from a config file
    Apply {
        /// YAML or TOML config file
        #[arg(long)]
        config: PathBuf,

        /// Use this dataplane instead of the one named in the config
        #[arg(long)]
        dataplane: Option<String>,

        /// Leave the networks in place instead of tearing them down afterwards
        #[arg(long)]
        keep: bool,
    },
}

/// Filter precedence: --log-level, then RUST_LOG, then `default_level`.
fn init_logging(cli_level: Option<&str>, default_level: &str) {
    let filter = match cli_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::List => {
            init_logging(cli.log_level.as_deref(), DEFAULT_LOG_LEVEL);
            for dataplane_type in DataplaneFactory::available_types() {
                println!("{}", dataplane_type);
            }
            Ok(())
        }
        Command::Demo { dataplane } => {
            init_logging(cli.log_level.as_deref(), DEFAULT_LOG_LEVEL);
            run_demo(&dataplane).await
        }
        Command::Apply { config, dataplane, keep } => {
            run_apply(cli.log_level.as_deref(), &config, dataplane, keep).await
        }
    }
}

async fn run_demo(dataplane_type: &str) -> Result<()> {
    for _ in 0..2 {
        let dp = DataplaneFactory::create(dataplane_type)
            .with_context(|| format!("Error creating dataplane '{}'", dataplane_type))?;
        Provisioner::new(dp.as_ref())
            .exercise()
            .await
            .with_context(|| format!("Demo scenario failed on '{}'", dataplane_type))?;
    }
    Ok(())
}

async fn run_apply(
    cli_level: Option<&str>,
    path: &Path,
    dataplane_override: Option<String>,
    keep: bool,
) -> Result<()> {
    let start_time = Instant::now();

    let config = load_and_validate_config_with_dataplane(path, dataplane_override.as_deref())
        .with_context(|| format!("Invalid config {}", path.display()))?;
    init_logging(cli_level, config.effective_log_level());

    // backend options must be in place before the registry is first used
    DataplaneFactory::init(&config.backend_options);

    let dp = DataplaneFactory::create(&config.dataplane)
        .with_context(|| format!("Error creating dataplane '{}'", config.dataplane))?;
    let provisioner = Provisioner::new(dp.as_ref());

    let report = provisioner
        .apply(&config)
        .await
        .context("Provisioning failed")?;
    tracing::info!(
        vrfs = report.vrfs,
        interfaces = report.interfaces,
        elapsed = ?start_time.elapsed(),
        "Provisioning complete"
    );

    let snapshot = dp.snapshot().await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    if !keep {
        provisioner.teardown(&config).await.context("Teardown failed")?;
    }

    Ok(())
}
