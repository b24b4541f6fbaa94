//! GRC-20 edit publisher.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────────┐
//!   │  schema  │──▶│ publish  │──▶│ calldata │──▶│  blockchain  │
//!   │ builder  │   │ (IPFS)   │   │  (API)   │   │ (PRIVATE_KEY)│
//!   └──────────┘   └──────────┘   └──────────┘   └──────────────┘
//!        Edit        ContentId      {to, data}     receipt status
//! ```
//!
//! Without `PRIVATE_KEY` the run ends after printing the calldata for manual
//! submission. With `--offline` only the first two stages run, against an
//! in-memory store.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde_json::json;

use grc20_publisher::blockchain::wallet::PRIVATE_KEY_ENV_VAR;
use grc20_publisher::blockchain::{BlockchainClient, TxSubmitter, Wallet};
use grc20_publisher::calldata::CalldataClient;
use grc20_publisher::config::{load_config_over, PipelineConfig};
use grc20_publisher::observability::logging::init_logging;
use grc20_publisher::pipeline::{run_offline, Pipeline};
use grc20_publisher::presets::Preset;
use grc20_publisher::publish::{IpfsPublisher, MemoryStore};

#[derive(Parser)]
#[command(name = "grc20-publisher")]
#[command(about = "Build, publish and submit GRC-20 knowledge graph edits", long_about = None)]
struct Cli {
    /// TOML config file layered over the preset's built-in settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Preset::Image)]
    preset: Preset,

    /// Build and publish to an in-memory store only
    #[arg(long)]
    offline: bool,

    /// Overrides `observability.log_level`
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; the environment may already be set.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config_over(path, &cli.preset.config()) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => cli.preset.config(),
    };

    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.observability.log_level);
    init_logging(log_level);

    tracing::info!(
        preset = ?cli.preset,
        space_id = %config.space.space_id,
        network = %config.space.network,
        offline = cli.offline,
        "grc20-publisher v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    match run(&cli, config).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => {
                println!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode result");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, config: PipelineConfig) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let preset = cli.preset;

    if cli.offline {
        let store = MemoryStore::new();
        let (cid, edit) = run_offline(&store, |builder| preset.build(builder)).await?;
        tracing::info!(cid = %cid, ops = edit.ops().len(), "Edit published to in-memory store");
        return Ok(json!({ "cid": cid, "edit": edit }));
    }

    let store = IpfsPublisher::new(&config.ipfs)?;
    let calldata = CalldataClient::new(&config.api)?;

    let wallet = match preset.skip_reason(key_in_env()) {
        None => Wallet::from_env(config.blockchain.chain_id)?,
        Some(reason) => {
            tracing::info!(preset = ?preset, reason, "Transaction will not be submitted");
            None
        }
    };

    let submitter = match wallet {
        Some(wallet) => {
            let client = BlockchainClient::new(config.blockchain.clone()).await?;
            Some(TxSubmitter::new(client, wallet, &config.blockchain))
        }
        None => None,
    };

    let pipeline = Pipeline::new(config.space, store, calldata, submitter);
    let summary = pipeline
        .run(|builder| preset.build(builder))
        .await
        .inspect_err(|e| tracing::error!(stage = e.stage(), "Pipeline stage failed"))?;

    Ok(serde_json::to_value(summary)?)
}

fn key_in_env() -> bool {
    std::env::var(PRIVATE_KEY_ENV_VAR).is_ok_and(|key| !key.trim().is_empty())
}
