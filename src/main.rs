mod args;
mod config;
mod dispatch;
mod error;
mod fees;
mod keys;
mod network;
mod pacer;
mod pool;
mod summary;
mod transfer;
mod types;

use anyhow::{Context, Result};
use args::{Commands, parse_args};
use config::{NetworkConfig, RunConfig};
use dispatch::DispatchLoop;
use fees::FeeEstimator;
use network::RpcNetwork;
use pacer::Pacer;
use std::fs::File;
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;
use transfer::TransferExecutor;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = parse_args();

    match cli.command {
        Commands::Send {
            addresses,
            config: config_path,
            pks,
            max_tx,
        } => {
            let config = NetworkConfig::load_or_default(config_path.as_ref())
                .context("Failed to load network config")?;
            let run = RunConfig::new(pks, max_tx.as_deref());

            let inputs = dispatch::load_inputs(&addresses, &run, &mut rand::thread_rng())
                .context("Failed to load inputs")?;

            let network = RpcNetwork::new(&config)?;
            network.verify_chain().await?;
            info!(
                "Sending {} {} per transfer on {}, at most {} transfers per sender",
                config.amount, config.currency_symbol, config.chain_name, run.attempt_cap
            );

            let mut dispatch = DispatchLoop::new(
                network,
                inputs,
                run.attempt_cap,
                FeeEstimator::new(config.fee_multiplier),
                TransferExecutor::new(config.amount_wei()?),
                Pacer::new(config.delay_range_ms()),
            )
            .with_explorer(config.explorer_url.clone());

            let summary = dispatch.run().await;
            println!("\n{}", summary.render());
            info!("Finished sending all transfers");
        }

        Commands::GenerateConfig { output } => {
            let mut file = File::create(&output)
                .context(format!("Failed to create config file at {:?}", output))?;
            file.write_all(NetworkConfig::sample_yaml()?.as_bytes())?;

            info!("Sample configuration file generated at {:?}", output);
        }
    }

    Ok(())
}
