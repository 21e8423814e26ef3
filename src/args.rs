use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version = "0.1.0")]
#[command(about = "Paced native-token disbursement across multiple EVM wallets")]
#[command(
    long_about = "Sends a fixed native-token amount from each sender key to a shuffled list of \
    recipient addresses, one transaction at a time with a randomized pause between attempts, \
    and prints a per-sender summary at the end."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send transfers to every address in the recipient file
    Send {
        /// Line-delimited file of recipient addresses
        #[arg(short, long, default_value = "addresses.txt")]
        addresses: PathBuf,

        /// Optional YAML file overriding the network and transfer settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Comma-separated sender private keys
        #[arg(long, env = "PKS", hide_env_values = true)]
        pks: Option<String>,

        /// Maximum transfers per sender key (falls back to 123 when not a positive integer)
        #[arg(long, env = "MAX_TX")]
        max_tx: Option<String>,
    },

    /// Generate a sample network config file
    GenerateConfig {
        /// Path to output config file
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
