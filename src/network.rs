//! Access to the target chain.
//!
//! [`Network`] is the seam the dispatch loop talks through. [`RpcNetwork`]
//! is the JSON-RPC implementation; tests substitute a scripted one.

use crate::config::NetworkConfig;
use crate::error::{FeeQueryError, SubmitError};
use crate::types::{FeeData, FeeQuote, Sender, TransferRequest};
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::TxHash;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::http::reqwest::Url;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use tracing::{debug, info};

#[async_trait]
pub trait Network: Send + Sync {
    /// Current fee data as reported by the node.
    async fn fee_data(&self) -> Result<FeeData, FeeQueryError>;

    /// Signs and submits a transfer, returning once the node accepts it.
    async fn send_transfer(
        &self,
        sender: &Sender,
        request: &TransferRequest,
    ) -> Result<TxHash, SubmitError>;
}

pub struct RpcNetwork {
    url: Url,
    chain_id: u64,
}

impl RpcNetwork {
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        let url = config
            .rpc_url
            .parse::<Url>()
            .with_context(|| format!("Invalid RPC URL: {}", config.rpc_url))?;
        Ok(Self {
            url,
            chain_id: config.chain_id,
        })
    }

    /// Fails when the node is unreachable or serves a different chain.
    pub async fn verify_chain(&self) -> Result<()> {
        let provider = ProviderBuilder::new().connect_http(self.url.clone());
        let remote = provider
            .get_chain_id()
            .await
            .with_context(|| format!("Failed to reach RPC endpoint {}", self.url))?;
        if remote != self.chain_id {
            bail!(
                "RPC endpoint {} serves chain {} but {} is configured",
                self.url,
                remote,
                self.chain_id
            );
        }
        info!("Connected to chain {} via {}", remote, self.url);
        Ok(())
    }
}

#[async_trait]
impl Network for RpcNetwork {
    async fn fee_data(&self) -> Result<FeeData, FeeQueryError> {
        let provider = ProviderBuilder::new().connect_http(self.url.clone());

        let gas_price = provider
            .get_gas_price()
            .await
            .map_err(|e| FeeQueryError::Transport(e.to_string()))?;

        // Pre-London chains have no base fee; fall back to the flat price.
        let (max_fee_per_gas, max_priority_fee_per_gas) =
            match provider.estimate_eip1559_fees().await {
                Ok(estimate) => (
                    Some(estimate.max_fee_per_gas),
                    Some(estimate.max_priority_fee_per_gas),
                ),
                Err(e) => {
                    debug!("EIP-1559 fee estimate unavailable: {}", e);
                    (None, None)
                }
            };

        Ok(FeeData {
            max_fee_per_gas,
            max_priority_fee_per_gas,
            gas_price: Some(gas_price),
        })
    }

    async fn send_transfer(
        &self,
        sender: &Sender,
        request: &TransferRequest,
    ) -> Result<TxHash, SubmitError> {
        // Fresh provider per submission: nonce and gas limit come from the node.
        let wallet = EthereumWallet::from(sender.signer().clone());
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(self.url.clone());

        let mut tx = TransactionRequest::default()
            .with_from(sender.address())
            .with_to(request.recipient)
            .with_value(request.amount)
            .with_chain_id(self.chain_id);

        match request.fee {
            FeeQuote::Dynamic {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => {
                tx.set_max_fee_per_gas(max_fee_per_gas);
                tx.set_max_priority_fee_per_gas(max_priority_fee_per_gas);
            }
            FeeQuote::Legacy { gas_price } => tx.set_gas_price(gas_price),
        }

        let pending = provider
            .send_transaction(tx)
            .await
            .map_err(|e| SubmitError::Rejected(e.to_string()))?;

        Ok(*pending.tx_hash())
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use alloy::primitives::Address;
    use std::sync::Mutex;

    /// In-memory node with scripted fee data and acceptance rules.
    #[derive(Default)]
    pub struct ScriptedNetwork {
        pub fees: FeeData,
        pub fee_outage: bool,
        pub reject_all: bool,
        sent: Mutex<Vec<(Address, TransferRequest)>>,
    }

    impl ScriptedNetwork {
        pub fn accepting() -> Self {
            Self {
                fees: FeeData {
                    max_fee_per_gas: Some(100),
                    max_priority_fee_per_gas: Some(10),
                    gas_price: Some(50),
                },
                ..Default::default()
            }
        }

        pub fn rejecting() -> Self {
            Self {
                reject_all: true,
                ..Self::accepting()
            }
        }

        pub fn with_fee_outage(mut self) -> Self {
            self.fee_outage = true;
            self
        }

        pub fn sent(&self) -> Vec<(Address, TransferRequest)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Network for ScriptedNetwork {
        async fn fee_data(&self) -> Result<FeeData, FeeQueryError> {
            if self.fee_outage {
                return Err(FeeQueryError::Transport("connection refused".into()));
            }
            Ok(self.fees)
        }

        async fn send_transfer(
            &self,
            sender: &Sender,
            request: &TransferRequest,
        ) -> Result<TxHash, SubmitError> {
            if self.reject_all {
                return Err(SubmitError::Rejected("insufficient funds".into()));
            }
            let mut sent = self.sent.lock().unwrap();
            sent.push((sender.address(), request.clone()));
            Ok(TxHash::with_last_byte(sent.len() as u8))
        }
    }
}
