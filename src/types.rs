use alloy::primitives::{Address, TxHash, U256};
use alloy::signers::local::PrivateKeySigner;
use std::fmt;

/// Raw private key as it appeared in the credential source.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Signing identity derived from one credential.
#[derive(Clone, Debug)]
pub struct Sender {
    signer: PrivateKeySigner,
}

impl Sender {
    pub fn new(signer: PrivateKeySigner) -> Self {
        Self { signer }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }
}

/// Fee fields as reported by the node, before any scaling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeData {
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
    pub gas_price: Option<u128>,
}

/// Fee parameters attached to a single transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeQuote {
    Dynamic {
        max_fee_per_gas: u128,
        max_priority_fee_per_gas: u128,
    },
    Legacy {
        gas_price: u128,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub recipient: Address,
    pub amount: U256,
    pub fee: FeeQuote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    Success { tx_hash: TxHash },
    Failure { reason: String },
}

impl TransferOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TransferOutcome::Success { .. })
    }
}

/// Per-sender tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderSummary {
    pub sender: Address,
    pub success_count: usize,
    pub failure_count: usize,
    pub attempted_count: usize,
}

impl SenderSummary {
    pub fn new(sender: Address) -> Self {
        Self {
            sender,
            success_count: 0,
            failure_count: 0,
            attempted_count: 0,
        }
    }

    pub fn record(&mut self, outcome: &TransferOutcome) {
        self.attempted_count += 1;
        if outcome.is_success() {
            self.success_count += 1;
        } else {
            self.failure_count += 1;
        }
    }
}
