use crate::error::SubmitError;
use crate::network::Network;
use crate::types::{FeeQuote, Sender, TransferOutcome, TransferRequest};
use alloy::primitives::{Address, TxHash, U256};
use std::str::FromStr;

/// Builds and submits single fixed-amount transfers.
#[derive(Debug, Clone, Copy)]
pub struct TransferExecutor {
    amount: U256,
}

impl TransferExecutor {
    pub fn new(amount: U256) -> Self {
        Self { amount }
    }

    /// Never fails: every submission error becomes a `Failure` outcome.
    pub async fn execute<N: Network + ?Sized>(
        &self,
        network: &N,
        sender: &Sender,
        recipient: &str,
        fee: FeeQuote,
    ) -> TransferOutcome {
        match self.submit(network, sender, recipient, fee).await {
            Ok(tx_hash) => TransferOutcome::Success { tx_hash },
            Err(e) => TransferOutcome::Failure {
                reason: e.to_string(),
            },
        }
    }

    async fn submit<N: Network + ?Sized>(
        &self,
        network: &N,
        sender: &Sender,
        recipient: &str,
        fee: FeeQuote,
    ) -> Result<TxHash, SubmitError> {
        let recipient =
            Address::from_str(recipient).map_err(|e| SubmitError::InvalidRecipient {
                address: recipient.to_string(),
                reason: e.to_string(),
            })?;

        let request = TransferRequest {
            recipient,
            amount: self.amount,
            fee,
        };
        network.send_transfer(sender, &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::testing::ScriptedNetwork;
    use alloy::signers::local::PrivateKeySigner;

    const RECIPIENT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";
    const FEE: FeeQuote = FeeQuote::Legacy { gas_price: 7 };

    #[tokio::test]
    async fn accepted_submission_is_success() {
        let network = ScriptedNetwork::accepting();
        let sender = Sender::new(PrivateKeySigner::random());
        let executor = TransferExecutor::new(U256::from(1_000u64));

        let outcome = executor.execute(&network, &sender, RECIPIENT, FEE).await;

        assert_eq!(
            outcome,
            TransferOutcome::Success {
                tx_hash: TxHash::with_last_byte(1)
            }
        );
        let sent = network.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, sender.address());
        assert_eq!(sent[0].1.recipient, Address::from_str(RECIPIENT).unwrap());
        assert_eq!(sent[0].1.amount, U256::from(1_000u64));
        assert_eq!(sent[0].1.fee, FEE);
    }

    #[tokio::test]
    async fn rejection_is_failure() {
        let network = ScriptedNetwork::rejecting();
        let sender = Sender::new(PrivateKeySigner::random());

        let outcome = TransferExecutor::new(U256::from(1u64))
            .execute(&network, &sender, RECIPIENT, FEE)
            .await;

        match outcome {
            TransferOutcome::Failure { reason } => assert!(reason.contains("insufficient funds")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_recipient_never_reaches_the_node() {
        let network = ScriptedNetwork::accepting();
        let sender = Sender::new(PrivateKeySigner::random());

        let outcome = TransferExecutor::new(U256::from(1u64))
            .execute(&network, &sender, "0xA", FEE)
            .await;

        assert!(!outcome.is_success());
        assert!(network.sent().is_empty());
    }
}
