//! Sequential dispatch of transfers from every sender to the shared pool.
//!
//! The loop is an explicit two-level state machine: a sender cursor and,
//! while a sender is active, an attempt cursor. [`DispatchLoop::step`] advances
//! by exactly one transition so exhaustion and summary finalisation can be
//! observed in isolation; [`DispatchLoop::run`] drives it to completion.

use crate::config::RunConfig;
use crate::error::LoadError;
use crate::fees::FeeEstimator;
use crate::keys;
use crate::network::Network;
use crate::pacer::Pacer;
use crate::pool::AddressPool;
use crate::summary::SummaryAggregator;
use crate::transfer::TransferExecutor;
use crate::types::{Sender, SenderSummary, TransferOutcome};
use alloy::primitives::Address;
use rand::Rng;
use std::path::Path;
use tracing::{info, warn};

/// Recipients and senders, loaded before any transfer is sent.
#[derive(Debug)]
pub struct Inputs {
    pub pool: AddressPool,
    pub senders: Vec<Sender>,
}

/// Reads and shuffles the address file, then derives senders from the
/// credential source. Any error here is fatal for the run.
pub fn load_inputs<P: AsRef<Path>, R: Rng + ?Sized>(
    addresses_path: P,
    run: &RunConfig,
    rng: &mut R,
) -> Result<Inputs, LoadError> {
    let pool = AddressPool::from_file(addresses_path, rng)?;
    let credentials = keys::parse(run.credential_source.as_deref())?;
    let senders = keys::derive_senders(&credentials)?;

    info!(
        "Loaded {} recipient addresses and {} sender keys",
        pool.remaining(),
        senders.len()
    );
    Ok(Inputs { pool, senders })
}

#[derive(Debug)]
enum State {
    NextSender,
    Attempting {
        attempt: usize,
        summary: SenderSummary,
    },
    Reporting,
    Done,
}

/// Observable result of one [`DispatchLoop::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    SenderStarted {
        index: usize,
        sender: Address,
    },
    Attempted {
        attempt: usize,
        recipient: String,
        outcome: TransferOutcome,
    },
    SenderFinished(SenderSummary),
    Reporting,
    Done,
}

pub struct DispatchLoop<N> {
    network: N,
    estimator: FeeEstimator,
    executor: TransferExecutor,
    pacer: Pacer,
    pool: AddressPool,
    senders: Vec<Sender>,
    attempt_cap: usize,
    explorer_url: Option<String>,
    sender_cursor: usize,
    state: State,
    summary: SummaryAggregator,
}

impl<N: Network> DispatchLoop<N> {
    pub fn new(
        network: N,
        inputs: Inputs,
        attempt_cap: usize,
        estimator: FeeEstimator,
        executor: TransferExecutor,
        pacer: Pacer,
    ) -> Self {
        Self {
            network,
            estimator,
            executor,
            pacer,
            pool: inputs.pool,
            senders: inputs.senders,
            attempt_cap,
            explorer_url: None,
            sender_cursor: 0,
            state: State::NextSender,
            summary: SummaryAggregator::new(),
        }
    }

    /// Log accepted transfers as links under this block explorer.
    pub fn with_explorer(mut self, explorer_url: impl Into<String>) -> Self {
        self.explorer_url = Some(explorer_url.into());
        self
    }

    pub fn pool(&self) -> &AddressPool {
        &self.pool
    }

    pub async fn run(&mut self) -> &SummaryAggregator {
        while self.step().await != Step::Done {}
        &self.summary
    }

    pub async fn step(&mut self) -> Step {
        match std::mem::replace(&mut self.state, State::Done) {
            State::NextSender => self.start_sender(),
            State::Attempting { attempt, summary } => self.attempt(attempt, summary).await,
            State::Reporting => {
                self.summary.finish();
                info!(
                    "All senders processed, {} recipients used, {} left",
                    self.pool.taken(),
                    self.pool.remaining()
                );
                self.state = State::Done;
                Step::Done
            }
            State::Done => Step::Done,
        }
    }

    fn start_sender(&mut self) -> Step {
        let Some(sender) = self.senders.get(self.sender_cursor) else {
            self.state = State::Reporting;
            return Step::Reporting;
        };

        let address = sender.address();
        info!(
            "Using sender #{} ({}), {} recipients left",
            self.sender_cursor + 1,
            address,
            self.pool.remaining()
        );
        self.state = State::Attempting {
            attempt: 1,
            summary: SenderSummary::new(address),
        };
        Step::SenderStarted {
            index: self.sender_cursor,
            sender: address,
        }
    }

    async fn attempt(&mut self, attempt: usize, mut summary: SenderSummary) -> Step {
        if attempt > self.attempt_cap {
            return self.finish_sender(summary);
        }
        let Some(recipient) = self.pool.take_next() else {
            info!("No recipient addresses left");
            return self.finish_sender(summary);
        };

        let sender = &self.senders[self.sender_cursor];
        info!(
            "[{}/{}] Sending to {} from {}",
            attempt,
            self.attempt_cap,
            recipient,
            sender.address()
        );

        let outcome = match self.estimator.estimate(&self.network).await {
            Ok(fee) => {
                self.executor
                    .execute(&self.network, sender, &recipient, fee)
                    .await
            }
            Err(e) => TransferOutcome::Failure {
                reason: e.to_string(),
            },
        };

        match &outcome {
            TransferOutcome::Success { tx_hash } => match &self.explorer_url {
                Some(explorer) => info!(
                    "Sent: {} ({}/tx/{})",
                    tx_hash,
                    explorer.trim_end_matches('/'),
                    tx_hash
                ),
                None => info!("Sent: {}", tx_hash),
            },
            TransferOutcome::Failure { reason } => warn!("Failed: {}", reason),
        }
        summary.record(&outcome);

        let delay = self.pacer.next_delay();
        info!("Waiting {:.1}s...", delay.as_secs_f64());
        self.pacer.wait(delay).await;

        self.state = State::Attempting {
            attempt: attempt + 1,
            summary,
        };
        Step::Attempted {
            attempt,
            recipient,
            outcome,
        }
    }

    fn finish_sender(&mut self, summary: SenderSummary) -> Step {
        info!(
            "Sender {} done: {} sent, {} failed, {} attempted",
            summary.sender, summary.success_count, summary.failure_count, summary.attempted_count
        );
        self.summary.record(summary.clone());
        self.sender_cursor += 1;
        self.state = State::NextSender;
        Step::SenderFinished(summary)
    }
}
