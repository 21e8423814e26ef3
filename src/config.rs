use alloy::primitives::U256;
use alloy::primitives::utils::parse_ether;
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::warn;

pub const DEFAULT_ATTEMPT_CAP: usize = 123;

/// Chain endpoint and transfer parameters. Every field has a Tea Sepolia default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    pub chain_name: String,
    pub currency_symbol: String,
    pub explorer_url: String,
    /// Native amount per transfer, in ether units.
    pub amount: String,
    pub fee_multiplier: f64,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://tea-sepolia.g.alchemy.com/public".to_string(),
            chain_id: 10218,
            chain_name: "Tea Sepolia Testnet".to_string(),
            currency_symbol: "TEA".to_string(),
            explorer_url: "https://sepolia.tea.xyz".to_string(),
            amount: "0.001".to_string(),
            fee_multiplier: 1.5,
            min_delay_ms: 3000,
            max_delay_ms: 4000,
        }
    }
}

impl NetworkConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).context("Failed to open config file")?;
        let config: NetworkConfig =
            serde_yaml::from_reader(file).context("Failed to parse config file")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.fee_multiplier.is_finite() && self.fee_multiplier > 0.0,
            "fee_multiplier must be positive, got {}",
            self.fee_multiplier
        );
        ensure!(
            self.min_delay_ms <= self.max_delay_ms,
            "min_delay_ms ({}) exceeds max_delay_ms ({})",
            self.min_delay_ms,
            self.max_delay_ms
        );
        self.amount_wei()?;
        Ok(())
    }

    pub fn amount_wei(&self) -> Result<U256> {
        parse_ether(&self.amount)
            .with_context(|| format!("Invalid transfer amount: {:?}", self.amount))
    }

    pub fn delay_range_ms(&self) -> RangeInclusive<u64> {
        self.min_delay_ms..=self.max_delay_ms
    }

    pub fn sample_yaml() -> Result<String> {
        let body = serde_yaml::to_string(&Self::default())?;
        Ok(format!(
            "# Network and transfer settings for evm-disburse\n\
             # Private keys are read from the PKS environment variable, never from this file.\n{body}"
        ))
    }
}

/// Per-run settings handed to the dispatch loop.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub credential_source: Option<String>,
    pub attempt_cap: usize,
}

impl RunConfig {
    pub fn new(credential_source: Option<String>, attempt_cap: Option<&str>) -> Self {
        Self {
            credential_source,
            attempt_cap: parse_attempt_cap(attempt_cap),
        }
    }
}

/// Positive integer override, otherwise the default cap.
pub fn parse_attempt_cap(raw: Option<&str>) -> usize {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return DEFAULT_ATTEMPT_CAP;
    };
    match raw.parse::<usize>() {
        Ok(cap) if cap > 0 => cap,
        _ => {
            warn!(
                "Ignoring MAX_TX={:?}, using default of {}",
                raw, DEFAULT_ATTEMPT_CAP
            );
            DEFAULT_ATTEMPT_CAP
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn attempt_cap_falls_back_to_default() {
        assert_eq!(parse_attempt_cap(None), DEFAULT_ATTEMPT_CAP);
        assert_eq!(parse_attempt_cap(Some("")), DEFAULT_ATTEMPT_CAP);
        assert_eq!(parse_attempt_cap(Some("abc")), DEFAULT_ATTEMPT_CAP);
        assert_eq!(parse_attempt_cap(Some("0")), DEFAULT_ATTEMPT_CAP);
        assert_eq!(parse_attempt_cap(Some("-4")), DEFAULT_ATTEMPT_CAP);
        assert_eq!(parse_attempt_cap(Some(" 7 ")), 7);
    }

    #[test]
    fn defaults_match_tea_sepolia() {
        let config = NetworkConfig::default();
        assert_eq!(config.chain_id, 0x27ea);
        assert_eq!(
            config.amount_wei().unwrap(),
            U256::from(1_000_000_000_000_000u64)
        );
        assert_eq!(config.delay_range_ms(), 3000..=4000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rpc_url: \"http://localhost:8545\"\nchain_id: 31337").unwrap();

        let config = NetworkConfig::load(file.path()).unwrap();
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.chain_id, 31337);
        assert_eq!(config.fee_multiplier, 1.5);
    }

    #[test]
    fn validate_rejects_inverted_delay_range() {
        let config = NetworkConfig {
            min_delay_ms: 5000,
            max_delay_ms: 1000,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn sample_yaml_round_trips() {
        let sample = NetworkConfig::sample_yaml().unwrap();
        let parsed: NetworkConfig = serde_yaml::from_str(&sample).unwrap();
        assert_eq!(parsed.chain_id, NetworkConfig::default().chain_id);
    }
}
