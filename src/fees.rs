use crate::error::FeeQueryError;
use crate::network::Network;
use crate::types::{FeeData, FeeQuote};

/// Turns node fee data into an inflated quote for faster inclusion.
#[derive(Debug, Clone, Copy)]
pub struct FeeEstimator {
    /// Multiplier expressed in hundredths, e.g. 150 for 1.5x.
    multiplier_pct: u128,
}

impl FeeEstimator {
    pub fn new(multiplier: f64) -> Self {
        Self {
            multiplier_pct: (multiplier * 100.0).round() as u128,
        }
    }

    pub async fn estimate<N: Network + ?Sized>(
        &self,
        network: &N,
    ) -> Result<FeeQuote, FeeQueryError> {
        let data = network.fee_data().await?;
        self.quote(&data)
    }

    pub fn quote(&self, data: &FeeData) -> Result<FeeQuote, FeeQueryError> {
        match (data.max_fee_per_gas, data.max_priority_fee_per_gas) {
            (Some(max_fee), Some(priority_fee)) => Ok(FeeQuote::Dynamic {
                max_fee_per_gas: self.scale(max_fee),
                max_priority_fee_per_gas: self.scale(priority_fee),
            }),
            _ => data
                .gas_price
                .map(|gas_price| FeeQuote::Legacy { gas_price })
                .ok_or(FeeQueryError::NoGasPrice),
        }
    }

    // Integer arithmetic keeps large wei values exact.
    fn scale(&self, value: u128) -> u128 {
        value.saturating_mul(self.multiplier_pct) / 100
    }
}

impl Default for FeeEstimator {
    fn default() -> Self {
        Self::new(1.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_dynamic_fees_by_one_and_a_half() {
        let data = FeeData {
            max_fee_per_gas: Some(100),
            max_priority_fee_per_gas: Some(10),
            gas_price: Some(7),
        };
        assert_eq!(
            FeeEstimator::default().quote(&data).unwrap(),
            FeeQuote::Dynamic {
                max_fee_per_gas: 150,
                max_priority_fee_per_gas: 15,
            }
        );
    }

    #[test]
    fn large_values_stay_exact() {
        let data = FeeData {
            max_fee_per_gas: Some(3_000_000_000_000_000_001),
            max_priority_fee_per_gas: Some(2),
            gas_price: None,
        };
        let FeeQuote::Dynamic {
            max_fee_per_gas, ..
        } = FeeEstimator::default().quote(&data).unwrap()
        else {
            panic!("expected dynamic quote");
        };
        assert_eq!(max_fee_per_gas, 4_500_000_000_000_000_001);
    }

    #[test]
    fn falls_back_to_unscaled_gas_price() {
        let data = FeeData {
            max_fee_per_gas: Some(100),
            max_priority_fee_per_gas: None,
            gas_price: Some(42),
        };
        assert_eq!(
            FeeEstimator::default().quote(&data).unwrap(),
            FeeQuote::Legacy { gas_price: 42 }
        );
    }

    #[test]
    fn missing_everything_is_an_error() {
        let err = FeeEstimator::default()
            .quote(&FeeData::default())
            .unwrap_err();
        assert!(matches!(err, FeeQueryError::NoGasPrice));
    }

    #[test]
    fn multiplier_is_rounded_to_hundredths() {
        assert_eq!(FeeEstimator::new(1.5).multiplier_pct, 150);
        assert_eq!(FeeEstimator::new(1.234).multiplier_pct, 123);
        assert_eq!(FeeEstimator::new(2.0).multiplier_pct, 200);
    }
}
