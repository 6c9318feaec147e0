use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::CoreError;

use super::feed::{PriceFeed, Quote};

/// Random-walk quote generator standing in for a real market feed.
///
/// Each tick moves every price by a uniform step in `[-max_step,
/// +max_step]` relative to its previous value, floored so a quote never
/// goes to zero or below.
pub struct SimulatedFeed {
    max_step: f64,
}

impl SimulatedFeed {
    /// `max_step` is the largest per-tick relative move, e.g. `0.02`
    /// for plus/minus 2%.
    pub fn new(max_step: f64) -> Self {
        Self {
            max_step: max_step.abs(),
        }
    }
}

impl Default for SimulatedFeed {
    fn default() -> Self {
        Self::new(0.02)
    }
}

#[async_trait]
impl PriceFeed for SimulatedFeed {
    fn name(&self) -> &str {
        "SimulatedFeed"
    }

    async fn latest_quotes(&self, holdings: &[Quote]) -> Result<HashMap<String, f64>, CoreError> {
        let mut quotes = HashMap::with_capacity(holdings.len());
        for quote in holdings {
            let step = (random_unit()? * 2.0 - 1.0) * self.max_step;
            let next = (quote.price * (1.0 + step)).max(0.01);
            quotes.insert(quote.symbol.clone(), next);
        }
        Ok(quotes)
    }
}

/// Uniform sample in `[0, 1)` from OS randomness.
fn random_unit() -> Result<f64, CoreError> {
    let mut bytes = [0u8; 8];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| CoreError::Encryption(format!("Failed to draw randomness: {e}")))?;
    // take the top 53 bits so the result fits a double exactly
    Ok((u64::from_le_bytes(bytes) >> 11) as f64 / (1u64 << 53) as f64)
}
