use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::CoreError;

/// A symbol with its last known price. Feeds receive these as the base
/// for the next quote (a random-walk feed needs somewhere to walk from).
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
}

/// Source of current market quotes.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Human-readable feed name for logs.
    fn name(&self) -> &str;

    /// Produce fresh prices for the given holdings. Symbols absent from
    /// the returned map keep their previous price.
    async fn latest_quotes(&self, holdings: &[Quote]) -> Result<HashMap<String, f64>, CoreError>;
}
