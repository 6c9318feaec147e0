use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::Pocketbook;

use super::feed::{PriceFeed, Quote};

/// Default refresh cadence for simulated market data.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Cancellable background task polling a [`PriceFeed`] and applying the
/// quotes to the tracker.
///
/// Every mutation goes through the one mutex the caller already uses for
/// its own entry points, so the single-writer model holds. Dropping the
/// refresher aborts the task — no callback can fire after teardown.
pub struct MarketRefresher {
    handle: JoinHandle<()>,
}

impl MarketRefresher {
    /// Spawn the refresh loop on the current tokio runtime. The first
    /// refresh happens one full interval after start.
    pub fn start(
        tracker: Arc<Mutex<Pocketbook>>,
        feed: Arc<dyn PriceFeed>,
        every: Duration,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // tokio intervals fire immediately on the first tick
            ticker.tick().await;
            loop {
                ticker.tick().await;
                refresh_once(&tracker, feed.as_ref()).await;
            }
        });
        Self { handle }
    }

    /// Stop the background task. Idempotent.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for MarketRefresher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// One poll-and-apply cycle. The tracker lock is never held across the
/// feed await, so a slow feed cannot block mutations.
pub async fn refresh_once(tracker: &Arc<Mutex<Pocketbook>>, feed: &dyn PriceFeed) {
    let holdings: Vec<Quote> = match tracker.lock() {
        Ok(tracker) => tracker
            .investments()
            .iter()
            .map(|i| Quote {
                symbol: i.symbol.clone(),
                price: i.current_price,
            })
            .collect(),
        Err(_) => return,
    };
    if holdings.is_empty() {
        return;
    }

    match feed.latest_quotes(&holdings).await {
        Ok(quotes) => {
            if let Ok(mut tracker) = tracker.lock() {
                let touched = tracker.update_prices(&quotes);
                log::debug!("Market refresh via {} updated {touched} holdings", feed.name());
            }
        }
        Err(e) => log::warn!("Market refresh via {} failed: {e}", feed.name()),
    }
}
