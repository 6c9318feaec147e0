// ═══════════════════════════════════════════════════════════════════
// Market Tests — simulated feed, refresh cycle, background refresher
// ═══════════════════════════════════════════════════════════════════

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use pocketbook_core::errors::CoreError;
use pocketbook_core::market::feed::{PriceFeed, Quote};
use pocketbook_core::market::refresher::{refresh_once, MarketRefresher, DEFAULT_REFRESH_INTERVAL};
use pocketbook_core::market::simulator::SimulatedFeed;
use pocketbook_core::models::investment::{Investment, InvestmentType};
use pocketbook_core::storage::memory::MemoryStore;
use pocketbook_core::Pocketbook;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn tracker_with_holding(symbol: &str, price: f64) -> Arc<Mutex<Pocketbook>> {
    let mut pb = Pocketbook::new(Box::new(MemoryStore::new()));
    pb.add_investment(Investment::new(
        symbol,
        symbol,
        10.0,
        price,
        date(2024, 1, 2),
        InvestmentType::Stock,
    ));
    Arc::new(Mutex::new(pb))
}

/// Feed returning the same fixed price for every symbol.
struct FixedFeed {
    price: f64,
}

#[async_trait]
impl PriceFeed for FixedFeed {
    fn name(&self) -> &str {
        "FixedFeed"
    }

    async fn latest_quotes(&self, holdings: &[Quote]) -> Result<HashMap<String, f64>, CoreError> {
        Ok(holdings
            .iter()
            .map(|q| (q.symbol.clone(), self.price))
            .collect())
    }
}

/// Feed that always fails.
struct BrokenFeed;

#[async_trait]
impl PriceFeed for BrokenFeed {
    fn name(&self) -> &str {
        "BrokenFeed"
    }

    async fn latest_quotes(&self, _: &[Quote]) -> Result<HashMap<String, f64>, CoreError> {
        Err(CoreError::Encryption("feed offline".into()))
    }
}

mod simulator {
    use super::*;

    #[tokio::test]
    async fn quotes_stay_within_the_step_bound() {
        let feed = SimulatedFeed::new(0.02);
        let holdings = vec![
            Quote { symbol: "AAPL".into(), price: 100.0 },
            Quote { symbol: "VTI".into(), price: 220.0 },
        ];

        for _ in 0..50 {
            let quotes = feed.latest_quotes(&holdings).await.unwrap();
            for holding in &holdings {
                let next = quotes[&holding.symbol];
                assert!(next >= holding.price * 0.98 - 1e-9);
                assert!(next <= holding.price * 1.02 + 1e-9);
            }
        }
    }

    #[tokio::test]
    async fn quotes_never_drop_to_zero() {
        let feed = SimulatedFeed::new(1.0); // wild swings
        let holdings = vec![Quote { symbol: "PENNY".into(), price: 0.01 }];

        for _ in 0..100 {
            let quotes = feed.latest_quotes(&holdings).await.unwrap();
            assert!(quotes["PENNY"] > 0.0);
        }
    }

    #[tokio::test]
    async fn every_holding_gets_a_quote() {
        let feed = SimulatedFeed::default();
        let holdings = vec![
            Quote { symbol: "A".into(), price: 1.0 },
            Quote { symbol: "B".into(), price: 2.0 },
            Quote { symbol: "C".into(), price: 3.0 },
        ];

        let quotes = feed.latest_quotes(&holdings).await.unwrap();
        assert_eq!(quotes.len(), 3);
    }

    #[tokio::test]
    async fn negative_step_is_treated_as_its_magnitude() {
        let feed = SimulatedFeed::new(-0.05);
        let holdings = vec![Quote { symbol: "AAPL".into(), price: 100.0 }];

        let quotes = feed.latest_quotes(&holdings).await.unwrap();
        let next = quotes["AAPL"];
        assert!((95.0 - 1e-9..=105.0 + 1e-9).contains(&next));
    }
}

mod refresh_cycle {
    use super::*;

    #[tokio::test]
    async fn refresh_once_applies_feed_quotes() {
        let tracker = tracker_with_holding("AAPL", 100.0);
        let feed = FixedFeed { price: 150.0 };

        refresh_once(&tracker, &feed).await;

        let pb = tracker.lock().unwrap();
        assert_eq!(pb.investments()[0].current_price, 150.0);
        assert_eq!(pb.portfolio_summary().total_gain_loss, 500.0);
    }

    #[tokio::test]
    async fn refresh_once_with_no_holdings_is_a_no_op() {
        let tracker = Arc::new(Mutex::new(Pocketbook::new(Box::new(MemoryStore::new()))));

        refresh_once(&tracker, &FixedFeed { price: 150.0 }).await;

        assert!(tracker.lock().unwrap().investments().is_empty());
    }

    #[tokio::test]
    async fn feed_failure_leaves_prices_untouched() {
        let tracker = tracker_with_holding("AAPL", 100.0);

        refresh_once(&tracker, &BrokenFeed).await;

        let pb = tracker.lock().unwrap();
        assert_eq!(pb.investments()[0].current_price, 100.0);
    }
}

mod refresher {
    use super::*;

    #[test]
    fn default_interval_is_thirty_seconds() {
        assert_eq!(DEFAULT_REFRESH_INTERVAL, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn background_refresher_updates_prices_until_stopped() {
        let tracker = tracker_with_holding("AAPL", 100.0);
        let feed = Arc::new(FixedFeed { price: 175.0 });

        let refresher = MarketRefresher::start(
            Arc::clone(&tracker),
            feed,
            Duration::from_millis(10),
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
        refresher.stop();

        assert_eq!(
            tracker.lock().unwrap().investments()[0].current_price,
            175.0
        );
    }

    #[tokio::test]
    async fn stopped_refresher_applies_nothing_further() {
        let tracker = tracker_with_holding("AAPL", 100.0);
        let feed = Arc::new(FixedFeed { price: 175.0 });

        let refresher = MarketRefresher::start(
            Arc::clone(&tracker),
            Arc::clone(&feed) as Arc<dyn PriceFeed>,
            Duration::from_millis(10),
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
        refresher.stop();

        // reset after the stop; no tick may overwrite it again
        {
            let mut quotes = HashMap::new();
            quotes.insert("AAPL".to_string(), 50.0);
            tracker.lock().unwrap().update_prices(&quotes);
        }
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(
            tracker.lock().unwrap().investments()[0].current_price,
            50.0
        );
    }

    #[tokio::test]
    async fn dropping_the_refresher_aborts_the_task() {
        let tracker = tracker_with_holding("AAPL", 100.0);
        {
            let _refresher = MarketRefresher::start(
                Arc::clone(&tracker),
                Arc::new(FixedFeed { price: 175.0 }),
                Duration::from_millis(10),
            );
        } // dropped before the first tick fires

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(
            tracker.lock().unwrap().investments()[0].current_price,
            100.0
        );
    }
}
