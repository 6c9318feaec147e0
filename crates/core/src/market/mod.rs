//! Market data: the quote-feed boundary, a simulated feed, and the
//! periodic refresh task. The engine never fetches real market data —
//! a feed is polled on a timer and the resulting quote map is applied
//! through `update_prices`.

pub mod feed;
pub mod refresher;
pub mod simulator;
