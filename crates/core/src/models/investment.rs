use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of instrument a holding represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InvestmentType {
    Stock,
    Etf,
    Bond,
    Crypto,
    MutualFund,
    Reit,
    Commodity,
    Other,
}

impl InvestmentType {
    /// Every instrument kind the portfolio can hold. The diversification
    /// score is measured against this set.
    pub const ALL: [InvestmentType; 8] = [
        InvestmentType::Stock,
        InvestmentType::Etf,
        InvestmentType::Bond,
        InvestmentType::Crypto,
        InvestmentType::MutualFund,
        InvestmentType::Reit,
        InvestmentType::Commodity,
        InvestmentType::Other,
    ];
}

impl std::fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InvestmentType::Stock => "Stock",
            InvestmentType::Etf => "ETF",
            InvestmentType::Bond => "Bond",
            InvestmentType::Crypto => "Crypto",
            InvestmentType::MutualFund => "Mutual Fund",
            InvestmentType::Reit => "REIT",
            InvestmentType::Commodity => "Commodity",
            InvestmentType::Other => "Other",
        };
        write!(f, "{name}")
    }
}

/// A portfolio holding.
///
/// `current_price` is mutated only by market-data updates
/// (`update_prices`) or explicit edits — valuation reads never touch it.
/// All valuation figures are derived on the fly and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    /// Unique identifier
    pub id: Uuid,

    /// Ticker symbol, uppercased (e.g., "AAPL", "VTI")
    pub symbol: String,

    /// Human-readable name (e.g., "Apple Inc.")
    pub name: String,

    /// Number of shares/units held (expected positive)
    pub shares: f64,

    /// Price per share at purchase (expected positive)
    pub purchase_price: f64,

    /// Latest known price per share
    pub current_price: f64,

    /// Date of purchase
    pub purchase_date: NaiveDate,

    /// Instrument kind
    pub kind: InvestmentType,

    /// Optional free-text notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl Investment {
    /// Create a holding. The symbol is uppercased; `current_price` starts
    /// at the purchase price until the first market update.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        shares: f64,
        purchase_price: f64,
        purchase_date: NaiveDate,
        kind: InvestmentType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into().to_uppercase(),
            name: name.into(),
            shares,
            purchase_price,
            current_price: purchase_price,
            purchase_date,
            kind,
            notes: None,
        }
    }

    /// Market value of the holding at the latest known price.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.shares * self.current_price
    }

    /// What was paid for the holding.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.shares * self.purchase_price
    }

    /// Absolute gain (or loss, when negative).
    #[must_use]
    pub fn gain_loss(&self) -> f64 {
        self.total_value() - self.total_cost()
    }

    /// Percentage return relative to cost. Zero when the cost basis is
    /// zero, so a degenerate holding never divides by zero.
    #[must_use]
    pub fn gain_loss_percentage(&self) -> f64 {
        let cost = self.total_cost();
        if cost == 0.0 {
            return 0.0;
        }
        self.gain_loss() / cost * 100.0
    }
}
