use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::expense::ExpenseCategory;
use super::investment::{Investment, InvestmentType};

/// Total spending in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category: ExpenseCategory,
    pub amount: f64,
}

/// Total spending in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySpend {
    /// First day of the month
    pub month: NaiveDate,
    pub total: f64,
}

/// Read-model over the expense collection. Plain data, recomputed on
/// demand — nothing in here is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseAnalytics {
    /// Sum of all expense amounts
    pub total_spent: f64,

    /// Mean expense amount (0 when there are no expenses)
    pub average: f64,

    /// Per-category totals, in category display order
    pub category_breakdown: Vec<CategorySpend>,

    /// Per-month totals, ascending by month
    pub monthly_trend: Vec<MonthlySpend>,

    /// Per-category totals, largest first
    pub top_categories: Vec<CategorySpend>,
}

/// Portfolio value held in one instrument kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAllocation {
    pub kind: InvestmentType,
    pub value: f64,
}

/// Read-model over the investment collection: valuation, performance,
/// and diversification. Derived from current prices; computing it never
/// mutates a holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Sum of shares × current price over all holdings
    pub total_value: f64,

    /// Sum of shares × purchase price over all holdings
    pub total_cost: f64,

    /// total_value − total_cost
    pub total_gain_loss: f64,

    /// Percentage return (0 when total_cost is 0)
    pub total_gain_loss_pct: f64,

    /// Holding with the highest percentage return, if any
    pub best_performer: Option<Investment>,

    /// Holding with the lowest percentage return, if any
    pub worst_performer: Option<Investment>,

    /// Value per instrument kind, largest first
    pub type_breakdown: Vec<TypeAllocation>,

    /// Distinct instrument kinds present / all possible kinds × 100
    pub diversification_score: f64,
}
