use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::expense::ExpenseCategory;

/// The recurring window a budget measures spending over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl BudgetPeriod {
    /// Advance a start date by exactly one period, calendar-aware: a
    /// monthly budget starting Jan 31 ends Feb 28/29, not "31 days later".
    #[must_use]
    pub fn advance(self, from: NaiveDate) -> NaiveDate {
        match self {
            BudgetPeriod::Weekly => from + Duration::weeks(1),
            BudgetPeriod::Monthly => from.checked_add_months(Months::new(1)).unwrap_or(from),
            BudgetPeriod::Quarterly => from.checked_add_months(Months::new(3)).unwrap_or(from),
            BudgetPeriod::Yearly => from.checked_add_months(Months::new(12)).unwrap_or(from),
        }
    }
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Quarterly => "quarterly",
            BudgetPeriod::Yearly => "yearly",
        };
        write!(f, "{name}")
    }
}

/// Consumption bands for a budget, from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BudgetStatus {
    /// Under 50% used
    Good,
    /// 50% to 80% used
    OnTrack,
    /// 80% to 100% used
    Warning,
    /// At or over the limit
    Exceeded,
}

/// A spending limit for one category over one date window.
///
/// `spent` is a cached projection over the expense collection — it must
/// always be recomputable from scratch and is never authoritative on its
/// own. `end_date` is always `period.advance(start_date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: Uuid,

    /// Display name ("Groceries", "Fun money")
    pub name: String,

    /// Category whose expenses count against this budget
    pub category: ExpenseCategory,

    /// Spending limit for the period (expected positive)
    pub limit: f64,

    /// Derived: sum of matching expense amounts inside the window
    pub spent: f64,

    /// Window length
    pub period: BudgetPeriod,

    /// First day of the window (inclusive)
    pub start_date: NaiveDate,

    /// Last day of the window (inclusive)
    pub end_date: NaiveDate,

    /// Inactive budgets keep their data but never alert
    pub is_active: bool,

    /// Whether threshold alerts are wanted for this budget
    pub notifications: bool,
}

impl Budget {
    /// Create a budget with `spent = 0` and the end date derived from the
    /// period. The caller is expected to recompute `spent` against the
    /// current expense collection right after.
    pub fn new(
        name: impl Into<String>,
        category: ExpenseCategory,
        limit: f64,
        period: BudgetPeriod,
        start_date: NaiveDate,
        notifications: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            limit,
            spent: 0.0,
            period,
            start_date,
            end_date: period.advance(start_date),
            is_active: true,
            notifications,
        }
    }

    /// Whether a date falls inside the budget window (inclusive both ends).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// What is left to spend, floored at zero.
    #[must_use]
    pub fn remaining(&self) -> f64 {
        (self.limit - self.spent).max(0.0)
    }

    /// Consumption as a percentage, clamped to [0, 100] for display.
    /// A zero or negative limit reports 0 — never a division by zero,
    /// never a false "exceeded".
    #[must_use]
    pub fn percentage_used(&self) -> f64 {
        if self.limit <= 0.0 {
            return 0.0;
        }
        (self.spent / self.limit * 100.0).min(100.0)
    }

    /// Status band, evaluated in descending threshold order.
    #[must_use]
    pub fn status(&self) -> BudgetStatus {
        let pct = self.percentage_used();
        if pct >= 100.0 {
            BudgetStatus::Exceeded
        } else if pct >= 80.0 {
            BudgetStatus::Warning
        } else if pct >= 50.0 {
            BudgetStatus::OnTrack
        } else {
            BudgetStatus::Good
        }
    }
}
