use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::models::analytics::{CategorySpend, ExpenseAnalytics, MonthlySpend};
use crate::models::expense::{Expense, ExpenseCategory};
use crate::models::investment::Investment;
use crate::models::ledger::Ledger;

/// Expense and investment CRUD plus the expense read-model.
///
/// Pure business logic — no I/O. Inputs are assumed validated by the
/// caller; nothing here panics on a zero or negative amount.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    // ── Expenses ────────────────────────────────────────────────────

    /// Append a new expense to the ledger.
    pub fn add_expense(&self, ledger: &mut Ledger, expense: Expense) {
        ledger.expenses.push(expense);
    }

    /// Replace an expense by id. An unknown id is a silent no-op.
    /// Returns whether a record was actually replaced.
    pub fn update_expense(&self, ledger: &mut Ledger, expense: Expense) -> bool {
        match ledger.expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(slot) => {
                *slot = expense;
                true
            }
            None => false,
        }
    }

    /// Remove an expense by id. An unknown id is a silent no-op.
    /// Returns whether a record was actually removed.
    pub fn delete_expense(&self, ledger: &mut Ledger, id: Uuid) -> bool {
        let before = ledger.expenses.len();
        ledger.expenses.retain(|e| e.id != id);
        ledger.expenses.len() != before
    }

    // ── Investments ─────────────────────────────────────────────────

    pub fn add_investment(&self, ledger: &mut Ledger, investment: Investment) {
        ledger.investments.push(investment);
    }

    /// Replace an investment by id. An unknown id is a silent no-op.
    pub fn update_investment(&self, ledger: &mut Ledger, investment: Investment) -> bool {
        match ledger.investments.iter_mut().find(|i| i.id == investment.id) {
            Some(slot) => {
                *slot = investment;
                true
            }
            None => false,
        }
    }

    /// Remove an investment by id. An unknown id is a silent no-op.
    pub fn delete_investment(&self, ledger: &mut Ledger, id: Uuid) -> bool {
        let before = ledger.investments.len();
        ledger.investments.retain(|i| i.id != id);
        ledger.investments.len() != before
    }

    /// Apply a quote map: every holding whose symbol appears in `quotes`
    /// gets its current price replaced. Symbols with no holding are
    /// ignored. Returns the number of holdings touched.
    pub fn update_prices(&self, ledger: &mut Ledger, quotes: &HashMap<String, f64>) -> usize {
        let mut touched = 0;
        for investment in &mut ledger.investments {
            if let Some(price) = quotes.get(&investment.symbol) {
                investment.current_price = *price;
                touched += 1;
            }
        }
        touched
    }

    // ── Read-model ──────────────────────────────────────────────────

    /// Aggregate the expense read-model: total, per-category breakdown,
    /// monthly trend (ascending by month), average, and top categories.
    pub fn expense_analytics(&self, expenses: &[Expense]) -> ExpenseAnalytics {
        let total_spent: f64 = expenses.iter().map(|e| e.amount).sum();
        let average = if expenses.is_empty() {
            0.0
        } else {
            total_spent / expenses.len() as f64
        };

        let mut by_category: HashMap<ExpenseCategory, f64> = HashMap::new();
        let mut by_month: HashMap<NaiveDate, f64> = HashMap::new();
        for expense in expenses {
            *by_category.entry(expense.category).or_insert(0.0) += expense.amount;
            if let Some(month) =
                NaiveDate::from_ymd_opt(expense.date.year(), expense.date.month(), 1)
            {
                *by_month.entry(month).or_insert(0.0) += expense.amount;
            }
        }

        let mut category_breakdown: Vec<CategorySpend> = by_category
            .into_iter()
            .map(|(category, amount)| CategorySpend { category, amount })
            .collect();
        category_breakdown.sort_by_key(|c| c.category);

        let mut monthly_trend: Vec<MonthlySpend> = by_month
            .into_iter()
            .map(|(month, total)| MonthlySpend { month, total })
            .collect();
        monthly_trend.sort_by_key(|m| m.month);

        let mut top_categories = category_breakdown.clone();
        top_categories.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        ExpenseAnalytics {
            total_spent,
            average,
            category_breakdown,
            monthly_trend,
            top_categories,
        }
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
