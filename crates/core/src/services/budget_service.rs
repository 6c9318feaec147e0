use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::budget::Budget;
use crate::models::expense::Expense;
use crate::models::ledger::Ledger;

/// Budget lifecycle and the spent-projection logic.
///
/// The one rule everything here serves: `spent` must always equal the sum
/// of matching expense amounts inside the budget window. The incremental
/// path (`apply_expense`) is an optimization for appends only; any edit
/// that could invalidate it goes through `recompute_all` instead.
pub struct BudgetService;

impl BudgetService {
    pub fn new() -> Self {
        Self
    }

    /// Add a budget, seeding `spent` from the full expense collection so
    /// the projection is correct even for expenses that predate the budget.
    pub fn add_budget(&self, ledger: &mut Ledger, mut budget: Budget) {
        budget.spent = Self::spent_within(&ledger.expenses, &budget);
        ledger.budgets.push(budget);
    }

    /// Replace a budget by id. An unknown id is a silent no-op. Does not
    /// recompute `spent` — manual edits to limit or category should be
    /// followed by an explicit recompute pass.
    pub fn update_budget(&self, ledger: &mut Ledger, budget: Budget) -> bool {
        match ledger.budgets.iter_mut().find(|b| b.id == budget.id) {
            Some(slot) => {
                *slot = budget;
                true
            }
            None => false,
        }
    }

    /// Remove a budget by id. An unknown id is a silent no-op.
    pub fn delete_budget(&self, ledger: &mut Ledger, id: Uuid) -> bool {
        let before = ledger.budgets.len();
        ledger.budgets.retain(|b| b.id != id);
        ledger.budgets.len() != before
    }

    /// Flip a budget's active flag. An unknown id is a silent no-op.
    pub fn toggle_active(&self, ledger: &mut Ledger, id: Uuid) -> bool {
        match ledger.budgets.iter_mut().find(|b| b.id == id) {
            Some(budget) => {
                budget.is_active = !budget.is_active;
                true
            }
            None => false,
        }
    }

    /// Roll a budget over to a fresh period starting `today`. Spent resets
    /// to zero and the budget reactivates. Expired budgets stay visible
    /// with their stale window until explicitly renewed — there is no
    /// automatic rollover.
    pub fn renew_budget(&self, ledger: &mut Ledger, id: Uuid, today: NaiveDate) -> bool {
        match ledger.budgets.iter_mut().find(|b| b.id == id) {
            Some(budget) => {
                budget.start_date = today;
                budget.end_date = budget.period.advance(today);
                budget.spent = 0.0;
                budget.is_active = true;
                true
            }
            None => false,
        }
    }

    /// The authoritative projection: recompute `spent` for every budget
    /// from scratch. Idempotent — running it twice over the same expense
    /// set yields identical results.
    pub fn recompute_all(&self, ledger: &mut Ledger) {
        let expenses = &ledger.expenses;
        for budget in &mut ledger.budgets {
            budget.spent = Self::spent_within(expenses, budget);
        }
    }

    /// Incremental path for a freshly appended expense: bump `spent` on
    /// every budget the expense falls into. Valid only for appends —
    /// edits and deletes invalidate the increment and require a full
    /// recompute.
    pub fn apply_expense(&self, budgets: &mut [Budget], expense: &Expense) {
        for budget in budgets.iter_mut() {
            if budget.category == expense.category && budget.contains(expense.date) {
                budget.spent += expense.amount;
            }
        }
    }

    /// Sum of expense amounts matching a budget's category inside its
    /// window, inclusive on both ends.
    fn spent_within(expenses: &[Expense], budget: &Budget) -> f64 {
        expenses
            .iter()
            .filter(|e| e.category == budget.category && budget.contains(e.date))
            .map(|e| e.amount)
            .sum()
    }
}

impl Default for BudgetService {
    fn default() -> Self {
        Self::new()
    }
}
