use serde::{Deserialize, Serialize};

use super::alert::BudgetAlert;
use super::budget::Budget;
use super::expense::Expense;
use super::investment::Investment;

/// The in-memory state: all four record collections, one per persisted
/// collection key. This is the single source of truth while the engine is
/// running; the record store only catches up with it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    /// All spending records
    #[serde(default)]
    pub expenses: Vec<Expense>,

    /// All portfolio holdings
    #[serde(default)]
    pub investments: Vec<Investment>,

    /// All budgets, active and expired
    #[serde(default)]
    pub budgets: Vec<Budget>,

    /// Alert history, including read ones
    #[serde(default)]
    pub alerts: Vec<BudgetAlert>,
}
