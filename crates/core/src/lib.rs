pub mod errors;
pub mod market;
pub mod models;
pub mod services;
pub mod storage;

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use errors::CoreError;
use models::{
    alert::BudgetAlert,
    analytics::{ExpenseAnalytics, PortfolioSummary},
    budget::{Budget, BudgetPeriod},
    expense::{Expense, ExpenseCategory},
    investment::Investment,
    ledger::Ledger,
};
use services::{
    alert_service::AlertService, budget_service::BudgetService, ledger_service::LedgerService,
    valuation_service::ValuationService,
};
use storage::store::{self, CollectionKey, RecordStore};

/// Main entry point for the Pocketbook core library.
///
/// Holds the in-memory ledger (the source of truth), the record store it
/// is persisted through, and the services that operate on it. All entry
/// points are synchronous; callers provide the serialization (the market
/// refresher, for example, shares one mutex with the presentation layer),
/// so the single-writer model holds without any hidden global state.
///
/// Persistence is best-effort: a failed save is logged and the engine
/// keeps operating on memory. `has_unsaved_changes` reports the pending
/// state and the next successful save (or an explicit `flush`) catches
/// the store up.
#[must_use]
pub struct Pocketbook {
    ledger: Ledger,
    store: Box<dyn RecordStore + Send>,
    ledger_service: LedgerService,
    budget_service: BudgetService,
    alert_service: AlertService,
    valuation_service: ValuationService,
    /// Set while any collection has changes the store has not accepted.
    dirty: bool,
}

impl std::fmt::Debug for Pocketbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pocketbook")
            .field("expenses", &self.ledger.expenses.len())
            .field("investments", &self.ledger.investments.len())
            .field("budgets", &self.ledger.budgets.len())
            .field("alerts", &self.ledger.alerts.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Pocketbook {
    /// Start with an empty ledger backed by `store`.
    pub fn new(store: Box<dyn RecordStore + Send>) -> Self {
        Self::build(Ledger::default(), store)
    }

    /// Load all four collections from `store`. Keys that were never
    /// saved come back as empty collections.
    pub fn open(store: Box<dyn RecordStore + Send>) -> Result<Self, CoreError> {
        let ledger = Ledger {
            expenses: store::load_collection(store.as_ref(), CollectionKey::Expenses)?,
            investments: store::load_collection(store.as_ref(), CollectionKey::Investments)?,
            budgets: store::load_collection(store.as_ref(), CollectionKey::Budgets)?,
            alerts: store::load_collection(store.as_ref(), CollectionKey::BudgetAlerts)?,
        };
        Ok(Self::build(ledger, store))
    }

    // ── Expenses ────────────────────────────────────────────────────

    /// Record a new expense. Budgets it falls into get their `spent`
    /// bumped incrementally, alerts are re-evaluated, and the affected
    /// collections are persisted.
    pub fn add_expense(&mut self, expense: Expense) -> Uuid {
        let id = expense.id;
        self.budget_service
            .apply_expense(&mut self.ledger.budgets, &expense);
        self.ledger_service.add_expense(&mut self.ledger, expense);
        self.run_alert_check();
        self.persist(&[
            CollectionKey::Expenses,
            CollectionKey::Budgets,
            CollectionKey::BudgetAlerts,
        ]);
        id
    }

    /// Replace an expense by id; unknown ids are a silent no-op. The
    /// category or date may have changed, which invalidates any
    /// incremental bookkeeping, so every budget is recomputed from
    /// scratch.
    pub fn update_expense(&mut self, expense: Expense) {
        if !self.ledger_service.update_expense(&mut self.ledger, expense) {
            return;
        }
        self.budget_service.recompute_all(&mut self.ledger);
        self.run_alert_check();
        self.persist(&[
            CollectionKey::Expenses,
            CollectionKey::Budgets,
            CollectionKey::BudgetAlerts,
        ]);
    }

    /// Delete an expense by id; unknown ids are a silent no-op. Triggers
    /// a full budget recompute so `spent` never drifts.
    pub fn delete_expense(&mut self, id: Uuid) {
        if !self.ledger_service.delete_expense(&mut self.ledger, id) {
            return;
        }
        self.budget_service.recompute_all(&mut self.ledger);
        self.run_alert_check();
        self.persist(&[
            CollectionKey::Expenses,
            CollectionKey::Budgets,
            CollectionKey::BudgetAlerts,
        ]);
    }

    #[must_use]
    pub fn expenses(&self) -> &[Expense] {
        &self.ledger.expenses
    }

    /// Expense read-model: totals, category breakdown, monthly trend.
    #[must_use]
    pub fn expense_analytics(&self) -> ExpenseAnalytics {
        self.ledger_service.expense_analytics(&self.ledger.expenses)
    }

    // ── Investments ─────────────────────────────────────────────────

    /// Add a holding. No budget side effects.
    pub fn add_investment(&mut self, investment: Investment) -> Uuid {
        let id = investment.id;
        self.ledger_service
            .add_investment(&mut self.ledger, investment);
        self.persist(&[CollectionKey::Investments]);
        id
    }

    /// Replace a holding by id; unknown ids are a silent no-op.
    pub fn update_investment(&mut self, investment: Investment) {
        if !self
            .ledger_service
            .update_investment(&mut self.ledger, investment)
        {
            return;
        }
        self.persist(&[CollectionKey::Investments]);
    }

    /// Delete a holding by id; unknown ids are a silent no-op.
    pub fn delete_investment(&mut self, id: Uuid) {
        if !self.ledger_service.delete_investment(&mut self.ledger, id) {
            return;
        }
        self.persist(&[CollectionKey::Investments]);
    }

    /// Apply a quote map from the market feed: every holding whose
    /// symbol appears gets its current price replaced. Returns the
    /// number of holdings touched.
    pub fn update_prices(&mut self, quotes: &HashMap<String, f64>) -> usize {
        let touched = self.ledger_service.update_prices(&mut self.ledger, quotes);
        if touched > 0 {
            self.persist(&[CollectionKey::Investments]);
        }
        touched
    }

    #[must_use]
    pub fn investments(&self) -> &[Investment] {
        &self.ledger.investments
    }

    /// Portfolio read-model: valuation, performance, diversification.
    /// Pure read — never mutates a price.
    #[must_use]
    pub fn portfolio_summary(&self) -> PortfolioSummary {
        self.valuation_service
            .portfolio_summary(&self.ledger.investments)
    }

    // ── Budgets ─────────────────────────────────────────────────────

    /// Create a budget. `spent` is seeded immediately from the full
    /// expense collection, so expenses that predate the budget count.
    pub fn add_budget(
        &mut self,
        name: impl Into<String>,
        category: ExpenseCategory,
        limit: f64,
        period: BudgetPeriod,
        start_date: NaiveDate,
        notifications: bool,
    ) -> Uuid {
        let budget = Budget::new(name, category, limit, period, start_date, notifications);
        let id = budget.id;
        self.budget_service.add_budget(&mut self.ledger, budget);
        self.run_alert_check();
        self.persist(&[CollectionKey::Budgets, CollectionKey::BudgetAlerts]);
        id
    }

    /// Replace a budget by id; unknown ids are a silent no-op. `spent`
    /// is not recomputed here — follow manual limit/category edits with
    /// `recompute_budgets`.
    pub fn update_budget(&mut self, budget: Budget) {
        if !self.budget_service.update_budget(&mut self.ledger, budget) {
            return;
        }
        self.persist(&[CollectionKey::Budgets]);
    }

    /// Delete a budget by id; unknown ids are a silent no-op. Alert
    /// history for the budget is kept.
    pub fn delete_budget(&mut self, id: Uuid) {
        if !self.budget_service.delete_budget(&mut self.ledger, id) {
            return;
        }
        self.persist(&[CollectionKey::Budgets]);
    }

    /// Flip a budget's active flag; unknown ids are a silent no-op.
    pub fn toggle_budget_active(&mut self, id: Uuid) {
        if !self.budget_service.toggle_active(&mut self.ledger, id) {
            return;
        }
        self.persist(&[CollectionKey::Budgets]);
    }

    /// Roll a budget over to a fresh period starting today: spent resets,
    /// the window moves, the budget reactivates, and a "renewed" alert is
    /// recorded (once per day, like every alert kind).
    pub fn renew_budget(&mut self, id: Uuid) {
        let today = Utc::now().date_naive();
        if !self.budget_service.renew_budget(&mut self.ledger, id, today) {
            return;
        }
        let (budgets, alerts) = (&self.ledger.budgets, &mut self.ledger.alerts);
        if let Some(budget) = budgets.iter().find(|b| b.id == id) {
            self.alert_service.emit_renewed(alerts, budget, today);
        }
        self.persist(&[CollectionKey::Budgets, CollectionKey::BudgetAlerts]);
    }

    /// Recompute every budget's `spent` from scratch and re-evaluate
    /// alerts. Idempotent; this is the authoritative projection.
    pub fn recompute_budgets(&mut self) {
        self.budget_service.recompute_all(&mut self.ledger);
        self.run_alert_check();
        self.persist(&[CollectionKey::Budgets, CollectionKey::BudgetAlerts]);
    }

    #[must_use]
    pub fn budgets(&self) -> &[Budget] {
        &self.ledger.budgets
    }

    // ── Alerts ──────────────────────────────────────────────────────

    /// Evaluate threshold alerts for every budget against `today`,
    /// persisting anything new. Returns the number of alerts created.
    /// Normally invoked internally after mutations; exposed for callers
    /// that drive the day rollover themselves.
    pub fn check_alerts(&mut self, today: NaiveDate) -> usize {
        let created =
            self.alert_service
                .check_alerts(&self.ledger.budgets, &mut self.ledger.alerts, today);
        if created > 0 {
            self.persist(&[CollectionKey::BudgetAlerts]);
        }
        created
    }

    /// All alerts, newest first.
    #[must_use]
    pub fn alerts(&self) -> Vec<&BudgetAlert> {
        let mut alerts: Vec<&BudgetAlert> = self.ledger.alerts.iter().collect();
        alerts.sort_by(|a, b| b.date.cmp(&a.date));
        alerts
    }

    /// Mark an alert read; unknown ids are a silent no-op.
    pub fn mark_alert_read(&mut self, id: Uuid) {
        let Some(alert) = self.ledger.alerts.iter_mut().find(|a| a.id == id) else {
            return;
        };
        if alert.is_read {
            return;
        }
        alert.is_read = true;
        self.persist(&[CollectionKey::BudgetAlerts]);
    }

    #[must_use]
    pub fn unread_alert_count(&self) -> usize {
        self.ledger.alerts.iter().filter(|a| !a.is_read).count()
    }

    // ── Persistence ─────────────────────────────────────────────────

    /// `true` while some collection has changes the store has not
    /// accepted (i.e., a save failed since the last full success).
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Save all four collections, clearing the unsaved flag on success.
    pub fn flush(&mut self) -> Result<(), CoreError> {
        self.save_collection(CollectionKey::Expenses)?;
        self.save_collection(CollectionKey::Investments)?;
        self.save_collection(CollectionKey::Budgets)?;
        self.save_collection(CollectionKey::BudgetAlerts)?;
        self.dirty = false;
        Ok(())
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(ledger: Ledger, store: Box<dyn RecordStore + Send>) -> Self {
        Self {
            ledger,
            store,
            ledger_service: LedgerService::new(),
            budget_service: BudgetService::new(),
            alert_service: AlertService::new(),
            valuation_service: ValuationService::new(),
            dirty: false,
        }
    }

    fn run_alert_check(&mut self) {
        let today = Utc::now().date_naive();
        let created =
            self.alert_service
                .check_alerts(&self.ledger.budgets, &mut self.ledger.alerts, today);
        if created > 0 {
            log::debug!("Alert check created {created} alert(s)");
        }
    }

    /// Best-effort save of the given collections. After an earlier
    /// failure every collection is rewritten, so the store catches up as
    /// soon as it accepts writes again. Failures are logged, never
    /// fatal: the in-memory ledger stays authoritative.
    fn persist(&mut self, keys: &[CollectionKey]) {
        let keys: &[CollectionKey] = if self.dirty { &CollectionKey::ALL } else { keys };
        let mut failed = false;
        for key in keys {
            if let Err(e) = self.save_collection(*key) {
                log::warn!("Failed to save {key}: {e}");
                failed = true;
            }
        }
        self.dirty = failed;
    }

    fn save_collection(&mut self, key: CollectionKey) -> Result<(), CoreError> {
        match key {
            CollectionKey::Expenses => {
                store::save_collection(self.store.as_mut(), key, &self.ledger.expenses)
            }
            CollectionKey::Investments => {
                store::save_collection(self.store.as_mut(), key, &self.ledger.investments)
            }
            CollectionKey::Budgets => {
                store::save_collection(self.store.as_mut(), key, &self.ledger.budgets)
            }
            CollectionKey::BudgetAlerts => {
                store::save_collection(self.store.as_mut(), key, &self.ledger.alerts)
            }
        }
    }
}
