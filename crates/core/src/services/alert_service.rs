use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::alert::{AlertType, BudgetAlert};
use crate::models::budget::Budget;

/// Threshold rule evaluation with daily de-duplication.
///
/// For every `(budget, alert kind)` pair at most one alert may exist per
/// calendar day. The evaluator is idempotent within a day: running it
/// twice over unchanged budgets adds nothing the second time. A budget
/// hovering at, say, 85% for a week alerts once on day one and then goes
/// quiet — the de-dup is strictly per day, not per crossing.
pub struct AlertService;

impl AlertService {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate both threshold rules for every active budget with
    /// notifications enabled, appending whatever is not already present
    /// for `today`. Returns the number of alerts created.
    ///
    /// The two checks are independent: a budget that crossed 80% in the
    /// morning and 100% in the afternoon carries both an approaching and
    /// an exceeded alert for the same day.
    pub fn check_alerts(
        &self,
        budgets: &[Budget],
        alerts: &mut Vec<BudgetAlert>,
        today: NaiveDate,
    ) -> usize {
        let mut created = 0;

        for budget in budgets {
            if !budget.is_active || !budget.notifications {
                continue;
            }

            // A zero/negative limit reports 0% used, so it can never
            // reach either branch below.
            let pct = budget.percentage_used();

            if (80.0..100.0).contains(&pct) {
                let message = format!(
                    "Budget '{}' has used {:.0}% of its limit",
                    budget.name, pct
                );
                if Self::push_unique(alerts, budget.id, AlertType::Approaching, message, today) {
                    created += 1;
                }
            }

            if pct >= 100.0 {
                let message = format!(
                    "Budget '{}' exceeded by {:.2}",
                    budget.name,
                    budget.spent - budget.limit
                );
                if Self::push_unique(alerts, budget.id, AlertType::Exceeded, message, today) {
                    created += 1;
                }
            }
        }

        created
    }

    /// Record a period rollover. Subject to the same daily de-dup rule,
    /// so renewing the same budget twice in one day emits one alert.
    pub fn emit_renewed(
        &self,
        alerts: &mut Vec<BudgetAlert>,
        budget: &Budget,
        today: NaiveDate,
    ) -> bool {
        let message = format!(
            "Budget '{}' renewed for a new {} period",
            budget.name, budget.period
        );
        Self::push_unique(alerts, budget.id, AlertType::Renewed, message, today)
    }

    /// Append an alert unless one with the same `(budget, kind, day)` key
    /// already exists. Returns whether an alert was added.
    fn push_unique(
        alerts: &mut Vec<BudgetAlert>,
        budget_id: Uuid,
        kind: AlertType,
        message: String,
        date: NaiveDate,
    ) -> bool {
        let duplicate = alerts
            .iter()
            .any(|a| a.budget_id == budget_id && a.kind == kind && a.date == date);
        if duplicate {
            return false;
        }
        alerts.push(BudgetAlert::new(budget_id, kind, message, date));
        true
    }
}

impl Default for AlertService {
    fn default() -> Self {
        Self::new()
    }
}
