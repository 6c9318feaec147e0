use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What an alert is telling the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertType {
    /// Budget consumption crossed 80% but is still under the limit
    Approaching,
    /// Budget consumption hit or passed the limit
    Exceeded,
    /// A budget window was rolled over to a new period
    Renewed,
    /// Reserved for milestone notifications; never emitted automatically
    Achievement,
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AlertType::Approaching => "approaching",
            AlertType::Exceeded => "exceeded",
            AlertType::Renewed => "renewed",
            AlertType::Achievement => "achievement",
        };
        write!(f, "{name}")
    }
}

/// A notification tied to a budget. Alerts reference budgets by id, they
/// do not own them; deleting a budget leaves its alert history intact.
///
/// Immutable once created, except for the `is_read` flip. Only the alert
/// generator creates these — external callers never do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAlert {
    /// Unique identifier
    pub id: Uuid,

    /// The budget this alert is about
    pub budget_id: Uuid,

    /// Alert kind; part of the daily de-duplication key
    pub kind: AlertType,

    /// Human-readable message
    pub message: String,

    /// Calendar day the alert was emitted (the de-dup granularity)
    pub date: NaiveDate,

    /// Whether the user has seen it
    pub is_read: bool,
}

impl BudgetAlert {
    pub fn new(budget_id: Uuid, kind: AlertType, message: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            budget_id,
            kind,
            message: message.into(),
            date,
            is_read: false,
        }
    }
}
