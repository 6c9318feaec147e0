use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Spending category. A fixed taxonomy — budgets reference these by value,
/// so the set is closed rather than user-defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Food,
    Transportation,
    Entertainment,
    Shopping,
    Utilities,
    Healthcare,
    Education,
    Travel,
    Other,
}

impl ExpenseCategory {
    /// All nine categories, in display order.
    pub const ALL: [ExpenseCategory; 9] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transportation,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Shopping,
        ExpenseCategory::Utilities,
        ExpenseCategory::Healthcare,
        ExpenseCategory::Education,
        ExpenseCategory::Travel,
        ExpenseCategory::Other,
    ];
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Transportation => "Transportation",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Healthcare => "Healthcare",
            ExpenseCategory::Education => "Education",
            ExpenseCategory::Travel => "Travel",
            ExpenseCategory::Other => "Other",
        };
        write!(f, "{name}")
    }
}

/// How often a recurring expense repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecurringFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// A single spending record.
///
/// Identity (`id`) is immutable; everything else can change through an
/// update. `amount` is expected to be non-negative — validation happens at
/// the presentation boundary, and the engine degrades gracefully (clamped
/// percentages, no panics) if a bad value slips through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: Uuid,

    /// Short human-readable label ("Groceries", "Bus pass")
    pub title: String,

    /// Amount spent, in the account currency
    pub amount: f64,

    /// Which budget category this spending counts against
    pub category: ExpenseCategory,

    /// Date of the expense (daily granularity)
    pub date: NaiveDate,

    /// Optional free-text notes
    #[serde(default)]
    pub notes: Option<String>,

    /// Whether this expense repeats
    #[serde(default)]
    pub is_recurring: bool,

    /// Repeat cadence, set only when `is_recurring`
    #[serde(default)]
    pub recurring_frequency: Option<RecurringFrequency>,
}

impl Expense {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        category: ExpenseCategory,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            category,
            date,
            notes: None,
            is_recurring: false,
            recurring_frequency: None,
        }
    }

    /// Create a recurring expense with a repeat cadence.
    pub fn recurring(
        title: impl Into<String>,
        amount: f64,
        category: ExpenseCategory,
        date: NaiveDate,
        frequency: RecurringFrequency,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            category,
            date,
            notes: None,
            is_recurring: true,
            recurring_frequency: Some(frequency),
        }
    }

    /// Attach notes, builder-style.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
