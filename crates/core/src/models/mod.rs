//! Data model: the persisted record types and the derived read-models.

pub mod alert;
pub mod analytics;
pub mod budget;
pub mod expense;
pub mod investment;
pub mod ledger;
