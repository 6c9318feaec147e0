//! Stateless business logic. Services operate on borrowed ledger state;
//! persistence and cross-service orchestration live in the `Pocketbook`
//! facade.

pub mod alert_service;
pub mod budget_service;
pub mod ledger_service;
pub mod valuation_service;
