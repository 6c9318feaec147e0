//! Persistence: the record-store boundary and its built-in backends.

pub mod memory;
pub mod store;
pub mod vault;
