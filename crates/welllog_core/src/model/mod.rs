//! Domain model for well-being records and their catalog.
//!
//! # Responsibility
//! - Define the canonical entry record shared by calendar/dashboard views.
//! - Define the definition catalog (category -> type -> allowed values).
//!
//! # Invariants
//! - Entry identity is the (date, category, type) triple.
//! - Category/type/value keys are matched case-insensitively everywhere.

pub mod definition;
pub mod entry;
