//! Canonical domain models for tickfolio.
//!
//! A [`Holding`] is a persisted portfolio position identified by its
//! (market, symbol) composite key. [`Enrichment`] is the externally sourced
//! company/sector/industry/price data joined onto a holding at read time,
//! producing the [`EnrichedRecord`] row shape the query engine operates on.

mod field;
mod models;
mod symbol;

pub use field::Field;
pub use models::{validate_currency_code, Enrichment, EnrichedRecord, Holding};
pub use symbol::Symbol;
