//! Upsert/delete engine and the portfolio service composing store,
//! enrichment, and query.

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::{
    CsvStore, EnrichmentService, Holding, PortfolioError, StockQuery, Symbol,
};

/// Merge incoming holdings into the existing table by (market, symbol) key.
///
/// A key match overwrites every field of the existing record; a miss appends.
/// Existing records keep their relative order; new records are appended in
/// incoming order. Applying the same incoming batch twice yields the same
/// result as applying it once.
///
/// # Errors
///
/// Returns [`PortfolioError::InvalidRequest`] when `incoming` is empty.
pub fn merge_holdings(
    existing: Vec<Holding>,
    incoming: Vec<Holding>,
) -> Result<Vec<Holding>, PortfolioError> {
    if incoming.is_empty() {
        return Err(PortfolioError::InvalidRequest(String::from(
            "no stock records provided",
        )));
    }

    let mut merged = existing;
    for record in incoming {
        match merged.iter_mut().find(|h| h.key() == record.key()) {
            Some(slot) => *slot = record,
            None => merged.push(record),
        }
    }

    Ok(merged)
}

/// Remove every holding whose symbol matches exactly.
///
/// # Errors
///
/// Returns [`PortfolioError::SymbolNotFound`] when no holding carries the
/// symbol.
pub fn remove_symbol(
    existing: Vec<Holding>,
    symbol: &Symbol,
) -> Result<Vec<Holding>, PortfolioError> {
    if !existing.iter().any(|h| h.symbol == *symbol) {
        return Err(PortfolioError::SymbolNotFound {
            symbol: symbol.to_string(),
        });
    }

    Ok(existing.into_iter().filter(|h| h.symbol != *symbol).collect())
}

/// Portfolio operations over a shared store and enrichment service.
///
/// Mutations serialize through a single-writer lock around the
/// load-merge-save cycle so two racing requests cannot lose updates; reads
/// bypass the lock and rely on the store's atomic saves to never observe a
/// file mid-write.
pub struct PortfolioService {
    store: CsvStore,
    enrichment: EnrichmentService,
    write_lock: tokio::sync::Mutex<()>,
}

impl PortfolioService {
    pub fn new(store: CsvStore, enrichment: EnrichmentService) -> Self {
        Self {
            store,
            enrichment,
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn store(&self) -> &CsvStore {
        &self.store
    }

    pub fn enrichment(&self) -> &EnrichmentService {
        &self.enrichment
    }

    /// Answer a read query: load, enrich, filter/sort/project.
    pub async fn list(&self, query: &StockQuery) -> Result<Vec<Map<String, Value>>, PortfolioError> {
        let holdings = self.store.load()?;
        debug!(?query, holdings = holdings.len(), "running read query");

        let records = self.enrichment.enrich(&holdings).await?;
        crate::query::run(records, query)
    }

    /// Merge incoming holdings into the store and persist the result.
    ///
    /// A missing store file is treated as an empty table. The save only
    /// happens after a fully-computed merge, so a failed upsert leaves the
    /// store unchanged.
    pub async fn upsert(&self, incoming: Vec<Holding>) -> Result<usize, PortfolioError> {
        let _guard = self.write_lock.lock().await;

        let existing = match self.store.load() {
            Ok(holdings) => holdings,
            Err(PortfolioError::StoreNotFound { .. }) => Vec::new(),
            Err(err) => return Err(err),
        };

        let merged = merge_holdings(existing, incoming)?;
        self.store.save(&merged)?;

        info!(rows = merged.len(), "store updated");
        Ok(merged.len())
    }

    /// Remove all holdings for a symbol and persist the result.
    ///
    /// Returns the number of removed rows.
    pub async fn delete(&self, symbol: &Symbol) -> Result<usize, PortfolioError> {
        let _guard = self.write_lock.lock().await;

        let existing = self.store.load()?;
        let before = existing.len();
        let remaining = remove_symbol(existing, symbol)?;
        self.store.save(&remaining)?;

        let removed = before - remaining.len();
        info!(%symbol, removed, "holdings deleted");
        Ok(removed)
    }
}
