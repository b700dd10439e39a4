//! Quote-enrichment service.
//!
//! Resolves enrichment data for a batch of symbols through the quote cache,
//! falling back to the provider on a miss. Resolution is fail-fast: one
//! unresolved symbol aborts the whole batch, so the enriched table the query
//! engine sees is always fully populated.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::{
    Enrichment, EnrichedRecord, Holding, PortfolioError, QuoteCache, QuoteProvider, Symbol,
};

pub struct EnrichmentService {
    provider: Arc<dyn QuoteProvider>,
    cache: QuoteCache,
}

impl EnrichmentService {
    pub fn new(provider: Arc<dyn QuoteProvider>, cache: QuoteCache) -> Self {
        Self { provider, cache }
    }

    pub fn cache(&self) -> &QuoteCache {
        &self.cache
    }

    /// Resolve enrichment data for each distinct symbol.
    ///
    /// Cache hits are served without touching the provider; misses are
    /// fetched and written to the cache before returning. Any fetch failure
    /// aborts the whole resolution with an error naming the offending symbol.
    pub async fn resolve(
        &self,
        symbols: &[Symbol],
    ) -> Result<HashMap<Symbol, Enrichment>, PortfolioError> {
        let mut resolved: HashMap<Symbol, Enrichment> = HashMap::new();

        for symbol in symbols {
            if resolved.contains_key(symbol) {
                continue;
            }
            let enrichment = self.resolve_symbol(symbol).await?;
            resolved.insert(symbol.clone(), enrichment);
        }

        Ok(resolved)
    }

    /// Join resolved enrichment onto holdings, preserving holding order.
    pub async fn enrich(
        &self,
        holdings: &[Holding],
    ) -> Result<Vec<EnrichedRecord>, PortfolioError> {
        let mut resolved: HashMap<Symbol, Enrichment> = HashMap::new();
        let mut records = Vec::with_capacity(holdings.len());

        for holding in holdings {
            let enrichment = match resolved.get(&holding.symbol) {
                Some(enrichment) => enrichment.clone(),
                None => {
                    let enrichment = self.resolve_symbol(&holding.symbol).await?;
                    resolved.insert(holding.symbol.clone(), enrichment.clone());
                    enrichment
                }
            };
            records.push(EnrichedRecord::join(holding, &enrichment));
        }

        Ok(records)
    }

    async fn resolve_symbol(&self, symbol: &Symbol) -> Result<Enrichment, PortfolioError> {
        if let Some(enrichment) = self.cache.get(symbol).await {
            debug!(%symbol, "quote cache hit");
            return Ok(enrichment);
        }

        debug!(%symbol, provider = %self.provider.id(), "quote cache miss, fetching");
        let enrichment = self.provider.fetch(symbol).await.map_err(|source| {
            PortfolioError::Fetch {
                symbol: symbol.to_string(),
                source,
            }
        })?;

        self.cache.put(symbol.clone(), enrichment.clone()).await;
        Ok(enrichment)
    }
}
