//! Shared fixtures for tickfolio behavioral tests.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tickfolio_core::{
    Enrichment, Holding, ProviderError, ProviderId, QuoteProvider, Symbol,
};

/// Deterministic in-memory provider that counts fetches.
///
/// Symbols registered with [`MockProvider::with_quote`] resolve to the given
/// enrichment; everything else fails the way a provider with no company data
/// does.
#[derive(Default)]
pub struct MockProvider {
    quotes: Mutex<HashMap<String, Enrichment>>,
    fetch_count: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote(
        self,
        symbol: &str,
        company: &str,
        sector: &str,
        industry: &str,
        price: f64,
    ) -> Self {
        let enrichment =
            Enrichment::new(company, sector, industry, price).expect("valid enrichment");
        self.quotes
            .lock()
            .expect("quote map should not be poisoned")
            .insert(symbol.to_uppercase(), enrichment);
        self
    }

    /// Number of provider fetches performed so far.
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

impl QuoteProvider for MockProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn fetch<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Enrichment, ProviderError>> + Send + 'a>> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        let result = self
            .quotes
            .lock()
            .expect("quote map should not be poisoned")
            .get(symbol.as_str())
            .cloned()
            .ok_or_else(|| ProviderError::missing_company(symbol));
        Box::pin(async move { result })
    }
}

/// Build a validated holding fixture.
pub fn holding(market: &str, symbol: &str, shares: u64, avg_cost: f64) -> Holding {
    Holding::new(
        market,
        Symbol::parse(symbol).expect("valid symbol"),
        "USD",
        shares,
        avg_cost,
    )
    .expect("valid holding")
}

pub fn symbol(raw: &str) -> Symbol {
    Symbol::parse(raw).expect("valid symbol")
}
