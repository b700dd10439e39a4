use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpClient, HttpRequest};
use crate::provider::{ProviderError, ProviderId, QuoteProvider};
use crate::{Enrichment, Symbol};

const BASE_URL: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary";

/// Yahoo Finance adapter.
///
/// A single `quoteSummary` call with the `price` and `assetProfile` modules
/// covers the whole enrichment tuple: company name and latest price come
/// from `price`, sector and industry from `assetProfile`.
#[derive(Clone)]
pub struct YahooProvider {
    http_client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl YahooProvider {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            timeout_ms: 10_000,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn fetch_enrichment(&self, symbol: &Symbol) -> Result<Enrichment, ProviderError> {
        let url = format!(
            "{BASE_URL}/{}?modules=price%2CassetProfile",
            urlencoding::encode(symbol.as_str())
        );
        let request = HttpRequest::get(url).with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| ProviderError::transport(ProviderId::Yahoo, e.message()))?;

        if !response.is_success() {
            return Err(ProviderError::status(ProviderId::Yahoo, response.status));
        }

        let summary: QuoteSummaryResponse = serde_json::from_str(&response.body)
            .map_err(|e| ProviderError::parse(ProviderId::Yahoo, e.to_string()))?;

        let result = summary
            .quote_summary
            .and_then(|qs| qs.result)
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .ok_or_else(|| ProviderError::missing_company(symbol))?;

        let price_block = result.price.unwrap_or_default();
        let company = price_block
            .long_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ProviderError::missing_company(symbol))?;

        let price = price_block
            .regular_market_price
            .and_then(|p| p.raw)
            .ok_or_else(|| ProviderError::missing_price(symbol))?;
        let price = (price * 100.0).round() / 100.0;

        let profile = result.asset_profile.unwrap_or_default();

        Enrichment::new(
            company,
            profile.sector.as_deref().unwrap_or("N/A"),
            profile.industry.as_deref().unwrap_or("N/A"),
            price,
        )
        .map_err(|e| ProviderError::parse(ProviderId::Yahoo, e.to_string()))
    }
}

impl QuoteProvider for YahooProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn fetch<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Enrichment, ProviderError>> + Send + 'a>> {
        Box::pin(self.fetch_enrichment(symbol))
    }
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: Option<QuoteSummary>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummary {
    result: Option<Vec<QuoteSummaryResult>>,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResult {
    price: Option<PriceBlock>,
    #[serde(rename = "assetProfile")]
    asset_profile: Option<AssetProfile>,
}

#[derive(Debug, Default, Deserialize)]
struct PriceBlock {
    #[serde(rename = "longName")]
    long_name: Option<String>,
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct AssetProfile {
    sector: Option<String>,
    industry: Option<String>,
}
