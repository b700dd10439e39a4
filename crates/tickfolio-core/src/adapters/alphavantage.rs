use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::http_client::{HttpClient, HttpRequest, HttpResponse};
use crate::provider::{ProviderError, ProviderId, QuoteProvider};
use crate::throttling::ThrottlingQueue;
use crate::{Enrichment, Symbol};

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Alpha Vantage adapter.
///
/// Enrichment takes two calls per symbol: `OVERVIEW` for company, sector,
/// and industry, then `GLOBAL_QUOTE` for the latest close price. Both are
/// throttled against the free-tier quota; exceeding it surfaces as a
/// rate-limit fetch failure rather than a blocking wait.
#[derive(Clone)]
pub struct AlphaVantageProvider {
    http_client: Arc<dyn HttpClient>,
    api_key: String,
    throttling: ThrottlingQueue,
    timeout_ms: u64,
}

impl AlphaVantageProvider {
    pub fn new(http_client: Arc<dyn HttpClient>, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_key: api_key.into(),
            throttling: ThrottlingQueue::alphavantage_default(),
            timeout_ms: 10_000,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    async fn get(&self, url: String) -> Result<HttpResponse, ProviderError> {
        if let Err(delay) = self.throttling.acquire() {
            return Err(ProviderError::rate_limited(
                ProviderId::Alphavantage,
                format!("free-tier limit exceeded; retry in {:.2}s", delay.as_secs_f64()),
            ));
        }

        let request = HttpRequest::get(url).with_timeout_ms(self.timeout_ms);
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| ProviderError::transport(ProviderId::Alphavantage, e.message()))?;

        if !response.is_success() {
            return Err(ProviderError::status(
                ProviderId::Alphavantage,
                response.status,
            ));
        }

        Ok(response)
    }

    async fn fetch_enrichment(&self, symbol: &Symbol) -> Result<Enrichment, ProviderError> {
        let overview_url = format!(
            "{BASE_URL}?function=OVERVIEW&symbol={}&apikey={}",
            urlencoding::encode(symbol.as_str()),
            urlencoding::encode(&self.api_key)
        );
        let response = self.get(overview_url).await?;

        let overview: OverviewResponse = serde_json::from_str(&response.body)
            .map_err(|e| ProviderError::parse(ProviderId::Alphavantage, e.to_string()))?;

        let company = overview
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ProviderError::missing_company(symbol))?;

        let quote_url = format!(
            "{BASE_URL}?function=GLOBAL_QUOTE&symbol={}&apikey={}",
            urlencoding::encode(symbol.as_str()),
            urlencoding::encode(&self.api_key)
        );
        let response = self.get(quote_url).await?;

        let quote: GlobalQuoteResponse = serde_json::from_str(&response.body)
            .map_err(|e| ProviderError::parse(ProviderId::Alphavantage, e.to_string()))?;

        let price = quote
            .quote
            .and_then(|q| q.price)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .ok_or_else(|| ProviderError::missing_price(symbol))?;
        let price = (price * 100.0).round() / 100.0;

        Enrichment::new(
            company,
            overview.sector.as_deref().unwrap_or("N/A"),
            overview.industry.as_deref().unwrap_or("N/A"),
            price,
        )
        .map_err(|e| ProviderError::parse(ProviderId::Alphavantage, e.to_string()))
    }
}

impl QuoteProvider for AlphaVantageProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Alphavantage
    }

    fn fetch<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Enrichment, ProviderError>> + Send + 'a>> {
        Box::pin(self.fetch_enrichment(symbol))
    }
}

#[derive(Debug, Deserialize)]
struct OverviewResponse {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Sector")]
    sector: Option<String>,
    #[serde(rename = "Industry")]
    industry: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    quote: Option<GlobalQuote>,
}

#[derive(Debug, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "05. price")]
    price: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::HttpError;
    use std::sync::Mutex;

    /// Scripted transport returning canned bodies in order, recording the
    /// requested URLs.
    struct ScriptedHttpClient {
        responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
        urls: Mutex<Vec<String>>,
    }

    impl ScriptedHttpClient {
        fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                urls: Mutex::new(Vec::new()),
            }
        }

        fn urls(&self) -> Vec<String> {
            self.urls
                .lock()
                .expect("url log should not be poisoned")
                .clone()
        }
    }

    impl HttpClient for ScriptedHttpClient {
        fn execute<'a>(
            &'a self,
            request: HttpRequest,
        ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
            self.urls
                .lock()
                .expect("url log should not be poisoned")
                .push(request.url);
            let next = self
                .responses
                .lock()
                .expect("script queue should not be poisoned")
                .remove(0);
            Box::pin(async move { next })
        }
    }

    fn provider(responses: Vec<Result<HttpResponse, HttpError>>) -> AlphaVantageProvider {
        AlphaVantageProvider::new(Arc::new(ScriptedHttpClient::new(responses)), "demo")
    }

    fn symbol() -> Symbol {
        Symbol::parse("AAPL").expect("symbol")
    }

    #[tokio::test]
    async fn parses_overview_and_quote() {
        let provider = provider(vec![
            Ok(HttpResponse::ok_json(
                r#"{"Name":"Apple Inc.","Sector":" TECHNOLOGY ","Industry":"Consumer Electronics"}"#,
            )),
            Ok(HttpResponse::ok_json(
                r#"{"Global Quote":{"05. price":"175.2040"}}"#,
            )),
        ]);

        let enrichment = provider.fetch(&symbol()).await.expect("fetch");
        assert_eq!(enrichment.company, "Apple Inc.");
        assert_eq!(enrichment.sector, "TECHNOLOGY");
        assert_eq!(enrichment.current_price, 175.2);
    }

    #[tokio::test]
    async fn missing_company_name_fails() {
        let provider = provider(vec![Ok(HttpResponse::ok_json(r#"{"Note":"rate limited"}"#))]);

        let err = provider.fetch(&symbol()).await.expect_err("must fail");
        assert!(err.message().contains("no company data found for AAPL"));
    }

    #[tokio::test]
    async fn missing_price_fails() {
        let provider = provider(vec![
            Ok(HttpResponse::ok_json(r#"{"Name":"Apple Inc."}"#)),
            Ok(HttpResponse::ok_json(r#"{"Global Quote":{}}"#)),
        ]);

        let err = provider.fetch(&symbol()).await.expect_err("must fail");
        assert!(err.message().contains("no price data found for AAPL"));
    }

    #[tokio::test]
    async fn non_success_status_fails() {
        let provider = provider(vec![Ok(HttpResponse {
            status: 503,
            body: String::new(),
        })]);

        let err = provider.fetch(&symbol()).await.expect_err("must fail");
        assert!(err.message().contains("status 503"));
    }

    #[tokio::test]
    async fn api_key_is_percent_encoded_in_urls() {
        let transport = Arc::new(ScriptedHttpClient::new(vec![
            Ok(HttpResponse::ok_json(r#"{"Name":"Apple Inc."}"#)),
            Ok(HttpResponse::ok_json(
                r#"{"Global Quote":{"05. price":"175.20"}}"#,
            )),
        ]));
        let shared: Arc<dyn HttpClient> = transport.clone();
        let provider = AlphaVantageProvider::new(shared, "key with/slash");

        provider.fetch(&symbol()).await.expect("fetch");

        let urls = transport.urls();
        assert_eq!(urls.len(), 2);
        for url in &urls {
            assert!(url.ends_with("&apikey=key%20with%2Fslash"), "url = {url}");
        }
    }

    #[tokio::test]
    async fn missing_sector_defaults_to_na() {
        let provider = provider(vec![
            Ok(HttpResponse::ok_json(r#"{"Name":"Apple Inc."}"#)),
            Ok(HttpResponse::ok_json(
                r#"{"Global Quote":{"05. price":"175.20"}}"#,
            )),
        ]);

        let enrichment = provider.fetch(&symbol()).await.expect("fetch");
        assert_eq!(enrichment.sector, "N/A");
        assert_eq!(enrichment.industry, "N/A");
    }
}
