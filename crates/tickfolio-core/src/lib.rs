//! Core contracts for tickfolio.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - The CSV-backed record store and atomic save path
//! - The per-symbol quote cache and fail-fast enrichment service
//! - The filter/sort/projection query engine
//! - The composite-key upsert/delete merge engine
//! - Provider adapters (Yahoo, Alpha Vantage) behind the `QuoteProvider` trait

pub mod adapters;
pub mod cache;
pub mod domain;
pub mod enrichment;
pub mod error;
pub mod http_client;
pub mod portfolio;
pub mod provider;
pub mod query;
pub mod store;
pub mod throttling;

pub use adapters::{AlphaVantageProvider, YahooProvider};
pub use cache::QuoteCache;
pub use domain::{validate_currency_code, Enrichment, EnrichedRecord, Field, Holding, Symbol};
pub use enrichment::EnrichmentService;
pub use error::{PortfolioError, ValidationError};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};
pub use portfolio::{merge_holdings, remove_symbol, PortfolioService};
pub use provider::{ProviderError, ProviderErrorKind, ProviderId, QuoteProvider};
pub use query::StockQuery;
pub use store::CsvStore;
pub use throttling::ThrottlingQueue;
