use std::path::PathBuf;

use thiserror::Error;

use crate::provider::ProviderError;

/// Validation and contract errors exposed by `tickfolio-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("market cannot be empty")]
    EmptyMarket,

    #[error("currency must be a 3-letter uppercase ISO code: '{value}'")]
    InvalidCurrency { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("invalid provider '{value}', expected one of yahoo, alphavantage")]
    InvalidProvider { value: String },
}

/// Top-level error type for portfolio operations.
///
/// The taxonomy mirrors what callers can act on: not-found conditions,
/// rejected requests, and upstream fetch failures. Every variant aborts the
/// current operation entirely; there is no partial-success mode.
#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("store file not found: {}", path.display())]
    StoreNotFound { path: PathBuf },

    #[error("no holding found for symbol '{symbol}'")]
    SymbolNotFound { symbol: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("failed to fetch data for {symbol}: {source}")]
    Fetch {
        symbol: String,
        source: ProviderError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("store i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store format error: {0}")]
    Csv(#[from] csv::Error),
}

impl PortfolioError {
    /// Stable machine-readable code for each error category.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::StoreNotFound { .. } | Self::SymbolNotFound { .. } => "portfolio.not_found",
            Self::InvalidRequest(_) => "portfolio.invalid_request",
            Self::Fetch { .. } => "portfolio.upstream_fetch",
            Self::Validation(_) => "portfolio.validation",
            Self::Io(_) | Self::Csv(_) => "portfolio.store_io",
        }
    }
}
