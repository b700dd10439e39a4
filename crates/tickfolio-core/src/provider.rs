use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Enrichment, Symbol, ValidationError};

/// Canonical provider identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Yahoo,
    Alphavantage,
}

impl ProviderId {
    pub const ALL: [Self; 2] = [Self::Yahoo, Self::Alphavantage];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yahoo => "yahoo",
            Self::Alphavantage => "alphavantage",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yahoo" => Ok(Self::Yahoo),
            "alphavantage" => Ok(Self::Alphavantage),
            other => Err(ValidationError::InvalidProvider {
                value: other.to_owned(),
            }),
        }
    }
}

/// Provider-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    MissingCompany,
    MissingPrice,
    Status,
    Transport,
    RateLimited,
    Parse,
}

/// Structured fetch error surfaced through the fail-fast enrichment path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    message: String,
}

impl ProviderError {
    pub fn missing_company(symbol: &Symbol) -> Self {
        Self {
            kind: ProviderErrorKind::MissingCompany,
            message: format!("no company data found for {symbol}"),
        }
    }

    pub fn missing_price(symbol: &Symbol) -> Self {
        Self {
            kind: ProviderErrorKind::MissingPrice,
            message: format!("no price data found for {symbol}"),
        }
    }

    pub fn status(provider: ProviderId, status: u16) -> Self {
        Self {
            kind: ProviderErrorKind::Status,
            message: format!("{provider} returned status {status}"),
        }
    }

    pub fn transport(provider: ProviderId, message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Transport,
            message: format!("{provider} transport error: {}", message.into()),
        }
    }

    pub fn rate_limited(provider: ProviderId, message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::RateLimited,
            message: format!("{provider} rate limit: {}", message.into()),
        }
    }

    pub fn parse(provider: ProviderId, message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Parse,
            message: format!("failed to parse {provider} response: {}", message.into()),
        }
    }

    pub const fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ProviderErrorKind::MissingCompany => "provider.missing_company",
            ProviderErrorKind::MissingPrice => "provider.missing_price",
            ProviderErrorKind::Status => "provider.status",
            ProviderErrorKind::Transport => "provider.transport",
            ProviderErrorKind::RateLimited => "provider.rate_limited",
            ProviderErrorKind::Parse => "provider.parse",
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ProviderError {}

/// External quote provider capability.
///
/// Given a symbol, a provider resolves the company name, sector, industry,
/// and latest close price, or fails. Implementations must be `Send + Sync`
/// as they are shared across requests behind an `Arc`.
pub trait QuoteProvider: Send + Sync {
    /// Returns the unique provider identifier.
    fn id(&self) -> ProviderId;

    /// Fetches enrichment data for a single symbol.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the upstream omits the company name or
    /// price, returns a non-success status, or the transport fails or times
    /// out. There are no retries; the caller aborts on first failure.
    fn fetch<'a>(
        &'a self,
        symbol: &'a Symbol,
    ) -> Pin<Box<dyn Future<Output = Result<Enrichment, ProviderError>> + Send + 'a>>;
}
