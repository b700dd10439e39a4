use serde::{Deserialize, Serialize};

use crate::{Field, Symbol, ValidationError};

/// A persisted portfolio position.
///
/// Identity key is the (market, symbol) pair; the store must contain at most
/// one holding per key after any upsert. Serde names match the record store's
/// fixed column order: `market,symbol,currency,shares,avgCost`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub market: String,
    pub symbol: Symbol,
    pub currency: String,
    pub shares: u64,
    #[serde(rename = "avgCost")]
    pub avg_cost: f64,
}

impl Holding {
    pub fn new(
        market: impl Into<String>,
        symbol: Symbol,
        currency: impl AsRef<str>,
        shares: u64,
        avg_cost: f64,
    ) -> Result<Self, ValidationError> {
        let market = market.into();
        if market.trim().is_empty() {
            return Err(ValidationError::EmptyMarket);
        }
        validate_non_negative("avgCost", avg_cost)?;

        Ok(Self {
            market,
            symbol,
            currency: validate_currency_code(currency.as_ref())?,
            shares,
            avg_cost,
        })
    }

    /// The composite identity key used by the upsert merge.
    pub fn key(&self) -> (&str, &str) {
        (self.market.as_str(), self.symbol.as_str())
    }
}

/// Externally sourced company data joined onto a holding at read time.
///
/// Keyed by symbol alone, derived, never persisted. Sector and industry are
/// trimmed of surrounding whitespace on construction; providers substitute
/// `"N/A"` when the upstream omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    pub company: String,
    pub sector: String,
    pub industry: String,
    #[serde(rename = "currentPrice")]
    pub current_price: f64,
}

impl Enrichment {
    pub fn new(
        company: impl Into<String>,
        sector: impl AsRef<str>,
        industry: impl AsRef<str>,
        current_price: f64,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("currentPrice", current_price)?;

        Ok(Self {
            company: company.into(),
            sector: sector.as_ref().trim().to_owned(),
            industry: industry.as_ref().trim().to_owned(),
            current_price,
        })
    }
}

/// The row shape exposed to the query engine: a holding joined with its
/// enrichment data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    pub market: String,
    pub symbol: Symbol,
    pub company: String,
    pub sector: String,
    pub industry: String,
    pub currency: String,
    pub shares: u64,
    #[serde(rename = "avgCost")]
    pub avg_cost: f64,
    #[serde(rename = "currentPrice")]
    pub current_price: f64,
}

impl EnrichedRecord {
    pub fn join(holding: &Holding, enrichment: &Enrichment) -> Self {
        Self {
            market: holding.market.clone(),
            symbol: holding.symbol.clone(),
            company: enrichment.company.clone(),
            sector: enrichment.sector.clone(),
            industry: enrichment.industry.clone(),
            currency: holding.currency.clone(),
            shares: holding.shares,
            avg_cost: holding.avg_cost,
            current_price: enrichment.current_price,
        }
    }

    /// Field accessor used by filtering, sorting, and projection.
    pub fn value(&self, field: Field) -> serde_json::Value {
        match field {
            Field::Market => serde_json::Value::from(self.market.as_str()),
            Field::Symbol => serde_json::Value::from(self.symbol.as_str()),
            Field::Company => serde_json::Value::from(self.company.as_str()),
            Field::Sector => serde_json::Value::from(self.sector.as_str()),
            Field::Industry => serde_json::Value::from(self.industry.as_str()),
            Field::Currency => serde_json::Value::from(self.currency.as_str()),
            Field::Shares => serde_json::Value::from(self.shares),
            Field::AvgCost => serde_json::Value::from(self.avg_cost),
            Field::CurrentPrice => serde_json::Value::from(self.current_price),
        }
    }
}

/// Validate and normalize currency to an uppercase 3-letter code.
pub fn validate_currency_code(input: &str) -> Result<String, ValidationError> {
    let normalized = input.trim().to_ascii_uppercase();
    let is_valid = normalized.len() == 3 && normalized.chars().all(|ch| ch.is_ascii_alphabetic());

    if !is_valid {
        return Err(ValidationError::InvalidCurrency {
            value: input.to_owned(),
        });
    }

    Ok(normalized)
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
