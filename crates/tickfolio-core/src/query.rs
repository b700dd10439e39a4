//! Filter, sort, and projection over the enriched table.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{EnrichedRecord, Field, PortfolioError};

/// Read-query parameters. All fields optional; `fields` defaults to the full
/// schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockQuery {
    pub fields: Option<String>,
    pub market: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub sort_by: Option<String>,
}

impl StockQuery {
    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn with_sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }
}

/// Run a query against the enriched table.
///
/// Filters combine with logical AND on exact string match; sorting is stable
/// and ascending by the named field's natural ordering, silently skipped for
/// unknown names; projection keeps only known fields in the caller's
/// requested order.
///
/// # Errors
///
/// Returns [`PortfolioError::InvalidRequest`] when no requested field name
/// resolves to a known field.
pub fn run(
    mut records: Vec<EnrichedRecord>,
    query: &StockQuery,
) -> Result<Vec<Map<String, Value>>, PortfolioError> {
    let fields = projection_fields(query)?;

    if let Some(market) = query.market.as_deref() {
        records.retain(|r| r.market == market);
    }
    if let Some(sector) = query.sector.as_deref() {
        records.retain(|r| r.sector == sector);
    }
    if let Some(industry) = query.industry.as_deref() {
        records.retain(|r| r.industry == industry);
    }

    if let Some(sort_field) = query.sort_by.as_deref().and_then(Field::resolve) {
        records.sort_by(|a, b| compare_by_field(a, b, sort_field));
        debug!(field = %sort_field, rows = records.len(), "sorted result set");
    }

    let rows = records
        .iter()
        .map(|record| {
            fields
                .iter()
                .map(|&field| (field.as_str().to_owned(), record.value(field)))
                .collect()
        })
        .collect();

    Ok(rows)
}

/// Resolve the requested projection, dropping unknown names.
fn projection_fields(query: &StockQuery) -> Result<Vec<Field>, PortfolioError> {
    let fields: Vec<Field> = match query.fields.as_deref() {
        None => Field::ALL.to_vec(),
        Some(raw) => raw.split(',').filter_map(Field::resolve).collect(),
    };

    if fields.is_empty() {
        return Err(PortfolioError::InvalidRequest(String::from(
            "no valid fields specified",
        )));
    }

    Ok(fields)
}

fn compare_by_field(a: &EnrichedRecord, b: &EnrichedRecord, field: Field) -> Ordering {
    if field.is_numeric() {
        let left = a.value(field).as_f64();
        let right = b.value(field).as_f64();
        left.partial_cmp(&right).unwrap_or(Ordering::Equal)
    } else {
        let left = a.value(field);
        let right = b.value(field);
        left.as_str().cmp(&right.as_str())
    }
}
