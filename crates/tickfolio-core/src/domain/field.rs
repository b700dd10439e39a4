use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Fixed set of known record fields, in the schema's canonical order.
///
/// Field names received from callers are resolved against this enum at
/// request time; unknown names are dropped rather than erroring, except when
/// projection would be left with nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Market,
    Symbol,
    Company,
    Sector,
    Industry,
    Currency,
    Shares,
    AvgCost,
    CurrentPrice,
}

impl Field {
    pub const ALL: [Self; 9] = [
        Self::Market,
        Self::Symbol,
        Self::Company,
        Self::Sector,
        Self::Industry,
        Self::Currency,
        Self::Shares,
        Self::AvgCost,
        Self::CurrentPrice,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Symbol => "symbol",
            Self::Company => "company",
            Self::Sector => "sector",
            Self::Industry => "industry",
            Self::Currency => "currency",
            Self::Shares => "shares",
            Self::AvgCost => "avgCost",
            Self::CurrentPrice => "currentPrice",
        }
    }

    /// Resolve a caller-supplied field name, `None` for unknown names.
    pub fn resolve(name: &str) -> Option<Self> {
        match name.trim() {
            "market" => Some(Self::Market),
            "symbol" => Some(Self::Symbol),
            "company" => Some(Self::Company),
            "sector" => Some(Self::Sector),
            "industry" => Some(Self::Industry),
            "currency" => Some(Self::Currency),
            "shares" => Some(Self::Shares),
            "avgCost" => Some(Self::AvgCost),
            "currentPrice" => Some(Self::CurrentPrice),
            _ => None,
        }
    }

    /// Whether values of this field order numerically rather than as strings.
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Shares | Self::AvgCost | Self::CurrentPrice)
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
