use serde_json::Value;

use tickfolio_core::{PortfolioService, StockQuery};

use crate::cli::ListArgs;
use crate::error::CliError;

pub async fn run(args: &ListArgs, service: &PortfolioService) -> Result<Value, CliError> {
    let query = StockQuery {
        fields: args.fields.clone(),
        market: args.market.clone(),
        sector: args.sector.clone(),
        industry: args.industry.clone(),
        sort_by: args.sort_by.clone(),
    };

    let rows = service.list(&query).await?;
    Ok(serde_json::to_value(rows)?)
}
