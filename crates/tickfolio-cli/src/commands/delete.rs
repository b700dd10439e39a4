use serde_json::{json, Value};

use tickfolio_core::{PortfolioService, Symbol};

use crate::cli::DeleteArgs;
use crate::error::CliError;

pub async fn run(args: &DeleteArgs, service: &PortfolioService) -> Result<Value, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let removed = service.delete(&symbol).await?;

    Ok(json!({
        "message": format!("removed {removed} holding(s) for {symbol}"),
        "removed": removed,
    }))
}
