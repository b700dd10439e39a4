use std::io::Read;

use serde_json::{json, Value};

use tickfolio_core::{Holding, PortfolioService};

use crate::cli::UpsertArgs;
use crate::error::CliError;

pub async fn run(args: &UpsertArgs, service: &PortfolioService) -> Result<Value, CliError> {
    let raw = if args.file == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(&args.file)?
    };

    let incoming: Vec<Holding> = serde_json::from_str(&raw)?;
    let total = service.upsert(incoming).await?;

    Ok(json!({
        "message": "store updated successfully",
        "rows": total,
    }))
}
