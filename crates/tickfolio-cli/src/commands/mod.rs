mod delete;
mod list;
mod upsert;

use std::sync::Arc;

use serde_json::Value;

use tickfolio_core::{
    AlphaVantageProvider, CsvStore, EnrichmentService, PortfolioService, QuoteCache,
    QuoteProvider, ReqwestHttpClient, YahooProvider,
};

use crate::cli::{Cli, Command, ProviderSelector};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let service = build_service(cli);

    match &cli.command {
        Command::List(args) => list::run(args, &service).await,
        Command::Upsert(args) => upsert::run(args, &service).await,
        Command::Delete(args) => delete::run(args, &service).await,
    }
}

fn build_service(cli: &Cli) -> PortfolioService {
    let http_client = Arc::new(ReqwestHttpClient::new());

    let provider: Arc<dyn QuoteProvider> = match cli.provider {
        ProviderSelector::Yahoo => {
            Arc::new(YahooProvider::new(http_client).with_timeout_ms(cli.timeout_ms))
        }
        ProviderSelector::Alphavantage => {
            let api_key = std::env::var("TICKFOLIO_ALPHAVANTAGE_API_KEY")
                .unwrap_or_else(|_| String::from("demo"));
            Arc::new(
                AlphaVantageProvider::new(http_client, api_key).with_timeout_ms(cli.timeout_ms),
            )
        }
    };

    let enrichment = EnrichmentService::new(provider, QuoteCache::new());
    PortfolioService::new(CsvStore::new(&cli.store), enrichment)
}
