//! CLI argument definitions for tickfolio.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `list` | Read the enriched portfolio with filter/sort/projection |
//! | `upsert` | Merge holdings from a JSON file into the store |
//! | `delete` | Remove all holdings for a symbol |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--store` | `data/stocks.csv` | Path to the holdings CSV |
//! | `--provider` | `yahoo` | Quote provider (yahoo, alphavantage) |
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | `10000` | Per-fetch timeout budget in ms |

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Portfolio holdings with live quote enrichment.
#[derive(Debug, Parser)]
#[command(
    name = "tickfolio",
    author,
    version,
    about = "Portfolio holdings with live quote enrichment",
    long_about = "Tickfolio keeps stock holdings in a flat CSV store and enriches them on read \
with live company, sector, industry, and price data from a quote provider. \
Enrichment results are cached per symbol for the lifetime of the process.\n\
\n\
Use 'tickfolio <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Path to the holdings CSV store.
    #[arg(long, global = true, default_value = "data/stocks.csv")]
    pub store: String,

    /// Quote provider used for enrichment.
    #[arg(long, global = true, value_enum, default_value_t = ProviderSelector::Yahoo)]
    pub provider: ProviderSelector,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Per-fetch timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderSelector {
    Yahoo,
    Alphavantage,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read the enriched portfolio.
    List(ListArgs),
    /// Merge holdings from a JSON file into the store.
    Upsert(UpsertArgs),
    /// Remove all holdings for a symbol.
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Comma-separated list of fields to return (default: all).
    #[arg(long)]
    pub fields: Option<String>,

    /// Keep only rows with this exact market.
    #[arg(long)]
    pub market: Option<String>,

    /// Keep only rows with this exact sector.
    #[arg(long)]
    pub sector: Option<String>,

    /// Keep only rows with this exact industry.
    #[arg(long)]
    pub industry: Option<String>,

    /// Sort ascending by this field; unknown names are ignored.
    #[arg(long)]
    pub sort_by: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpsertArgs {
    /// Path to a JSON array of holdings, or '-' for stdin.
    pub file: String,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Symbol whose holdings should be removed.
    pub symbol: String,
}
