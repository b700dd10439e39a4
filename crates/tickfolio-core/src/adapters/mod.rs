//! Provider adapters implementing the [`QuoteProvider`](crate::QuoteProvider)
//! contract.

mod alphavantage;
mod yahoo;

pub use alphavantage::AlphaVantageProvider;
pub use yahoo::YahooProvider;
