use std::sync::Arc;

use tickfolio_core::{
    CsvStore, EnrichmentService, PortfolioError, PortfolioService, QuoteCache, QuoteProvider,
    StockQuery,
};
use tickfolio_tests::{holding, symbol, MockProvider};

fn apple_provider() -> Arc<MockProvider> {
    Arc::new(MockProvider::new().with_quote(
        "AAPL",
        "Apple Inc.",
        "Technology",
        "Consumer Electronics",
        175.2,
    ))
}

fn build_service(dir: &tempfile::TempDir, provider: Arc<MockProvider>) -> PortfolioService {
    let store = CsvStore::new(dir.path().join("stocks.csv"));
    let provider: Arc<dyn QuoteProvider> = provider;
    PortfolioService::new(store, EnrichmentService::new(provider, QuoteCache::new()))
}

#[tokio::test]
async fn unfiltered_read_returns_fully_enriched_rows() {
    // Store with one AAPL holding; provider knows the symbol.
    let dir = tempfile::tempdir().expect("tempdir");
    let service = build_service(&dir, apple_provider());
    service
        .upsert(vec![holding("US", "AAPL", 100, 170.5)])
        .await
        .expect("seed store");

    let rows = service.list(&StockQuery::default()).await.expect("list");
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row["market"], "US");
    assert_eq!(row["symbol"], "AAPL");
    assert_eq!(row["company"], "Apple Inc.");
    assert_eq!(row["sector"], "Technology");
    assert_eq!(row["currency"], "USD");
    assert_eq!(row["shares"], 100);
    assert_eq!(row["avgCost"], 170.5);
    assert_eq!(row["currentPrice"], 175.2);
}

#[tokio::test]
async fn upsert_replaces_matching_key_in_full() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = build_service(&dir, apple_provider());

    service
        .upsert(vec![holding("US", "AAPL", 100, 170.5)])
        .await
        .expect("initial upsert");
    service
        .upsert(vec![holding("US", "AAPL", 150, 170.5)])
        .await
        .expect("second upsert");

    let stored = service.store().load().expect("load");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].shares, 150);
}

#[tokio::test]
async fn upsert_is_idempotent_through_the_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = build_service(&dir, apple_provider());
    let incoming = vec![holding("US", "AAPL", 150, 170.5)];

    service.upsert(incoming.clone()).await.expect("first");
    let after_once = service.store().load().expect("load");

    service.upsert(incoming).await.expect("second");
    let after_twice = service.store().load().expect("load");

    assert_eq!(after_once, after_twice);
}

#[tokio::test]
async fn upsert_onto_missing_store_creates_it() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = build_service(&dir, apple_provider());

    let total = service
        .upsert(vec![holding("US", "AAPL", 100, 170.5)])
        .await
        .expect("upsert");
    assert_eq!(total, 1);
    assert!(service.store().path().exists());
}

#[tokio::test]
async fn empty_upsert_leaves_store_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = build_service(&dir, apple_provider());
    service
        .upsert(vec![holding("US", "AAPL", 100, 170.5)])
        .await
        .expect("seed store");

    let err = service.upsert(Vec::new()).await.expect_err("must fail");
    assert!(matches!(err, PortfolioError::InvalidRequest(_)));

    let stored = service.store().load().expect("load");
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn delete_removes_every_holding_for_the_symbol() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = build_service(&dir, apple_provider());
    service
        .upsert(vec![
            holding("US", "AAPL", 100, 170.5),
            holding("DE", "AAPL", 10, 160.0),
            holding("US", "MSFT", 40, 390.0),
        ])
        .await
        .expect("seed store");

    let removed = service.delete(&symbol("AAPL")).await.expect("delete");
    assert_eq!(removed, 2);

    let stored = service.store().load().expect("load");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].symbol.as_str(), "MSFT");
}

#[tokio::test]
async fn deleting_the_last_holding_leaves_a_loadable_empty_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = build_service(&dir, apple_provider());
    service
        .upsert(vec![holding("US", "AAPL", 100, 170.5)])
        .await
        .expect("seed store");

    let removed = service.delete(&symbol("AAPL")).await.expect("delete");
    assert_eq!(removed, 1);

    // The schema header must survive an empty save.
    let raw = std::fs::read_to_string(service.store().path()).expect("read");
    assert_eq!(raw.trim_end(), "market,symbol,currency,shares,avgCost");

    let stored = service.store().load().expect("load");
    assert!(stored.is_empty());
}

#[tokio::test]
async fn delete_of_absent_symbol_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = build_service(&dir, apple_provider());
    service
        .upsert(vec![holding("US", "MSFT", 40, 390.0)])
        .await
        .expect("seed store");

    let err = service.delete(&symbol("AAPL")).await.expect_err("must fail");
    assert!(matches!(err, PortfolioError::SymbolNotFound { .. }));
}

#[tokio::test]
async fn read_on_missing_store_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = build_service(&dir, apple_provider());

    let err = service
        .list(&StockQuery::default())
        .await
        .expect_err("must fail");
    assert!(matches!(err, PortfolioError::StoreNotFound { .. }));
}

#[tokio::test]
async fn failed_enrichment_aborts_the_read() {
    let dir = tempfile::tempdir().expect("tempdir");
    let service = build_service(&dir, apple_provider());
    service
        .upsert(vec![
            holding("US", "AAPL", 100, 170.5),
            holding("US", "UNKNOWN", 5, 10.0),
        ])
        .await
        .expect("seed store");

    let err = service
        .list(&StockQuery::default())
        .await
        .expect_err("must fail");
    match err {
        PortfolioError::Fetch { symbol, .. } => assert_eq!(symbol, "UNKNOWN"),
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn repeated_reads_fetch_each_symbol_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let provider = apple_provider();
    let service = build_service(&dir, Arc::clone(&provider));
    service
        .upsert(vec![holding("US", "AAPL", 100, 170.5)])
        .await
        .expect("seed store");

    service.list(&StockQuery::default()).await.expect("first read");
    service.list(&StockQuery::default()).await.expect("second read");

    assert_eq!(provider.fetch_count(), 1);
}
