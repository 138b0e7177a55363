//! Behavior-driven tests for the local series cache
//!
//! These tests verify WHAT lands on disk after a fetch and how cached files
//! are read back, focusing on user-visible outcomes.

use std::fs;

use stockdash_core::{
    ErrorKind, FixtureSource, Market, PricePoint, PriceSeries, PriceSource, SeriesStore, Ticker,
    TradeDate,
};
use tempfile::tempdir;

fn two_sessions() -> PriceSeries {
    PriceSeries::new(vec![
        PricePoint::new(
            TradeDate::parse("2024-01-02").expect("date"),
            100.0,
            103.0,
            99.0,
            102.0,
            1_000,
        )
        .expect("point"),
        PricePoint::new(
            TradeDate::parse("2024-01-03").expect("date"),
            102.0,
            103.5,
            98.0,
            99.0,
            500,
        )
        .expect("point"),
    ])
    .expect("series")
}

#[test]
fn when_series_is_persisted_it_is_one_record_per_session() {
    // Given: an empty data directory
    let temp = tempdir().expect("tempdir");
    let store = SeriesStore::new(temp.path().join("cache"));
    let ticker = Ticker::parse("wipro").expect("valid");

    // When: a two-session series is persisted
    let path = store.persist(&two_sessions(), &ticker).expect("persist");

    // Then: the file is named after the ticker and holds a record array
    assert_eq!(path, temp.path().join("cache").join("WIPRO_data.json"));
    let raw = fs::read_to_string(&path).expect("read");
    let records: serde_json::Value = serde_json::from_str(&raw).expect("json");
    let records = records.as_array().expect("array of records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["date"], "2024-01-02");
    assert_eq!(records[0]["open"], 100.0);
    assert_eq!(records[0]["close"], 102.0);
    assert_eq!(records[1]["volume"], 500);
}

#[test]
fn when_cached_file_is_loaded_the_same_series_comes_back() {
    let temp = tempdir().expect("tempdir");
    let store = SeriesStore::new(temp.path());
    let ticker = Ticker::parse("ITC").expect("valid");
    let series = two_sessions();

    store.persist(&series, &ticker).expect("persist");
    let loaded = store.load(&ticker).expect("load").expect("cached");

    assert_eq!(loaded, series);
}

#[tokio::test]
async fn when_user_fetches_again_the_cache_is_replaced() {
    // Given: a cached two-session history
    let temp = tempdir().expect("tempdir");
    let store = SeriesStore::new(temp.path());
    let ticker = Ticker::parse("SBIN").expect("valid");
    store.persist(&two_sessions(), &ticker).expect("persist");

    // When: a longer history is fetched and persisted under the same ticker
    let fetched = FixtureSource::new(25)
        .fetch_series(&ticker, Market::Nse)
        .await
        .expect("fixture");
    store.persist(&fetched, &ticker).expect("persist");

    // Then: only the newest history is on disk
    let loaded = store.load(&ticker).expect("load").expect("cached");
    assert_eq!(loaded.len(), 25);
    assert_eq!(loaded, fetched);
}

#[test]
fn when_nothing_is_cached_load_returns_none() {
    let temp = tempdir().expect("tempdir");
    let store = SeriesStore::new(temp.path());

    let loaded = store
        .load(&Ticker::parse("NEVER").expect("valid"))
        .expect("missing file is not an error");

    assert!(loaded.is_none());
}

#[test]
fn when_cached_file_is_corrupt_the_error_is_unexpected() {
    let temp = tempdir().expect("tempdir");
    let store = SeriesStore::new(temp.path());
    let ticker = Ticker::parse("BAD").expect("valid");
    fs::write(store.path_for(&ticker), "{not json").expect("write");

    let error = store.load(&ticker).expect_err("corrupt cache");

    assert_eq!(error.kind(), ErrorKind::Unexpected);
}

#[test]
fn when_cached_dates_are_out_of_order_the_file_is_rejected() {
    let temp = tempdir().expect("tempdir");
    let store = SeriesStore::new(temp.path());
    let ticker = Ticker::parse("SWAP").expect("valid");
    fs::write(
        store.path_for(&ticker),
        r#"[
            {"date":"2024-01-03","open":1.0,"high":1.0,"low":1.0,"close":1.0,"volume":1},
            {"date":"2024-01-02","open":1.0,"high":1.0,"low":1.0,"close":1.0,"volume":1}
        ]"#,
    )
    .expect("write");

    assert!(store.load(&ticker).is_err());
}

#[test]
fn when_data_dir_cannot_be_created_persisting_fails_unexpectedly() {
    // Given: a data directory path that is actually a file
    let temp = tempdir().expect("tempdir");
    let blocker = temp.path().join("not-a-dir");
    fs::write(&blocker, "occupied").expect("write");
    let store = SeriesStore::new(&blocker);

    // When: a series is persisted
    let error = store
        .persist(&two_sessions(), &Ticker::parse("ONGC").expect("valid"))
        .expect_err("must fail");

    // Then: the failure is reported as unexpected
    assert_eq!(error.kind(), ErrorKind::Unexpected);
}
