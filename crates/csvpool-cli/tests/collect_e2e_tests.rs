//! End-to-end tests for the collection pipeline
//!
//! These tests run the full collector against a mock Kaggle API:
//! - keyword search pagination
//! - archive download, extraction, admission, and pooling
//! - ledger resumption across runs
//! - skipping unavailable datasets

#![allow(clippy::unwrap_used, clippy::expect_used)]

use csvpool_cli::api::{KaggleClient, KaggleCredentials};
use csvpool_cli::{Collector, CollectorConfig};
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};
use zip::write::FileOptions;
use zip::ZipWriter;

/// Build a CSV body with a header and `rows` distinct 4-column records
fn csv_body(rows: usize, seed: u64) -> String {
    let mut body = String::from("id,name,value,flag\n");
    for i in 0..rows {
        body.push_str(&format!("{},item_{},{},true\n", i, i, seed + i as u64));
    }
    body
}

/// Build an in-memory zip archive from (name, body) pairs
fn zip_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in entries {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(body.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn listing(dataset_ref: &str, total_bytes: u64) -> serde_json::Value {
    serde_json::json!({
        "ref": dataset_ref,
        "title": "Test dataset",
        "totalBytes": total_bytes,
    })
}

fn test_config(base: &Path, keyword: &str) -> CollectorConfig {
    let mut config = CollectorConfig::new();
    config.base_dir = base.to_path_buf();
    config.keywords = vec![keyword.to_string()];
    config.pages_per_keyword = 2;
    config.min_rows = 10;
    config.max_rows = 1000;
    config
}

fn test_client(base_url: &str) -> KaggleClient {
    let credentials = KaggleCredentials {
        username: "collector".to_string(),
        key: "secret".to_string(),
    };
    KaggleClient::new(base_url.to_string(), credentials).unwrap()
}

async fn mount_search(server: &MockServer, keyword: &str, listings: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/datasets/list"))
        .and(query_param("search", keyword))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listings))
        .mount(server)
        .await;

    // Second page is empty so the keyword loop terminates
    Mock::given(method("GET"))
        .and(path("/datasets/list"))
        .and(query_param("search", keyword))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_collects_admissible_files_end_to_end() {
    let mock_server = MockServer::start().await;
    let archive = zip_archive(&[
        ("train.csv", &csv_body(50, 1)),
        ("scores.csv", &csv_body(80, 2)),
        ("notes.txt", "not a csv"),
        ("tiny.csv", &csv_body(2, 3)),
    ]);

    mount_search(
        &mock_server,
        "sales",
        serde_json::json!([listing("acme/sales-2024", archive.len() as u64)]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/datasets/download/acme/sales-2024"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(archive))
        .mount(&mock_server)
        .await;

    let base = TempDir::new().unwrap();
    let config = test_config(base.path(), "sales");
    let collector = Collector::new(config.clone(), test_client(&mock_server.uri()));

    let summary = collector.run().await.unwrap();
    assert_eq!(summary.datasets_seen, 1);
    assert_eq!(summary.datasets_skipped, 0);
    // train.csv and scores.csv pass the shape bounds; tiny.csv is too short
    assert_eq!(summary.files_accepted, 2);
    assert_eq!(summary.pool_size, 2);

    let pooled: Vec<_> = std::fs::read_dir(config.pool_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(pooled.len(), 2);
    assert!(pooled.iter().all(|name| name.ends_with(".csv")));

    // Scratch space is cleaned up once the dataset is processed
    let leftovers = std::fs::read_dir(config.raw_dir()).unwrap().count();
    assert_eq!(leftovers, 0);

    let ledger = std::fs::read_to_string(config.index_path()).unwrap();
    assert!(ledger.contains("acme/sales-2024"));
    assert!(ledger.contains("sales"));
}

#[tokio::test]
async fn test_second_run_accepts_nothing_new() {
    let mock_server = MockServer::start().await;
    let archive = zip_archive(&[("metrics.csv", &csv_body(40, 7))]);

    mount_search(
        &mock_server,
        "metrics",
        serde_json::json!([listing("acme/metrics", archive.len() as u64)]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/datasets/download/acme/metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(archive))
        .mount(&mock_server)
        .await;

    let base = TempDir::new().unwrap();
    let config = test_config(base.path(), "metrics");

    let first = Collector::new(config.clone(), test_client(&mock_server.uri()))
        .run()
        .await
        .unwrap();
    assert_eq!(first.files_accepted, 1);

    let second = Collector::new(config.clone(), test_client(&mock_server.uri()))
        .run()
        .await
        .unwrap();
    assert_eq!(second.files_accepted, 0);
    assert_eq!(second.pool_size, 1);

    // Still a single header line plus one record
    let ledger = std::fs::read_to_string(config.index_path()).unwrap();
    assert_eq!(ledger.lines().count(), 2);
}

#[tokio::test]
async fn test_unavailable_dataset_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_search(
        &mock_server,
        "census",
        serde_json::json!([listing("gov/restricted", 1024)]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/datasets/download/gov/restricted"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let base = TempDir::new().unwrap();
    let config = test_config(base.path(), "census");
    let summary = Collector::new(config.clone(), test_client(&mock_server.uri()))
        .run()
        .await
        .unwrap();

    assert_eq!(summary.datasets_seen, 1);
    assert_eq!(summary.datasets_skipped, 1);
    assert_eq!(summary.files_accepted, 0);
    assert!(!config.pool_dir().join("any.csv").exists());
}

#[tokio::test]
async fn test_oversized_dataset_is_skipped_before_download() {
    let mock_server = MockServer::start().await;

    mount_search(
        &mock_server,
        "energy",
        serde_json::json!([listing("acme/giant", 10 * 1024 * 1024)]),
    )
    .await;

    // No download mock mounted; the precheck must reject before any request

    let base = TempDir::new().unwrap();
    let mut config = test_config(base.path(), "energy");
    config.max_dataset_mb = 1;
    let summary = Collector::new(config, test_client(&mock_server.uri()))
        .run()
        .await
        .unwrap();

    assert_eq!(summary.datasets_skipped, 1);
    assert_eq!(summary.files_accepted, 0);
}

#[tokio::test]
async fn test_target_max_stops_the_run() {
    let mock_server = MockServer::start().await;
    let archive_a = zip_archive(&[("alpha.csv", &csv_body(30, 11))]);
    let archive_b = zip_archive(&[("beta.csv", &csv_body(30, 12))]);

    mount_search(
        &mock_server,
        "tabular",
        serde_json::json!([
            listing("acme/alpha", archive_a.len() as u64),
            listing("acme/beta", archive_b.len() as u64),
        ]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/datasets/download/acme/alpha"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(archive_a))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/datasets/download/acme/beta"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(archive_b))
        .mount(&mock_server)
        .await;

    let base = TempDir::new().unwrap();
    let mut config = test_config(base.path(), "tabular");
    config.target_max = 1;
    let summary = Collector::new(config, test_client(&mock_server.uri()))
        .run()
        .await
        .unwrap();

    // The second dataset is never processed once the pool hits the target
    assert_eq!(summary.pool_size, 1);
    assert_eq!(summary.datasets_seen, 1);
}
