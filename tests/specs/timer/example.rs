//! The canonical start/stop/history/stats walkthrough.

use crate::prelude::*;
use similar_asserts::assert_eq;
use axum::http::StatusCode;

#[tokio::test]
async fn start_stop_history_and_stats() {
    let timer = Timer::new();

    timer.at(100).get_ok("/start/etl").await;

    let (status, body) = timer.get("/start/etl").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Error: etl already started.");

    timer.at(250).get_ok("/stop/etl").await;

    assert_eq!(
        timer.json("/history/etl").await,
        json!([{"Job": "etl", "Start": 100, "Stop": 250, "Params": "{}|{}"}])
    );

    timer.settle().await;
    assert_eq!(timer.json("/stats/etl").await["Average"], json!(150.0));
}

#[tokio::test]
async fn stop_before_start_is_rejected() {
    let timer = Timer::new();

    let (status, body) = timer.get("/stop/etl").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Error: etl not running.");
    assert_eq!(timer.json("/history/etl").await, json!([]));
}

#[tokio::test]
async fn stats_track_every_completed_run() {
    let timer = Timer::new();
    for (from, to) in [(0, 100), (200, 500), (600, 700)] {
        timer.at(from).get_ok("/start/backup").await;
        timer.at(to).get_ok("/stop/backup").await;
    }
    timer.settle().await;

    let stats = timer.json("/stats/backup").await;
    let average = stats["Average"].as_f64().unwrap();
    assert!((average - 500.0 / 3.0).abs() < 1e-9, "average {average}");
    assert_eq!(stats["Median"], json!(100.0));
    // Sample standard deviation of [100, 300, 100].
    let stddev = stats["Stddev"].as_f64().unwrap();
    assert!((stddev - 115.470_053_837_925_15).abs() < 1e-6, "stddev {stddev}");
}
