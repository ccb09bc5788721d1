//! Running state survives a daemon restart.

use crate::prelude::*;
use similar_asserts::assert_eq;
use axum::http::StatusCode;

#[tokio::test]
async fn running_job_stays_running_after_restart() {
    let timer = Timer::new();
    timer.at(100).get_ok("/start/etl").await;

    let timer = timer.restart();
    let (status, body) = timer.get("/start/etl").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Error: etl already started.");

    timer.at(400).get_ok("/stop/etl").await;
    timer.settle().await;
    assert_eq!(timer.json("/stats/etl").await["Average"], json!(300.0));
}

#[tokio::test]
async fn stopped_job_can_start_after_restart() {
    let timer = Timer::new();
    timer.at(100).get_ok("/start/etl").await;
    timer.at(200).get_ok("/stop/etl").await;

    let timer = timer.restart();
    let (status, body) = timer.get("/stop/etl").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Error: etl not running.");
    timer.at(300).get_ok("/start/etl").await;
}
