//! Status reports running jobs with their expected stop.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test]
async fn status_reports_only_running_jobs() {
    let timer = Timer::new();
    timer.at(0).get_ok("/start/etl").await;
    timer.at(150).get_ok("/stop/etl").await;
    timer.settle().await;

    timer.at(1_000).get_ok("/start/etl?host=a").await;
    timer.at(2_000).get_ok("/start/report").await;
    timer.at(3_000).get_ok("/start/done").await;
    timer.at(3_500).get_ok("/stop/done").await;

    assert_eq!(
        timer.json("/status").await,
        json!([
            {
                "Job": "etl",
                "Start": 1000,
                "Average": 150.0,
                "ExpectedStop": 1150,
                "Params": r#"{"host":["a"]}"#,
            },
            {
                "Job": "report",
                "Start": 2000,
                "Average": null,
                "ExpectedStop": null,
                "Params": "{}",
            },
        ])
    );
}

#[tokio::test]
async fn status_is_empty_when_nothing_runs() {
    let timer = Timer::new();
    assert_eq!(timer.json("/status").await, json!([]));
}
