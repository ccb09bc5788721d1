//! History lookups match job names by prefix.

use crate::prelude::*;
use similar_asserts::assert_eq;

async fn jobs_in(timer: &Timer, uri: &str) -> Vec<String> {
    let history = timer.json(uri).await;
    history.as_array().unwrap().iter().map(|r| r["Job"].as_str().unwrap().to_string()).collect()
}

#[tokio::test]
async fn history_includes_jobs_sharing_the_prefix() {
    let timer = Timer::new();
    timer.at(10).get_ok("/start/build").await;
    timer.at(20).get_ok("/start/build-release").await;
    timer.at(30).get_ok("/start/deploy").await;

    assert_eq!(jobs_in(&timer, "/history/build").await, vec!["build", "build-release"]);
    assert_eq!(jobs_in(&timer, "/history/build-release").await, vec!["build-release"]);
    assert_eq!(jobs_in(&timer, "/history/deploy").await, vec!["deploy"]);
}

#[tokio::test]
async fn history_lists_open_and_closed_runs_in_start_order() {
    let timer = Timer::new();
    timer.at(10).get_ok("/start/etl").await;
    timer.at(20).get_ok("/stop/etl").await;
    timer.at(30).get_ok("/start/etl?batch=2").await;

    assert_eq!(
        timer.json("/history/etl").await,
        json!([
            {"Job": "etl", "Start": 10, "Stop": 20, "Params": "{}|{}"},
            {"Job": "etl", "Start": 30, "Stop": -1, "Params": r#"{"batch":["2"]}"#},
        ])
    );
}

#[tokio::test]
async fn nested_job_names_use_the_whole_path() {
    let timer = Timer::new();
    timer.at(10).get_ok("/start/team/etl/nightly").await;

    assert_eq!(jobs_in(&timer, "/history/team/etl").await, vec!["team/etl/nightly"]);
    assert_eq!(jobs_in(&timer, "/history/team/deploy").await, Vec::<String>::new());
}
