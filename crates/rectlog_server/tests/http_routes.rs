use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use rectlog_core::db::{open_db, open_db_in_memory};
use rectlog_core::{RecordRepository, SharedRecordStore};
use rectlog_server::api::{list_records, submit_rects};
use rectlog_server::{AppState, RecordView, ACCEPTED_MESSAGE};
use std::collections::HashSet;

fn memory_state() -> (AppState, SharedRecordStore) {
    let store = SharedRecordStore::new(open_db_in_memory().unwrap());
    (AppState::new(store.clone()), store)
}

async fn post(state: &AppState, body: &str) -> (StatusCode, serde_json::Value) {
    match submit_rects(State(state.clone()), Bytes::from(body.to_string())).await {
        Ok((status, body)) => (status, serde_json::to_value(body.0).unwrap()),
        Err((status, body)) => (status, serde_json::to_value(body.0).unwrap()),
    }
}

async fn get_all(state: &AppState) -> Vec<RecordView> {
    let (status, body) = list_records(State(state.clone())).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    body.0
}

#[tokio::test]
async fn matching_candidate_is_acknowledged_and_stored() {
    let (state, store) = memory_state();
    let started_at = Utc::now();

    let (status, body) = post(
        &state,
        r#"{"main": {"x": 0, "y": 0, "width": 10, "height": 10},
            "input": [{"x": 5, "y": 5, "width": 10, "height": 10},
                      {"x": 100, "y": 100, "width": 1, "height": 1}]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "message": ACCEPTED_MESSAGE }));
    assert_eq!(store.count_records().unwrap(), 1);

    let records = get_all(&state).await;
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(
        (record.x, record.y, record.width, record.height),
        (5, 5, 10, 10)
    );
    assert!(record.time >= started_at);
}

#[tokio::test]
async fn submission_without_matches_is_still_acknowledged() {
    let (state, store) = memory_state();

    let (status, body) = post(
        &state,
        r#"{"main": {"x": 0, "y": 0, "width": 1, "height": 1}, "input": []}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], ACCEPTED_MESSAGE);
    assert_eq!(store.count_records().unwrap(), 0);
}

#[tokio::test]
async fn missing_candidate_width_is_rejected_without_storing() {
    let (state, store) = memory_state();

    let (status, body) = post(
        &state,
        r#"{"main": {"x": 0, "y": 0, "width": 10, "height": 10},
            "input": [{"x": 1, "y": 1, "width": 1, "height": 1},
                      {"x": 5, "y": 5, "height": 10}]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("width"), "unexpected error: {message}");
    assert_eq!(store.count_records().unwrap(), 0);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let (state, _store) = memory_state();

    for body in ["", "not json", r#"{"main": [1, 2]}"#, "[]"] {
        let (status, reply) = post(&state, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?} should be rejected");
        assert!(!reply["error"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn missing_main_is_rejected() {
    let (state, _store) = memory_state();

    let (status, body) = post(&state, r#"{"input": []}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "field `main` is required");
}

#[tokio::test]
async fn get_returns_every_inserted_record() {
    let (state, _store) = memory_state();
    let started_at = Utc::now();

    let mut expected = HashSet::new();
    for i in 0..4 {
        let body = format!(
            r#"{{"main": {{"x": 0, "y": 0, "width": 10, "height": 10}},
                "input": [{{"x": {i}, "y": {i}, "width": 2, "height": 3}}]}}"#
        );
        let (status, _) = post(&state, &body).await;
        assert_eq!(status, StatusCode::OK);
        expected.insert((i, i, 2, 3));
    }

    let records = get_all(&state).await;
    assert_eq!(records.len(), 4);
    let actual: HashSet<(i64, i64, i64, i64)> = records
        .iter()
        .map(|record| (record.x, record.y, record.width, record.height))
        .collect();
    assert_eq!(actual, expected);
    assert!(records.iter().all(|record| record.time >= started_at));
}

#[tokio::test]
async fn repeated_get_is_stable() {
    let (state, _store) = memory_state();
    post(
        &state,
        r#"{"main": {"x": 0, "y": 0, "width": 10, "height": 10},
            "input": [{"x": 10, "y": 0, "width": 5, "height": 5}]}"#,
    )
    .await;

    let first = get_all(&state).await;
    let second = get_all(&state).await;
    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
}

#[tokio::test]
async fn get_on_empty_store_returns_empty_list() {
    let (state, _store) = memory_state();
    assert!(get_all(&state).await.is_empty());
}

#[tokio::test]
async fn get_reports_store_failure_as_server_error() {
    let (state, _store) = memory_state();
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE match_records;").unwrap();
    let broken = AppState::new(SharedRecordStore::new(conn));

    let (status, body) = list_records(State(broken)).await.unwrap_err();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.0.error.is_empty());

    assert!(get_all(&state).await.is_empty());
}

#[tokio::test]
async fn insert_failures_keep_the_success_contract() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE match_records;").unwrap();
    let state = AppState::new(SharedRecordStore::new(conn));

    let (status, body) = post(
        &state,
        r#"{"main": {"x": 0, "y": 0, "width": 10, "height": 10},
            "input": [{"x": 1, "y": 1, "width": 1, "height": 1}]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], ACCEPTED_MESSAGE);
}

#[tokio::test]
async fn records_persist_across_store_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inputs.db");

    {
        let state = AppState::new(SharedRecordStore::new(open_db(&path).unwrap()));
        let (status, _) = post(
            &state,
            r#"{"main": {"x": 0, "y": 0, "width": 10, "height": 10},
                "input": [{"x": 2, "y": 3, "width": 4, "height": 5}]}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let reopened = AppState::new(SharedRecordStore::new(open_db(&path).unwrap()));
    let records = get_all(&reopened).await;
    assert_eq!(records.len(), 1);
    assert_eq!(
        (records[0].x, records[0].y, records[0].width, records[0].height),
        (2, 3, 4, 5)
    );
}
