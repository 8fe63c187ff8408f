use std::sync::Arc;

use crate::common::{self, Failing, Fixture};
use actix_web::{http::StatusCode, test};
use chrono::DateTime;
use serde_json::{json, Value};

#[actix_web::test]
async fn test_get_results_after_store_expect_round_trip() {
    let fixture = Fixture::new();
    let app = common::initialize_app(&fixture.state).await;
    let submitted = json!({
        "name": "A",
        "uid": "1",
        "address": "X",
        "final_remark": "ok",
        "document_type": "passport"
    });
    let req = test::TestRequest::post()
        .uri("/store-results")
        .set_json(json!([submitted.clone()]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/get-results").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let actual: Vec<Value> = test::read_body_json(resp).await;
    assert_eq!(actual.len(), 1);
    let record = &actual[0];
    for field in ["name", "uid", "address", "final_remark", "document_type"] {
        assert_eq!(record[field], submitted[field], "field {field}");
    }
    let timestamp = record["timestamp"].as_str().unwrap();
    assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert_eq!(record["_id"].as_str().unwrap().len(), 24);
}

#[actix_web::test]
async fn test_get_results_after_two_batches_expect_all_records() {
    let fixture = Fixture::new();
    let app = common::initialize_app(&fixture.state).await;
    for batch in [json!([{ "uid": "1" }, { "uid": "2" }]), json!([{ "uid": "3" }])] {
        let req = test::TestRequest::post()
            .uri("/store-results")
            .set_json(batch)
            .to_request();
        test::call_service(&app, req).await;
    }
    let req = test::TestRequest::get().uri("/get-results").to_request();
    let actual: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    let mut uids: Vec<&str> = actual
        .iter()
        .map(|record| record["uid"].as_str().unwrap())
        .collect();
    uids.sort_unstable();
    assert_eq!(uids, ["1", "2", "3"]);
}

#[actix_web::test]
async fn test_get_results_when_empty_expect_empty_array() {
    let fixture = Fixture::new();
    let app = common::initialize_app(&fixture.state).await;
    let req = test::TestRequest::get().uri("/get-results").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let actual: Vec<Value> = test::read_body_json(resp).await;
    assert!(actual.is_empty());
}

#[actix_web::test]
async fn test_get_results_when_no_database_expect_server_error() {
    let state = common::state_with(None);
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::get().uri("/get-results").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn test_get_results_when_store_fails_expect_server_error() {
    let state = common::state_with(Some(Arc::new(Failing)));
    let app = common::initialize_app(&state).await;
    let req = test::TestRequest::get().uri("/get-results").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let actual: Value = test::read_body_json(resp).await;
    assert_eq!(actual["error"], "Error fetching results");
}
