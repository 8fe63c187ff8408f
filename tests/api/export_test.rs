use std::{io::Cursor, sync::Arc};

use crate::common::{self, Failing, Fixture};
use actix_http::Request;
use actix_web::{http::header, http::StatusCode, test, web::Bytes};
use calamine::{open_workbook_from_rs, Reader as _, Xlsx};
use serde_json::{json, Value};
use verification_store::utils::spreadsheet::WORKSHEET_NAME;

fn store_request(batch: Value) -> Request {
    test::TestRequest::post()
        .uri("/store-results")
        .set_json(batch)
        .to_request()
}

fn download_request() -> Request {
    test::TestRequest::get().uri("/download-results").to_request()
}

/// Every row of the exported worksheet, as text.
fn read_rows(body: &Bytes) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(body.to_vec())).unwrap();
    let range = workbook.worksheet_range(WORKSHEET_NAME).unwrap();
    range
        .rows()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect()
}

#[actix_web::test]
async fn test_download_results_when_no_records_expect_not_found_and_no_file() {
    let fixture = Fixture::new();
    let app = common::initialize_app(&fixture.state).await;
    let resp = test::call_service(&app, download_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let actual: Value = test::read_body_json(resp).await;
    assert_eq!(actual["error"], "No results found");
    assert!(fixture.export_files().is_empty());
}

#[actix_web::test]
async fn test_download_results_when_records_expect_spreadsheet() {
    let fixture = Fixture::new();
    let app = common::initialize_app(&fixture.state).await;
    let batch = json!([
        { "name": "Asha Verma", "uid": "1234 5678 9012", "address": "12 MG Road, Pune",
          "final_remark": "Matched (processed 2 images)", "document_type": "Aadhaar" },
        { "name": "R. Iyer", "final_remark": "Low match score", "document_type": "Aadhaar" },
        { "final_remark": "Non Aadhaar", "document_type": "Non-Aadhaar" }
    ]);
    let resp = test::call_service(&app, store_request(batch)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(&app, download_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let headers = resp.headers();
    assert_eq!(
        headers.get(header::CONTENT_TYPE).unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        headers.get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"verification_results.xlsx\""
    );
    let body = test::read_body(resp).await;
    let rows = read_rows(&body);

    assert_eq!(
        rows[0],
        ["Name", "UID", "Address", "Final Remark", "Document Type", "Timestamp"]
    );
    assert_eq!(rows.len() - 1, 3);
    assert_eq!(rows[1][0], "Asha Verma");
    assert_eq!(rows[1][3], "Matched (processed 2 images)");
    assert_eq!(rows[2][1], "");
    assert_eq!(rows[3][4], "Non-Aadhaar");
    assert!(fixture.export_files().is_empty());
}

#[actix_web::test]
async fn test_download_results_when_concurrent_expect_both_succeed() {
    let fixture = Fixture::new();
    let app = common::initialize_app(&fixture.state).await;
    let batch = json!([{ "name": "A" }, { "name": "B" }]);
    test::call_service(&app, store_request(batch)).await;

    let (first, second) = futures::join!(
        test::call_service(&app, download_request()),
        test::call_service(&app, download_request())
    );
    for resp in [first, second] {
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(read_rows(&body).len(), 3);
    }
    assert!(fixture.export_files().is_empty());
}

#[actix_web::test]
async fn test_download_results_when_export_dir_unwritable_expect_server_error() {
    let mut fixture = Fixture::new();
    let blocker = fixture.state.export_dir.with_file_name("not-a-directory");
    std::fs::write(&blocker, b"").unwrap();
    fixture.state.export_dir = blocker.join("uploads");
    let app = common::initialize_app(&fixture.state).await;
    test::call_service(&app, store_request(json!([{ "name": "A" }]))).await;

    let resp = test::call_service(&app, download_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let actual: Value = test::read_body_json(resp).await;
    assert_eq!(actual["error"], "Error generating spreadsheet");
}

#[actix_web::test]
async fn test_download_results_when_no_database_expect_server_error() {
    let state = common::state_with(None);
    let app = common::initialize_app(&state).await;
    let resp = test::call_service(&app, download_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn test_download_results_when_store_fails_expect_server_error() {
    let state = common::state_with(Some(Arc::new(Failing)));
    let app = common::initialize_app(&state).await;
    let resp = test::call_service(&app, download_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
