//! Handler for storing batches of verification results.
use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::db::models::verification_result;
use crate::server::errors::HTTPError;

use super::state::Global;

/// Module that maps the HTTP web request body to structs.
pub mod request;

/// Module that maps the HTTP web response to structs.
pub mod response;

/// Store a batch of verification results.
///
/// Responds `201` with the number of inserted results. Re-submitting a batch stores it again.
///
/// # Errors
/// `500` if no database is connected, an element is malformed or the insert fails;
/// `400` if the body is not a non-empty array.
#[tracing::instrument(name = "Storing verification results", skip(data, body))]
pub async fn store_results(
    data: web::Data<Arc<dyn Global>>,
    body: web::Json<Value>,
) -> Result<HttpResponse, HTTPError> {
    let Some(db) = data.db() else {
        tracing::error!("No database connection");
        return Err(HTTPError::DatabaseUnavailable);
    };
    let records = request::parse_batch(body.into_inner()).inspect_err(|err| {
        tracing::warn!("Rejected batch: {}", err.details());
    })?;
    let submitted = records.len();
    let inserted_count = verification_result::insert_batch(db, records)
        .await
        .map_err(|err| {
            tracing::error!("Failed to store {submitted} results: {err}");
            HTTPError::from(err)
        })?;
    tracing::info!("Stored {inserted_count} verification results");
    Ok(HttpResponse::Created().json(response::Stored::new(inserted_count)))
}
