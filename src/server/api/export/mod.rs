//! Handlers for reading verification results back: as JSON, or as a spreadsheet download.
//!
//! A download goes through `fetching -> rendering -> writing_file -> streaming -> cleanup`.
//! Any step may fail, there are no retries. The spreadsheet is written to a file unique to
//! the request and removed before the response is returned.
use std::{path::Path, sync::Arc};

use actix_web::{web, HttpResponse};

use crate::{
    db::models::verification_result::{Manager, VerificationResult},
    server::errors::HTTPError,
    utils::{
        http::{attachment, get_contenttype},
        spreadsheet::{self, ExportFile, EXPORT_FILE_NAME},
    },
};

use super::state::Global;

/// Module that maps the HTTP web response to structs.
pub mod response;

/// List every stored verification result.
///
/// # Errors
/// `500` if no database is connected or the read fails.
#[tracing::instrument(name = "Listing verification results", skip(data))]
pub async fn get_results(data: web::Data<Arc<dyn Global>>) -> Result<HttpResponse, HTTPError> {
    let results = fetch(data.db()).await?;
    tracing::debug!("Found {} results", results.len());
    let body: Vec<response::VerificationResult> = results.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Download every stored verification result as an `.xlsx` spreadsheet.
///
/// # Errors
/// `404` if there are no results, `500` if no database is connected,
/// the read fails or the spreadsheet can't be built.
#[tracing::instrument(name = "Exporting verification results", skip(data))]
pub async fn download_results(
    data: web::Data<Arc<dyn Global>>,
) -> Result<HttpResponse, HTTPError> {
    tracing::debug!(state = "fetching");
    let results = fetch(data.db()).await?;
    if results.is_empty() {
        tracing::warn!("No results to export");
        return Err(HTTPError::NotFound);
    }
    let export_dir = data.export_dir().to_path_buf();
    let content = web::block(move || build_export(&results, &export_dir))
        .await
        .map_err(|err| HTTPError::Render(err.to_string()))??;
    tracing::debug!(state = "streaming", bytes = content.len());
    Ok(HttpResponse::Ok()
        .insert_header(get_contenttype(EXPORT_FILE_NAME))
        .insert_header(attachment(EXPORT_FILE_NAME))
        .body(content))
}

/// Read all results from the connected store.
async fn fetch(db: Option<&dyn Manager>) -> Result<Vec<VerificationResult>, HTTPError> {
    let Some(db) = db else {
        tracing::error!("No database connection");
        return Err(HTTPError::DatabaseUnavailable);
    };
    db.find_all().await.map_err(|err| {
        tracing::error!("Failed to fetch results: {err:#}");
        HTTPError::Fetch(format!("{err:#}"))
    })
}

/// Render `results`, write them under `dir`, and read the file back.
/// The file is gone by the time this returns, successfully or not.
fn build_export(results: &[VerificationResult], dir: &Path) -> Result<Vec<u8>, HTTPError> {
    tracing::debug!(state = "rendering", rows = results.len());
    let mut workbook = spreadsheet::render(results).map_err(|err| {
        tracing::error!("Failed to render spreadsheet: {err}");
        HTTPError::Render(err.to_string())
    })?;
    tracing::debug!(state = "writing_file");
    let file = ExportFile::write(dir, &mut workbook).map_err(|err| {
        tracing::error!("Failed to write spreadsheet: {err:#}");
        HTTPError::Render(format!("{err:#}"))
    })?;
    let content = file.read().map_err(|err| {
        tracing::error!("Failed to read back {}: {err}", file.path().display());
        HTTPError::Render(err.to_string())
    })?;
    tracing::debug!(state = "cleanup");
    file.close();
    Ok(content)
}
