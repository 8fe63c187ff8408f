//! Liveness endpoint.
use actix_web::HttpResponse;
use serde_json::json;

/// Report that the server is accepting requests. Does not touch the database.
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
