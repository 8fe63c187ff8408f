//! A central place to register App routes.
use std::sync::Arc;

use actix_service::ServiceFactory;
use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    error, web, App, Error, HttpRequest, HttpResponse,
};

use crate::server::errors::HTTPError;

use super::{
    export::{download_results, get_results},
    health::health,
    ingest::store_results,
    state::Global,
};

/// Central place to register all the App routing.
///
/// The state is shared with every handler as `web::Data<Arc<dyn Global>>`.
#[tracing::instrument(skip(app, state, json_limit))]
pub fn register_app<
    T: Global + Clone + 'static,
    U: MessageBody,
    V: ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<U>,
        Config = (),
        InitError = (),
        Error = Error,
    >,
>(
    app: App<V>,
    state: &T,
    json_limit: usize,
) -> App<V> {
    let data_state: Arc<dyn Global> = Arc::new(state.clone());
    app.app_data(web::Data::new(data_state))
        .app_data(json_config(json_limit))
        .service(
            web::resource("/store-results")
                .route(web::post().to(store_results))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/get-results")
                .route(web::get().to(get_results))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/download-results")
                .route(web::get().to(download_results))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/health")
                .route(web::get().to(health))
                .default_service(web::to(method_not_allowed)),
        )
        .default_service(web::to(not_found))
}

/// JSON extractor settings: body size limit, and JSON error bodies for unreadable payloads.
fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
            let details = err.to_string();
            tracing::warn!("Rejected request body: {details}");
            HTTPError::InvalidBody(details).into()
        })
}

/// Fallback for unknown routes.
async fn not_found(req: HttpRequest) -> Result<HttpResponse, HTTPError> {
    tracing::debug!("No route for {} {}", req.method(), req.path());
    Err(HTTPError::RouteNotFound)
}

/// Fallback for known routes called with a method they don't serve.
async fn method_not_allowed(req: HttpRequest) -> Result<HttpResponse, HTTPError> {
    tracing::debug!("{} not allowed on {}", req.method(), req.path());
    Err(HTTPError::MethodNotAllowed(req.method().to_string()))
}
