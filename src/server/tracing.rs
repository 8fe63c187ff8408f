//! Request spans for the results server

use std::time::{Duration, Instant};

use actix_web::{
    dev::{ServiceRequest, ServiceResponse},
    HttpMessage,
};
use tracing_actix_web::{DefaultRootSpanBuilder, RootSpanBuilder};

/// Requests taking longer than this are logged at `warn`.
/// Exports of large collections are the usual culprit.
const SLOW_REQUEST: Duration = Duration::from_secs(5);

/// Root span carrying request timings and a `slow` flag
pub struct ResultsRootSpanBuilder;

/// When the request entered the middleware
struct RequestStart(Instant);

/// Whether a request that took `elapsed` counts as slow.
fn is_slow(elapsed: Duration) -> bool {
    elapsed > SLOW_REQUEST
}

impl RootSpanBuilder for ResultsRootSpanBuilder {
    fn on_request_start(request: &ServiceRequest) -> tracing::Span {
        request.extensions_mut().insert(RequestStart(Instant::now()));

        tracing_actix_web::root_span!(
            request,
            duration_ms = tracing::field::Empty,
            duration_ns = tracing::field::Empty,
            slow = tracing::field::Empty,
        )
    }

    fn on_request_end<B: actix_web::body::MessageBody>(
        span: tracing::Span,
        outcome: &Result<ServiceResponse<B>, actix_web::Error>,
    ) {
        if let Ok(response) = outcome.as_ref() {
            let request = response.request();
            if let Some(start) = request.extensions().get::<RequestStart>() {
                let elapsed = start.0.elapsed();
                let slow = is_slow(elapsed);
                span.record("duration_ms", elapsed.as_millis());
                span.record("duration_ns", elapsed.as_nanos());
                span.record("slow", slow);
                if slow {
                    tracing::warn!(
                        duration_ms = elapsed.as_millis(),
                        method = %request.method(),
                        route = request.match_pattern().as_deref().unwrap_or("unmatched"),
                        status = response.status().as_u16(),
                        "Slow HTTP request"
                    );
                }
            }
        }
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}
