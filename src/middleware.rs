use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use log::{debug, info};

/// Log each request; asset and favicon fetches are only logged at debug level
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let quiet = path.starts_with("/static/") || path == "/favicon.ico";
    if !quiet {
        info!("Request: {} {}", method, path);
    }

    let start = Instant::now();
    let response = next.run(request).await;
    debug!(
        "{} {} -> {} in {:?}",
        method,
        path,
        response.status(),
        start.elapsed()
    );
    response
}
