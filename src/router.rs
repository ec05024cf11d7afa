use axum::{middleware, routing::get, Router};

use crate::handlers;
use crate::middleware::log_requests;
use crate::types::AppState;

/// Build the wiki router.
///
/// Page operations go through the fallback so that every path outside the
/// listing and static routes is validated by the same parser.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_index))
        .route("/index", get(handlers::handle_index))
        .route("/static/*path", get(handlers::handle_static))
        .fallback(handlers::handle_page)
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}
