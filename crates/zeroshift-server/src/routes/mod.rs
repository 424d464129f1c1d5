//! HTTP routes for the Zero Shift site.
//!
//! The JSON API lives under `/api`; every other path falls through to the
//! static SPA bundle (the client router owns `/`, `/products`, `/services`,
//! `/how-we-work`, and `/careers`).

use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod contact;
pub mod content;
pub mod health;
pub mod site;

/// Build the full application router.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(contact::router())
        .merge(content::router())
        .merge(health::router());

    // The API is consumed same-origin in production, but the SPA dev server
    // runs on its own port.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .nest("/api", api)
        .fallback_service(site::service(&state.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .with_state(state)
}
