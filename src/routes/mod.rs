//! Route definitions for the Kontor API.

pub mod companies;
pub mod dashboard;
pub mod health;

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Assemble the application router.
///
/// The summary route carries a time-based `Cache-Control` hint so edge
/// proxies and browsers may reuse a recent payload; nothing is cached
/// server-side.
pub fn router(state: AppState) -> Router {
    let cache_hint = SetResponseHeaderLayer::overriding(
        header::CACHE_CONTROL,
        cache_control_value(state.config.dashboard_revalidate_secs),
    );

    let origin = match state.config.frontend_url.parse::<HeaderValue>() {
        Ok(value) => AllowOrigin::exact(value),
        Err(_) => AllowOrigin::any(),
    };
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .route(
            "/api/dashboard/summary",
            get(dashboard::summary).layer(cache_hint),
        )
        .route("/api/companies", get(companies::list))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cache_control_value(revalidate_secs: u32) -> HeaderValue {
    HeaderValue::from_str(&format!("private, max-age={revalidate_secs}"))
        .unwrap_or_else(|_| HeaderValue::from_static("private, max-age=60"))
}
