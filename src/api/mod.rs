//! REST API module using Axum
//!
//! Provides HTTP endpoints for the maintenance KPI dashboard:
//! - `/api/v1/*` JSON endpoints wrapped in a consistent envelope
//! - `/health` liveness probe
//! - the single-page dashboard (embedded HTML) for every other path

pub mod envelope;
pub mod handlers;
mod routes;

pub use handlers::DashboardState;

use axum::http::{header, Method};
use axum::response::Html;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Dashboard page (embedded at compile time)
const DASHBOARD_HTML: &str = include_str!("../../static/dashboard.html");

/// Environment variable listing allowed cross-origin callers.
const CORS_ORIGINS_ENV: &str = "MAINTENANCE_CORS_ORIGINS";

async fn serve_dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// Build a CORS layer that is restrictive by default (same-origin only).
///
/// Set `MAINTENANCE_CORS_ORIGINS` to a comma-separated list of allowed origins
/// for development (e.g., `http://localhost:5173`).
fn build_cors_layer() -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);
    match std::env::var(CORS_ORIGINS_ENV) {
        Ok(origins) => {
            let allowed: Vec<_> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            tracing::info!(origins = %origins, "CORS: allowing configured origins");
            base.allow_origin(allowed)
        }
        // Dashboard is same-origin
        Err(_) => base,
    }
}

/// Create the complete application router with API and page serving.
pub fn create_app(state: DashboardState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes(state.clone()))
        .merge(routes::health_routes(state))
        .fallback(serve_dashboard)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(build_cors_layer())
}

#[cfg(test)]
mod tests {
    use super::DASHBOARD_HTML;

    /// Machine ids and error messages come from CSV and API data.
    #[test]
    fn test_page_never_interpolates_raw_data_into_markup() {
        for raw in [
            "${o}",
            "${m}",
            "${r.machine}",
            "${b.machine}",
            "${p.machine}",
            "${c.title}",
            "${e.message}",
        ] {
            assert!(!DASHBOARD_HTML.contains(raw), "unescaped {raw} in dashboard page");
        }
        assert!(DASHBOARD_HTML.contains("const esc = (v)"));
        assert!(DASHBOARD_HTML.contains("err.textContent = e.message"));
        assert!(!DASHBOARD_HTML.contains("insertAdjacentHTML"));
    }

    #[test]
    fn test_bar_heights_are_scaled_by_a_nonzero_max() {
        assert!(DASHBOARD_HTML.contains("Math.max(1, ...c.bars.map((b) => b.value))"));
    }
}
