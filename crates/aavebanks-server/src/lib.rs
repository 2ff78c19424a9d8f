//! HTTP API and server-rendered dashboard page.
//!
//! Routes:
//! - `GET /`: HTML dashboard
//! - `GET /api/dashboard`: ranked banks and Aave
//! - `GET /api/aave`: Aave's normalized deposits
//! - `GET /api/banks`: extracted bank list
//! - `GET /api/health`
//!
//! Any query string (such as a `?t=` cache buster) is ignored and every
//! response is marked `no-store`: each request re-fetches both sources.

mod page;

use std::sync::Arc;

use aavebanks::api::{ApiResponse, BanksResponse, DashboardResponse, ProtocolResponse};
use aavebanks::clock::{Clock, SystemClock};
use aavebanks::{DashboardService, DisplayWindow};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use page::{render_dashboard_page, render_error_page};

fn no_store() -> [(header::HeaderName, &'static str); 1] {
    [(header::CACHE_CONTROL, "no-store")]
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    service: Arc<DashboardService>,
    window: DisplayWindow,
    clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(service: DashboardService, window: DisplayWindow) -> Self {
        Self {
            service: Arc::new(service),
            window,
            clock: Arc::new(SystemClock),
        }
    }

    /// Clock used for page refresh tokens.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

/// Builds the application router.
pub fn router(state: AppState, cors: bool) -> Router {
    let mut router = Router::new()
        .route("/", get(dashboard_page))
        .route("/api/dashboard", get(dashboard))
        .route("/api/aave", get(aave))
        .route("/api/banks", get(banks))
        .route("/api/health", get(health))
        .with_state(state);

    if cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.layer(TraceLayer::new_for_http())
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, no_store(), Json(body)).into_response()
}

/// GET /api/health
async fn health() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/dashboard
async fn dashboard(State(state): State<AppState>) -> Response {
    match state.service.dashboard().await {
        Ok(dashboard) => json_response(StatusCode::OK, DashboardResponse::from(dashboard)),
        Err(err) => {
            tracing::error!(error = %err, "dashboard request failed");
            let body: DashboardResponse = ApiResponse::error("Failed to fetch dashboard data");
            json_response(StatusCode::INTERNAL_SERVER_ERROR, body)
        }
    }
}

/// GET /api/aave
async fn aave(State(state): State<AppState>) -> Response {
    match state.service.protocol_entry().await {
        Ok(entry) => {
            let body: ProtocolResponse = ApiResponse::ok(entry);
            json_response(StatusCode::OK, body)
        }
        Err(err) => {
            tracing::error!(error = %err, "aave request failed");
            let body: ProtocolResponse = ApiResponse::error("Failed to fetch Aave data");
            json_response(StatusCode::INTERNAL_SERVER_ERROR, body)
        }
    }
}

/// GET /api/banks
async fn banks(State(state): State<AppState>) -> Response {
    match state.service.bank_list().await {
        Ok(banks) => json_response(StatusCode::OK, BanksResponse::from(banks)),
        Err(err) => {
            tracing::error!(error = %err, "banks request failed");
            let body: BanksResponse = ApiResponse::error("Failed to fetch bank data");
            json_response(StatusCode::INTERNAL_SERVER_ERROR, body)
        }
    }
}

/// GET /
async fn dashboard_page(State(state): State<AppState>) -> Response {
    match state.service.dashboard().await {
        Ok(dashboard) => {
            let html = render_dashboard_page(&dashboard, state.window, state.clock.now());
            (StatusCode::OK, no_store(), Html(html)).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "dashboard page failed");
            let html = render_error_page("Failed to fetch dashboard data", state.clock.now());
            (StatusCode::INTERNAL_SERVER_ERROR, no_store(), Html(html)).into_response()
        }
    }
}
