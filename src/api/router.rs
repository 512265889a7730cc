//! Dashboard API router.
//!
//! Returns a composable `Router`: the JSON API under `/api/`, built
//! dashboard assets as the fallback. Login, signup and the health
//! check are open; everything else requires a bearer token and is
//! role-gated inside the handlers (mirroring the backend's own
//! per-route role checks).

use axum::http::{header, HeaderValue};
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::config;

/// Build the dashboard router.
pub fn dashboard_router(ctx: ApiContext) -> Router {
    // Protected routes — bearer token required, roles checked per
    // handler. API responses must never be cached by the browser.
    let protected = Router::new()
        .route("/profile", get(endpoints::profile::whoami))
        // Doctor
        .route("/doctor/search", post(endpoints::doctor::search))
        .route("/doctor/alternatives", post(endpoints::doctor::alternatives))
        .route("/doctor/appointments", get(endpoints::doctor::appointments))
        .route("/doctor/mark-handled", post(endpoints::doctor::mark_handled))
        .route(
            "/doctor/prescriptions",
            post(endpoints::doctor::create_prescription),
        )
        // Production operators
        .route("/production/search", post(endpoints::production::search))
        .route("/production/check", post(endpoints::production::check))
        .route("/production/flagged", get(endpoints::production::flagged))
        .route(
            "/production/flagged/:drugname",
            delete(endpoints::production::dismiss),
        )
        // Production managers
        .route("/manager/flagged", get(endpoints::manager::flagged))
        .route(
            "/manager/flagged/:drugname/suppress",
            post(endpoints::manager::suppress),
        )
        .route(
            "/manager/flagged/:drugname/unsuppress",
            post(endpoints::manager::unsuppress),
        )
        .route(
            "/manager/flagged/:drugname/hide",
            post(endpoints::manager::hide),
        )
        .route(
            "/manager/flagged/:drugname/unhide",
            post(endpoints::manager::unhide),
        )
        .route(
            "/manager/flagged/:drugname/alternatives",
            put(endpoints::manager::set_alternatives),
        )
        .route("/manager/operators", post(endpoints::manager::add_operator))
        .route(
            "/manager/operators/:username",
            delete(endpoints::manager::delete_operator),
        )
        // Nurse
        .route("/nurse/profile", get(endpoints::nurse::profile))
        .route("/nurse/appointments", get(endpoints::nurse::appointments))
        .route(
            "/nurse/forward/:patient_username",
            post(endpoints::nurse::forward),
        )
        // Patient
        .route(
            "/patient/profile",
            get(endpoints::patient::profile).put(endpoints::patient::update_profile),
        )
        .route(
            "/patient/appointments",
            get(endpoints::patient::appointments).post(endpoints::patient::book_appointment),
        )
        // Admin
        .route("/admin/staff", post(endpoints::admin::add_staff))
        .route(
            "/admin/staff/:username",
            delete(endpoints::admin::delete_doctor),
        )
        .route("/admin/managers", post(endpoints::admin::add_manager))
        .route("/admin/drugs", post(endpoints::admin::add_drug))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    // Unprotected routes
    let unprotected = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/auth/login", post(endpoints::auth::login))
        .route("/patient/signup", post(endpoints::patient::signup))
        .with_state(ctx);

    // Dev dashboard origins; in production the assets are served
    // same-origin from `ui_assets_dir` and CORS never triggers.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ]))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", protected)
        .nest("/api", unprotected)
        .fallback_service(ServeDir::new(config::ui_assets_dir()))
        .layer(cors)
}
