//! Route configuration and setup

use crate::auth::middleware::auth_middleware;
use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, patch, post, put},
    Router,
};
use lodgera_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    let public_routes = public_routes();

    let protected_routes = protected_routes().layer(axum::middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    let app = public_routes
        .merge(protected_routes)
        .nest_service("/uploads", ServeDir::new(&config.uploads_dir))
        .layer(RequestBodyLimitLayer::new(config.max_receipt_size_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let cors = if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins.iter().map(|o| o.parse()).collect();

        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}

/// Public routes (no authentication required)
fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/rooms/list", get(handlers::rooms::list))
}

/// Protected routes (require a bearer token)
fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(tenant_routes())
        .merge(room_routes())
        .merge(payment_routes())
        .merge(expense_routes())
        .merge(user_routes())
        .route("/api/client/dashboard", get(handlers::auth::client_dashboard))
        .route("/api/admin/stats", get(handlers::stats::stats))
}

fn tenant_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/tenants/all", get(handlers::tenants::all))
        .route("/api/tenants/pending", get(handlers::tenants::pending))
        .route("/api/tenants/approve/{id}", patch(handlers::tenants::approve))
        .route("/api/tenants/request-room", post(handlers::tenants::request_room))
        .route("/api/tenants/my-request", get(handlers::tenants::my_request))
        .route("/api/tenants/dashboard", get(handlers::tenants::dashboard))
        .route("/api/tenants/summary", get(handlers::tenants::summary))
        .route("/api/tenants/upcoming-dues", get(handlers::tenants::upcoming_dues))
        .route("/api/tenants/notify-email", post(handlers::tenants::notify_email))
}

fn room_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/rooms/add", post(handlers::rooms::add))
        .route("/api/rooms/assign", post(handlers::rooms::assign))
}

fn payment_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/payments/add", post(handlers::payments::add))
        .route("/api/payments/my-payments", get(handlers::payments::my_payments))
        .route("/api/payments/admin/all", get(handlers::admin_payments::all))
        .route(
            "/api/payments/admin/approve/{id}",
            patch(handlers::admin_payments::approve),
        )
        .route(
            "/api/payments/admin/reject/{id}",
            patch(handlers::admin_payments::reject),
        )
        .route("/api/payments/admin/revenue", get(handlers::admin_payments::revenue))
}

fn expense_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/expenses/add", post(handlers::expenses::add))
        .route("/api/expenses/all", get(handlers::expenses::all))
        .route("/api/expenses/update/{id}", put(handlers::expenses::update))
        .route("/api/expenses/delete/{id}", delete(handlers::expenses::delete))
}

fn user_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/all", get(handlers::users::all))
        .route("/api/users/update/{id}", put(handlers::users::update))
        .route("/api/users/delete/{id}", delete(handlers::users::delete))
}
