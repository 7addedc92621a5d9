use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Uri},
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::state::AppState;
use crate::web;

mod contact;
mod error;
mod observability;
mod projects;
mod system;
mod types;

pub use error::ApiError;
pub use types::*;

/// The full application: pages, JSON API, health probe and uploads.
pub fn router(state: Arc<AppState>) -> Router {
    let config = state.config();

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(60)));

    let cors_origins = &config.server.cors_allowed_origins;
    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    let api_router = Router::new()
        .route("/contact", post(contact::submit_contact))
        .route("/projects", get(projects::list_projects))
        .route("/projects/featured", get(projects::list_featured))
        .fallback(api_not_found);

    Router::new()
        .merge(web::routes())
        .route("/health", get(system::health))
        .nest("/api", api_router)
        .nest_service(
            "/uploads",
            ServeDir::new(config.server.upload_folder.clone()),
        )
        .fallback(web::not_found)
        .with_state(state.clone())
        .layer(session_layer)
        .layer(DefaultBodyLimit::max(config.server.max_content_length))
        .layer(CatchPanicLayer::custom(web::panic_response))
        .layer(middleware::from_fn(observability::security_headers))
        .layer(middleware::from_fn(observability::request_logging))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

async fn api_not_found(uri: Uri) -> ApiError {
    ApiError::not_found("Endpoint", uri.path())
}
