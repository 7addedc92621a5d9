//! Server-rendered pages.

use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::get,
};
use std::any::Any;
use std::sync::Arc;

use crate::state::AppState;

mod contact;
mod error;
mod flash;
mod layout;
mod pages;

pub use error::PageError;
pub use flash::{Flash, FlashLevel};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/services", get(pages::services))
        .route("/projects", get(pages::projects))
        .route("/contact", get(contact::show).post(contact::submit))
}

pub async fn not_found() -> PageError {
    PageError::NotFound
}

/// Turns a handler panic into the 500 page. Any transaction the handler had
/// open is rolled back when its session unwinds.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    PageError::Internal(format!("handler panicked: {detail}")).into_response()
}
