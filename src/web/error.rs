use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use super::layout;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("page not found")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for PageError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Html(layout::page(
                    "Page Not Found",
                    None,
                    "<h1>404</h1><p>The page you are looking for does not exist.</p>\
                     <p><a href=\"/\">Back to home</a></p>",
                )),
            )
                .into_response(),
            Self::Internal(detail) => {
                tracing::error!("Page error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(layout::page(
                        "Server Error",
                        None,
                        "<h1>500</h1><p>Something went wrong on our end. Please try again later.</p>",
                    )),
                )
                    .into_response()
            }
        }
    }
}
