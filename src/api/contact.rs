use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::sync::Arc;
use tracing::info;

use super::{ApiError, MessageResponse};
use crate::entities::contact_messages;
use crate::forms::{ApiContactForm, Form, Payload};
use crate::state::AppState;

/// Stores an inbound contact message.
///
/// # Endpoint
/// `POST /api/contact`
///
/// 400 when the body is missing, is not a JSON object, or lacks a required
/// field; 500 when the write is rolled back.
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let payload = body
        .ok()
        .and_then(|Json(value)| Payload::from_json(&value))
        .filter(|payload| !payload.is_empty())
        .ok_or_else(|| ApiError::validation("No data provided"))?;

    let form = ApiContactForm::validate(&payload)?;

    let record =
        contact_messages::ActiveModel::new_message(form.name, form.email, form.subject, form.message);

    let saved = state
        .store()
        .session()
        .create(record)
        .await
        .map_err(|_| ApiError::PersistFailed("Failed to send message"))?;

    info!(id = saved.id, "Contact message received via API");
    Ok(Json(MessageResponse::new("Message sent successfully")))
}
