use axum::{
    extract::{Form as UrlEncoded, State, rejection::FormRejection},
    response::{Html, IntoResponse, Redirect, Response},
};
use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use tower_sessions::Session;
use tracing::{error, info};

use super::{Flash, flash, layout};
use crate::entities::contact_messages;
use crate::forms::{ContactForm, Form, FormErrors, Payload};
use crate::state::AppState;

const SENT: &str = "Thank you for your message! I will get back to you soon.";
const SEND_FAILED: &str = "Sorry, there was an error sending your message. Please try again.";

const FIELDS: [(&str, &str, &str); 4] = [
    ("name", "Name", "text"),
    ("email", "Email", "email"),
    ("subject", "Subject", "text"),
    ("message", "Message", "textarea"),
];

pub async fn show(session: Session) -> Html<String> {
    let pending = flash::take(&session).await;
    render(pending.as_ref(), &Payload::default(), &FormErrors::default())
}

pub async fn submit(
    State(state): State<Arc<AppState>>,
    session: Session,
    form: Result<UrlEncoded<HashMap<String, String>>, FormRejection>,
) -> Response {
    let payload = form
        .map(|UrlEncoded(fields)| Payload::from(fields))
        .unwrap_or_default();

    let contact = match ContactForm::validate(&payload) {
        Ok(contact) => contact,
        Err(errors) => return render(None, &payload, &errors).into_response(),
    };

    let record = contact_messages::ActiveModel::new_message(
        contact.name,
        contact.email,
        contact.subject,
        contact.message,
    );

    match state.store().session().create(record).await {
        Ok(saved) => {
            info!(
                id = saved.id,
                newsletter = contact.newsletter,
                "Contact message received"
            );
            flash::push(&session, Flash::success(SENT)).await;
            Redirect::to("/contact").into_response()
        }
        Err(e) => {
            error!("Failed to store contact message: {}", e);
            let notice = Flash::error(SEND_FAILED);
            render(Some(&notice), &payload, &FormErrors::default()).into_response()
        }
    }
}

fn render(notice: Option<&Flash>, payload: &Payload, errors: &FormErrors) -> Html<String> {
    let mut body = String::from(
        "<h1>Contact</h1>\n<form method=\"post\" action=\"/contact\" novalidate>\n",
    );

    for (name, label, kind) in FIELDS {
        let value = payload.get(name).unwrap_or_default();
        let _ = write!(body, "<div class=\"field\"><label for=\"{name}\">{label}</label>");
        if kind == "textarea" {
            let _ = write!(
                body,
                "<textarea id=\"{name}\" name=\"{name}\" rows=\"6\">{}</textarea>",
                layout::text(value)
            );
        } else {
            let _ = write!(
                body,
                "<input id=\"{name}\" name=\"{name}\" type=\"{kind}\" value=\"{}\">",
                layout::attr(value)
            );
        }
        if let Some(message) = errors.for_field(name) {
            let _ = write!(body, "<span class=\"error\">{}</span>", layout::text(message));
        }
        body.push_str("</div>\n");
    }

    let checked = if payload.flag("newsletter") { " checked" } else { "" };
    let _ = write!(
        body,
        "<div class=\"field\"><label><input type=\"checkbox\" name=\"newsletter\" value=\"y\"{checked}> \
         Subscribe to newsletter</label></div>\n\
         <button type=\"submit\">Send Message</button>\n</form>"
    );

    Html(layout::page("Contact", notice, &body))
}
