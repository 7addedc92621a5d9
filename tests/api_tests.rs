mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{DateTime, Utc};
use common::{body_json, seed_project, seed_user, spawn_app};
use sea_orm::ConnectionTrait;
use serde_json::json;
use tower::ServiceExt;

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_api_contact_persists_unread_message() {
    let (app, store) = spawn_app().await;

    let response = app
        .oneshot(post_json(
            "/api/contact",
            &json!({
                "name": "A",
                "email": "a@b.com",
                "subject": "Hi there",
                "message": "This is a long enough message."
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Message sent successfully");

    let messages = store.contact_messages().list().await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].name, "A");
    assert_eq!(messages[0].subject, "Hi there");
    assert!(!messages[0].read);
    assert_eq!(store.contact_messages().count_unread().await.unwrap(), 1);
}

#[tokio::test]
async fn test_api_contact_store_failure_is_500() {
    let (app, store) = spawn_app().await;
    store
        .conn
        .execute_unprepared("DROP TABLE contact_messages")
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/api/contact",
            &json!({
                "name": "A",
                "email": "a@b.com",
                "subject": "Hi there",
                "message": "This is a long enough message."
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "error": "Failed to send message" }));
}

#[tokio::test]
async fn test_api_contact_names_missing_field() {
    let (app, store) = spawn_app().await;

    let response = app
        .oneshot(post_json("/api/contact", &json!({ "name": "A" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("email"));
    assert!(store.contact_messages().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_api_contact_blank_field_is_missing() {
    let (app, _store) = spawn_app().await;

    let response = app
        .oneshot(post_json(
            "/api/contact",
            &json!({
                "name": "A",
                "email": "a@b.com",
                "subject": "   ",
                "message": "This is a long enough message."
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "subject is required");
}

#[tokio::test]
async fn test_api_contact_rejects_malformed_email() {
    let (app, _store) = spawn_app().await;

    let response = app
        .oneshot(post_json(
            "/api/contact",
            &json!({
                "name": "A",
                "email": "not-an-email",
                "subject": "Hi there",
                "message": "This is a long enough message."
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Please enter a valid email address"
    );
}

#[tokio::test]
async fn test_api_contact_without_data() {
    let (app, _store) = spawn_app().await;

    let empty = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(empty).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "No data provided");

    for body in [json!({}), json!(["name"]), json!("text")] {
        let response = app
            .clone()
            .oneshot(post_json("/api/contact", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "No data provided");
    }
}

#[tokio::test]
async fn test_api_projects_lists_only_completed() {
    let (app, store) = spawn_app().await;
    let owner = seed_user(&store, "owner").await;
    let done = seed_project(&store, &owner, "Finished", false, true).await;
    seed_project(&store, &owner, "In progress", true, false).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/projects")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], done.id);
    assert_eq!(items[0]["title"], "Finished");

    let completion = &items[0]["completion_date"];
    assert!(
        completion.is_null()
            || DateTime::parse_from_rfc3339(completion.as_str().unwrap()).is_ok()
    );
    assert!(DateTime::parse_from_rfc3339(items[0]["created_at"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_api_projects_newest_first() {
    let (app, store) = spawn_app().await;
    let owner = seed_user(&store, "owner").await;
    let older = seed_project(&store, &owner, "Older", false, true).await;
    let newer = seed_project(&store, &owner, "Newer", false, true).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/projects")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![i64::from(newer.id), i64::from(older.id)]);
}

#[tokio::test]
async fn test_api_featured_requires_completed() {
    let (app, store) = spawn_app().await;
    let owner = seed_user(&store, "owner").await;
    seed_project(&store, &owner, "Shown", true, true).await;
    seed_project(&store, &owner, "Draft", true, false).await;
    seed_project(&store, &owner, "Plain", false, true).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/projects/featured")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Shown"]);
}

#[tokio::test]
async fn test_health_timestamp_is_current() {
    let (app, _store) = spawn_app().await;
    let before = Utc::now();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let after = Utc::now();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");

    let stamp = DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap())
        .unwrap()
        .with_timezone(&Utc);
    assert!(stamp >= before - chrono::Duration::milliseconds(1));
    assert!(stamp <= after);
}

#[tokio::test]
async fn test_unknown_api_route_is_json_404() {
    let (app, _store) = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/nothing-here")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Endpoint "));
    assert!(message.ends_with("not found"));
}

#[tokio::test]
async fn test_responses_carry_request_id_and_security_headers() {
    let (app, _store) = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    let request_id = headers["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
}
