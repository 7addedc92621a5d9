mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{body_text, seed_project, seed_user, spawn_app};
use sea_orm::ConnectionTrait;
use tower::ServiceExt;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/contact")
        .header(
            header::CONTENT_TYPE,
            mime::APPLICATION_WWW_FORM_URLENCODED.as_ref(),
        )
        .body(Body::from(body.to_string()))
        .unwrap()
}

const VALID_FORM: &str = "name=Ada+Lovelace&email=ada%40example.com&subject=Hello+there\
                          &message=I+would+like+to+talk+about+a+project.";

#[tokio::test]
async fn test_static_pages_render() {
    let (app, _store) = spawn_app().await;

    for (uri, needle) in [
        ("/about", "PostgreSQL"),
        ("/about", "REST APIs"),
        ("/services", "Database Design"),
        ("/services", "fab fa-python"),
        ("/services", "fas fa-plug"),
        ("/contact", "name=\"subject\""),
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert!(body_text(response).await.contains(needle), "{uri} lacks {needle}");
    }
}

#[tokio::test]
async fn test_home_shows_featured_completed_projects() {
    let (app, store) = spawn_app().await;
    let owner = seed_user(&store, "owner").await;
    seed_project(&store, &owner, "Showcase", true, true).await;
    seed_project(&store, &owner, "Unfinished <draft>", true, false).await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Showcase"));
    assert!(!html.contains("Unfinished"));
}

#[tokio::test]
async fn test_projects_page_escapes_titles() {
    let (app, store) = spawn_app().await;
    let owner = seed_user(&store, "owner").await;
    seed_project(&store, &owner, "<script>x</script>", false, true).await;

    let html = body_text(app.oneshot(get("/projects")).await.unwrap()).await;
    assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
    assert!(!html.contains("<script>x"));
}

#[tokio::test]
async fn test_contact_form_success_redirects_with_flash() {
    let (app, store) = spawn_app().await;

    let response = app.clone().oneshot(post_form(VALID_FORM)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/contact");

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let messages = store.contact_messages().list().await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].email, "ada@example.com");
    assert!(!messages[0].read);

    let follow_up = Request::builder()
        .uri("/contact")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let html = body_text(app.clone().oneshot(follow_up).await.unwrap()).await;
    assert!(html.contains("Thank you for your message! I will get back to you soon."));

    // Shown once.
    let again = Request::builder()
        .uri("/contact")
        .header(header::COOKIE, &cookie)
        .body(Body::empty())
        .unwrap();
    let html = body_text(app.oneshot(again).await.unwrap()).await;
    assert!(!html.contains("Thank you for your message!"));
}

#[tokio::test]
async fn test_contact_form_store_failure_shows_notice() {
    let (app, store) = spawn_app().await;
    store
        .conn
        .execute_unprepared("DROP TABLE contact_messages")
        .await
        .unwrap();

    let response = app.oneshot(post_form(VALID_FORM)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::LOCATION).is_none());
    let html = body_text(response).await;
    assert!(html.contains("Sorry, there was an error sending your message. Please try again."));
    assert!(html.contains("value=\"Ada Lovelace\""));
    assert!(!html.contains("no such table"));
    assert!(!html.contains("contact_messages"));
}

#[tokio::test]
async fn test_contact_form_rerenders_with_errors() {
    let (app, store) = spawn_app().await;

    let response = app
        .oneshot(post_form(
            "name=A&email=not-an-email&subject=Hello+there&message=short",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Name must be between 2 and 100 characters"));
    assert!(html.contains("Please enter a valid email address"));
    assert!(html.contains("Message must be between 10 and 1000 characters"));
    assert!(html.contains("value=\"Hello there\""));
    assert!(store.contact_messages().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_contact_form_wrong_content_type_is_invalid() {
    let (app, _store) = spawn_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/contact")
        .body(Body::from(VALID_FORM))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Name is required"));
}

#[tokio::test]
async fn test_unknown_page_is_404() {
    let (app, _store) = spawn_app().await;

    let response = app.oneshot(get("/no/such/page")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("404"));
}
