//! HTTP-level tests for `POST /api/contact`.
//!
//! These prove the endpoint contract: field-level 400s on schema violations,
//! success acknowledgments that never depend on the dispatch outcome, and
//! both submission types (contact and careers, including the multipart CV
//! path).

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

mod common;

use common::{FailingMailer, RecordingMailer, app_with, app_without_cms, multipart_body};
use zeroshift_server::mailer::Mailer;

async fn post_contact(app: axum::Router, content_type: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, content_type)
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

fn valid_contact_json() -> String {
    json!({
        "name": "Jo",
        "email": "jo@x.com",
        "message": "Hello there!"
    })
    .to_string()
}

/// Field names present in a 400 response's `details` array.
fn detail_fields(body: &Value) -> Vec<&str> {
    body["details"]
        .as_array()
        .map(|details| {
            details
                .iter()
                .filter_map(|d| d["field"].as_str())
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn valid_submission_is_acknowledged() {
    let (status, body) = post_contact(
        app_without_cms(),
        "application/json",
        valid_contact_json(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body["message"].as_str().unwrap().contains("successfully"));
    // The acknowledgment echoes no PII.
    assert!(!body.to_string().contains("jo@x.com"));
}

#[tokio::test]
async fn invalid_fields_are_each_reported() {
    let (status, body) = post_contact(
        app_without_cms(),
        "application/json",
        json!({"name": "J", "email": "bad", "message": "hi"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Invalid form data"));

    let fields = detail_fields(&body);
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"message"));
}

#[tokio::test]
async fn form_encoded_bodies_are_accepted() {
    let (status, body) = post_contact(
        app_without_cms(),
        "application/x-www-form-urlencoded",
        "name=Jo&email=jo%40x.com&company=Acme&message=Hello+there%21",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn malformed_json_is_a_400_not_a_500() {
    let (status, body) =
        post_contact(app_without_cms(), "application/json", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn identical_submissions_are_not_deduplicated() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = app_with("http://127.0.0.1:1", Arc::clone(&mailer) as Arc<dyn Mailer>);

    for _ in 0..2 {
        let (status, body) = post_contact(
            app.clone(),
            "application/json",
            valid_contact_json(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
    }

    assert_eq!(mailer.attempts.load(Ordering::SeqCst), 2);
    let delivered = mailer.delivered.lock().await;
    assert_eq!(delivered.len(), 2);
    // Independent submissions get independent reference ids.
    assert_ne!(delivered[0].reference, delivered[1].reference);
}

#[tokio::test]
async fn dispatch_failure_still_acknowledges_success() {
    let app = app_with("http://127.0.0.1:1", Arc::new(FailingMailer));

    let (status, body) =
        post_contact(app, "application/json", valid_contact_json()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body["message"].as_str().unwrap().contains("in touch"));
}

#[tokio::test]
async fn validation_failure_performs_no_dispatch() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = app_with("http://127.0.0.1:1", Arc::clone(&mailer) as Arc<dyn Mailer>);

    let (status, _) = post_contact(
        app,
        "application/json",
        json!({"name": "J", "email": "bad", "message": "hi"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(mailer.attempts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn career_submission_via_json() {
    let (status, body) = post_contact(
        app_without_cms(),
        "application/json",
        json!({
            "type": "career",
            "name": "Jordan",
            "email": "jordan@example.com",
            "phone": "+49 30 1234567",
            "position": "Platform Engineer",
            "motivation": "I want to build migration tooling.",
            "ideas": "Shadow traffic for everything."
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn career_submission_requires_its_own_fields() {
    let (status, body) = post_contact(
        app_without_cms(),
        "application/json",
        json!({
            "type": "career",
            "name": "Jordan",
            "email": "jordan@example.com"
        })
        .to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields = detail_fields(&body);
    assert!(fields.contains(&"position"));
    assert!(fields.contains(&"motivation"));
    // The contact form's `message` rule does not apply to careers.
    assert!(!fields.contains(&"message"));
}

#[tokio::test]
async fn career_multipart_with_cv_is_accepted() {
    let boundary = "zs-test-boundary";
    let body = multipart_body(
        boundary,
        &[
            ("type", "career"),
            ("name", "Jordan"),
            ("email", "jordan@example.com"),
            ("position", "Platform Engineer"),
            ("motivation", "I want to build migration tooling."),
        ],
        Some(("cv.pdf", "application/pdf", b"%PDF-1.4 fake")),
    );

    let (status, response) = post_contact(
        app_without_cms(),
        &format!("multipart/form-data; boundary={boundary}"),
        body,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["success"], json!(true));
}

#[tokio::test]
async fn career_multipart_rejects_non_document_cv() {
    let boundary = "zs-test-boundary";
    let body = multipart_body(
        boundary,
        &[
            ("type", "career"),
            ("name", "Jordan"),
            ("email", "jordan@example.com"),
            ("position", "Platform Engineer"),
            ("motivation", "I want to build migration tooling."),
        ],
        Some(("payload.exe", "application/octet-stream", b"MZ")),
    );

    let (status, response) = post_contact(
        app_without_cms(),
        &format!("multipart/form-data; boundary={boundary}"),
        body,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(detail_fields(&response).contains(&"cv"));
}
