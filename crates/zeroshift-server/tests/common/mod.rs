//! Shared helpers for HTTP-level integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

use axum::Router;
use tokio::sync::Mutex;

use zeroshift_content::client::{CmsClient, CmsConfig};
use zeroshift_content::service::ContentService;
use zeroshift_server::mailer::{DispatchError, LogMailer, Mailer, SubmissionEnvelope};
use zeroshift_server::routes;
use zeroshift_server::state::AppState;

/// Build the full application router against the given CMS base URL.
pub fn app_with(cms_base_url: &str, mailer: Arc<dyn Mailer>) -> Router {
    let client = CmsClient::new(CmsConfig {
        base_url: cms_base_url.to_owned(),
        api_key: "test-key".to_owned(),
    });

    let state = Arc::new(AppState {
        content: ContentService::new(client),
        mailer,
        static_dir: PathBuf::from("./dist"),
    });

    routes::router(state)
}

/// App whose CMS points at a closed port — content fetches fail, the contact
/// endpoint does not care.
pub fn app_without_cms() -> Router {
    app_with("http://127.0.0.1:1", Arc::new(LogMailer))
}

/// Serve a stub CMS on an ephemeral port, returning its base URL.
pub async fn spawn_stub_cms(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Mailer double whose provider is always down.
pub struct FailingMailer;

#[async_trait::async_trait]
impl Mailer for FailingMailer {
    async fn deliver(&self, _envelope: &SubmissionEnvelope) -> Result<(), DispatchError> {
        Err(DispatchError::Provider {
            reason: "smtp relay unreachable".to_owned(),
        })
    }
}

/// Mailer double that records every delivered envelope.
#[derive(Default)]
pub struct RecordingMailer {
    pub delivered: Mutex<Vec<SubmissionEnvelope>>,
    pub attempts: AtomicUsize,
}

#[async_trait::async_trait]
impl Mailer for RecordingMailer {
    async fn deliver(&self, envelope: &SubmissionEnvelope) -> Result<(), DispatchError> {
        self.attempts
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.delivered.lock().await.push(envelope.clone());
        Ok(())
    }
}

/// Build a multipart/form-data body from text fields plus an optional file
/// part named `cv`.
pub fn multipart_body(
    boundary: &str,
    fields: &[(&str, &str)],
    cv: Option<(&str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((file_name, content_type, bytes)) = cv {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"cv\"; filename=\"{file_name}\"\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
