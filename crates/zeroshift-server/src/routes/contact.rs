//! Contact route: `POST /api/contact`
//!
//! One endpoint for both the contact form (JSON or form-encoded) and the
//! careers application (multipart with an optional CV). Three terminal
//! outcomes per request: a validation failure answers 400 with field-level
//! detail and performs no side effect; a valid submission is dispatched
//! exactly once; the response is a success acknowledgment even when dispatch
//! failed — a degraded notification channel must never fail the submission
//! UX. Dispatch failures are logged for manual follow-up instead.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tower::limit::ConcurrencyLimitLayer;
use tracing::{info, warn};

use crate::error::AppError;
use crate::forms::{CvAttachment, MAX_CV_BYTES, Submission, SubmissionPayload};
use crate::mailer::SubmissionEnvelope;
use crate::state::AppState;

/// Ceiling for JSON / form-encoded bodies. Multipart gets more headroom for
/// the CV; the 5MB attachment limit itself is a validation rule.
const MAX_TEXT_BODY_BYTES: usize = 64 * 1024;

/// Build the `/api/contact` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/contact", post(submit))
        .layer(DefaultBodyLimit::max(MAX_CV_BYTES + MAX_TEXT_BODY_BYTES))
        .layer(ConcurrencyLimitLayer::new(32))
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Handle a form submission.
async fn submit(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<SubmitResponse>, AppError> {
    let (payload, cv) = parse_submission(request).await?;
    let submission = Submission::try_from_payload(payload, cv).map_err(AppError::Validation)?;

    let envelope = SubmissionEnvelope::new(submission);

    // Exactly one delivery attempt. Failure is an operational problem, not
    // the submitter's: acknowledge anyway and keep the data in the log.
    let message = match state.mailer.deliver(&envelope).await {
        Ok(()) => {
            info!(
                reference = %envelope.reference,
                kind = envelope.submission.kind_label(),
                "submission dispatched"
            );
            "Contact form submitted successfully"
        }
        Err(err) => {
            warn!(
                reference = %envelope.reference,
                error = %err,
                "submission dispatch failed, logged for manual follow-up"
            );
            info!(
                reference = %envelope.reference,
                submission = %serde_json::to_string(&envelope).unwrap_or_default(),
                "submission retained for manual processing"
            );
            "Contact form submitted successfully. We will be in touch soon."
        }
    };

    Ok(Json(SubmitResponse {
        success: true,
        message,
    }))
}

/// Parse the request body into a raw payload, branching on content type:
/// multipart (careers with CV), form-encoded, or JSON (the default).
async fn parse_submission(
    request: Request,
) -> Result<(SubmissionPayload, Option<CvAttachment>), AppError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_owned();

    if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?;
        return parse_multipart(multipart).await;
    }

    let bytes = axum::body::to_bytes(request.into_body(), MAX_TEXT_BODY_BYTES)
        .await
        .map_err(|_| AppError::BadRequest("request body too large".to_owned()))?;

    let payload = if content_type.starts_with("application/x-www-form-urlencoded") {
        serde_urlencoded::from_bytes(&bytes)
            .map_err(|_| AppError::BadRequest("request body must be a valid form".to_owned()))?
    } else {
        serde_json::from_slice(&bytes)
            .map_err(|_| AppError::BadRequest("request body must be valid JSON".to_owned()))?
    };

    Ok((payload, None))
}

async fn parse_multipart(
    mut multipart: Multipart,
) -> Result<(SubmissionPayload, Option<CvAttachment>), AppError> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut cv = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        if name == "cv" {
            let file_name = field.file_name().map(ToOwned::to_owned);
            let content_type = field.content_type().map(ToOwned::to_owned);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("invalid file upload: {e}")))?;

            // An empty file part means "no CV attached".
            if !bytes.is_empty() {
                cv = Some(CvAttachment {
                    file_name,
                    content_type,
                    size_bytes: bytes.len(),
                });
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("invalid field '{name}': {e}")))?;
            fields.insert(name, value);
        }
    }

    Ok((SubmissionPayload::from_fields(fields), cv))
}
