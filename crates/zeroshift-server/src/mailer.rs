//! Outbound dispatch of form submissions.
//!
//! The endpoint's contract is "validate, dispatch once, always acknowledge",
//! so the dispatcher sits behind a trait: handlers never know whether a real
//! provider or the logging stand-in is wired in. There is no email provider
//! integration yet — [`LogMailer`] records each submission to the
//! operational log, which is where manual follow-up picks them up.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::forms::Submission;

/// Errors from dispatching a submission.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The outbound provider rejected or never received the submission.
    #[error("submission dispatch failed: {reason}")]
    Provider { reason: String },
}

/// A validated submission wrapped with its operational identity: a reference
/// id for log correlation and the time it arrived.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionEnvelope {
    pub reference: Uuid,
    pub received_at: DateTime<Utc>,
    #[serde(flatten)]
    pub submission: Submission,
}

impl SubmissionEnvelope {
    #[must_use]
    pub fn new(submission: Submission) -> Self {
        Self {
            reference: Uuid::new_v4(),
            received_at: Utc::now(),
            submission,
        }
    }
}

/// Outbound channel for validated submissions. One delivery attempt per
/// submission; retries are deliberately not part of this contract.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn deliver(&self, envelope: &SubmissionEnvelope) -> Result<(), DispatchError>;
}

/// Dispatcher that writes submissions to the operational log.
///
/// Stands in for the email provider until one is wired up; the log line
/// carries the full submission so nothing is lost in the meantime.
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn deliver(&self, envelope: &SubmissionEnvelope) -> Result<(), DispatchError> {
        let body = serde_json::to_string(envelope).map_err(|e| DispatchError::Provider {
            reason: format!("failed to serialize submission: {e}"),
        })?;

        info!(
            reference = %envelope.reference,
            kind = envelope.submission.kind_label(),
            submission = %body,
            "form submission received"
        );
        Ok(())
    }
}
