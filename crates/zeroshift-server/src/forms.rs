//! Form submission schemas and validation.
//!
//! One endpoint accepts two submission types, discriminated by the `type`
//! field the client sends: the plain contact form and the careers application
//! (extra fields plus an optional CV attachment). Validation is
//! all-or-nothing — every violated field is reported once and no side effect
//! runs until the whole payload passes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

const MIN_NAME_CHARS: usize = 2;
const MIN_MESSAGE_CHARS: usize = 10;

/// Soft CV size limit enforced server-side as well as in the browser.
pub const MAX_CV_BYTES: usize = 5 * 1024 * 1024;

const CV_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];
const CV_MIME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// One field-level schema violation, reported back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

fn violation(field: &str, message: &str) -> FieldViolation {
    FieldViolation {
        field: field.to_owned(),
        message: message.to_owned(),
    }
}

/// Raw request payload before validation. All fields optional — the schema
/// decides what is required once the submission type is known.
#[derive(Debug, Default, Deserialize)]
pub struct SubmissionPayload {
    /// Submission discriminator: absent or `"contact"` for the contact form,
    /// `"career"` for a careers application.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub motivation: Option<String>,
    pub ideas: Option<String>,
}

impl SubmissionPayload {
    /// Build a payload from multipart text fields.
    #[must_use]
    pub fn from_fields(mut fields: HashMap<String, String>) -> Self {
        Self {
            kind: fields.remove("type"),
            name: fields.remove("name"),
            email: fields.remove("email"),
            company: fields.remove("company"),
            message: fields.remove("message"),
            phone: fields.remove("phone"),
            position: fields.remove("position"),
            motivation: fields.remove("motivation"),
            ideas: fields.remove("ideas"),
        }
    }
}

/// Metadata of an uploaded CV. The file content itself is not persisted —
/// only described to the dispatcher.
#[derive(Debug, Clone, Serialize)]
pub struct CvAttachment {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size_bytes: usize,
}

/// A validated submission.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Submission {
    Contact(ContactSubmission),
    Career(CareerSubmission),
}

impl Submission {
    /// Validate a raw payload into a typed submission, or return every
    /// violation found.
    pub fn try_from_payload(
        payload: SubmissionPayload,
        cv: Option<CvAttachment>,
    ) -> Result<Self, Vec<FieldViolation>> {
        match payload.kind.as_deref() {
            Some("career") => CareerSubmission::validate(payload, cv).map(Self::Career),
            _ => ContactSubmission::validate(payload).map(Self::Contact),
        }
    }

    #[must_use]
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Contact(_) => "contact",
            Self::Career(_) => "career",
        }
    }
}

/// The plain contact form.
#[derive(Debug, Clone, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub message: String,
}

impl ContactSubmission {
    fn validate(payload: SubmissionPayload) -> Result<Self, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        let name = require_min_chars("name", payload.name, MIN_NAME_CHARS, &mut violations);
        let email = require_email(payload.email, &mut violations);
        let message =
            require_min_chars("message", payload.message, MIN_MESSAGE_CHARS, &mut violations);

        if violations.is_empty() {
            Ok(Self {
                name,
                email,
                company: optional(payload.company),
                message,
            })
        } else {
            Err(violations)
        }
    }
}

/// A careers application (`type="career"`).
#[derive(Debug, Clone, Serialize)]
pub struct CareerSubmission {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub position: String,
    pub motivation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ideas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv: Option<CvAttachment>,
}

impl CareerSubmission {
    fn validate(
        payload: SubmissionPayload,
        cv: Option<CvAttachment>,
    ) -> Result<Self, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        let name = require_min_chars("name", payload.name, MIN_NAME_CHARS, &mut violations);
        let email = require_email(payload.email, &mut violations);
        let position = require_min_chars("position", payload.position, 1, &mut violations);
        let motivation = require_min_chars(
            "motivation",
            payload.motivation,
            MIN_MESSAGE_CHARS,
            &mut violations,
        );

        if let Some(attachment) = &cv {
            validate_cv(attachment, &mut violations);
        }

        if violations.is_empty() {
            Ok(Self {
                name,
                email,
                phone: optional(payload.phone),
                position,
                motivation,
                ideas: optional(payload.ideas),
                cv,
            })
        } else {
            Err(violations)
        }
    }
}

/// Require a trimmed value of at least `min` characters (not bytes).
fn require_min_chars(
    field: &str,
    value: Option<String>,
    min: usize,
    out: &mut Vec<FieldViolation>,
) -> String {
    let trimmed = value.as_deref().unwrap_or("").trim().to_owned();
    if trimmed.chars().count() < min {
        let message = if min == 1 {
            "must not be empty".to_owned()
        } else {
            format!("must be at least {min} characters")
        };
        out.push(FieldViolation {
            field: field.to_owned(),
            message,
        });
    }
    trimmed
}

fn require_email(value: Option<String>, out: &mut Vec<FieldViolation>) -> String {
    let trimmed = value.as_deref().unwrap_or("").trim().to_owned();
    if !is_valid_email(&trimmed) {
        out.push(violation("email", "must be a valid email address"));
    }
    trimmed
}

/// Normalize an optional field: trimmed, with empty strings collapsed to `None`.
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn validate_cv(cv: &CvAttachment, out: &mut Vec<FieldViolation>) {
    if cv.size_bytes > MAX_CV_BYTES {
        out.push(violation("cv", "must be 5MB or smaller"));
    }

    let mime_ok = cv
        .content_type
        .as_deref()
        .is_some_and(|ct| CV_MIME_TYPES.contains(&ct));
    let extension_ok = cv
        .file_name
        .as_deref()
        .and_then(|name| name.rsplit_once('.'))
        .is_some_and(|(_, ext)| CV_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));

    if !mime_ok && !extension_ok {
        out.push(violation("cv", "must be a PDF or Word document"));
    }
}

/// Minimal email shape check: one `@`, non-empty local part, dotted domain,
/// no whitespace. Deliverability is the mail provider's problem.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
