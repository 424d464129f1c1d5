//! Content routes: `/api/content/*`
//!
//! Thin HTTP surface over the content service. List fetches that fail
//! upstream fall back to the shipped static catalog for models that have
//! one — the page must render, not 502. An empty 2xx result is a valid
//! answer and is passed through untouched.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::warn;

use zeroshift_content::fallback::fallback_entries;
use zeroshift_content::model::{ContentItem, FetchOptions};

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/api/content` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/content/{model}", get(list_content))
        .route("/content/{model}/{id}", get(get_content))
}

/// Validate a content model name.
///
/// - Only alphanumeric, `_`, `-` characters allowed.
/// - Must not be empty.
fn validate_model_name(model: &str) -> Result<(), AppError> {
    if model.is_empty() {
        return Err(AppError::BadRequest(
            "content model name must not be empty".to_owned(),
        ));
    }

    if !model
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
    {
        return Err(AppError::BadRequest(
            "content model name may only contain alphanumeric characters, '_', and '-'".to_owned(),
        ));
    }

    Ok(())
}

// ── Request / Response types ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ContentQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// JSON-encoded structured filter.
    pub query: Option<String>,
}

/// Where the returned entries came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Cms,
    Fallback,
}

#[derive(Debug, Serialize)]
pub struct ContentListResponse {
    pub results: Vec<ContentItem>,
    pub source: ContentSource,
}

#[derive(Debug, Serialize)]
pub struct ContentItemResponse {
    pub result: Option<ContentItem>,
    pub source: ContentSource,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// List the entries of a content model.
async fn list_content(
    State(state): State<Arc<AppState>>,
    Path(model): Path<String>,
    Query(params): Query<ContentQuery>,
) -> Result<Json<ContentListResponse>, AppError> {
    validate_model_name(&model)?;

    let query = params
        .query
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .map_err(|_| AppError::BadRequest("query parameter must be valid JSON".to_owned()))?;

    let options = FetchOptions {
        limit: params.limit,
        offset: params.offset,
        query,
    };

    match state.content.entries(&model, &options).await {
        Ok(results) => Ok(Json(ContentListResponse {
            results,
            source: ContentSource::Cms,
        })),
        Err(err) => match fallback_entries(&model) {
            Some(results) => {
                warn!(model = %model, error = %err, "content fetch failed, serving static fallback");
                Ok(Json(ContentListResponse {
                    results,
                    source: ContentSource::Fallback,
                }))
            }
            None => Err(err.into()),
        },
    }
}

/// Fetch a single entry by id.
async fn get_content(
    State(state): State<Arc<AppState>>,
    Path((model, id)): Path<(String, String)>,
) -> Result<Json<ContentItemResponse>, AppError> {
    validate_model_name(&model)?;

    let result = state.content.entry(&model, Some(&id)).await?;
    Ok(Json(ContentItemResponse {
        result,
        source: ContentSource::Cms,
    }))
}
