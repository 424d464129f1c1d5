//! Content model shared between the CMS client and the web tier.
//!
//! The CMS owns the schema of each content model; this crate only pins down
//! the envelope shape. Everything inside `data` is model-dependent and passed
//! through untouched, so unknown fields must survive a round trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default page size when the caller does not specify a limit.
pub const DEFAULT_LIMIT: u32 = 100;

/// One entry returned by the CMS.
///
/// `id` is unique within a single fetch result but carries no stability
/// guarantee across fetches — never cache by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Model-dependent fields. Arbitrary unknown keys are expected here.
    #[serde(default)]
    pub data: Map<String, Value>,
    /// Auxiliary metadata attached by the CMS, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

/// Query options for a content fetch. Constructed per request, never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOptions {
    /// Maximum entries to return (defaults to [`DEFAULT_LIMIT`]).
    pub limit: Option<u32>,
    /// Entries to skip (defaults to 0).
    pub offset: Option<u32>,
    /// Structured filter, JSON-serialized onto the query string.
    pub query: Option<Value>,
}

impl FetchOptions {
    #[must_use]
    pub fn limit_or_default(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    #[must_use]
    pub fn offset_or_default(&self) -> u32 {
        self.offset.unwrap_or(0)
    }
}

/// Wire envelope: `{ "results": [...] }`. A missing `results` key is treated
/// as an empty list, not an error.
#[derive(Debug, Deserialize)]
pub(crate) struct ResultsEnvelope {
    #[serde(default)]
    pub results: Vec<ContentItem>,
}
