//! Shared application state for the Zero Shift site server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`.

use std::path::PathBuf;
use std::sync::Arc;

use zeroshift_content::service::ContentService;

use crate::mailer::Mailer;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Cached, retrying access to the CMS.
    pub content: ContentService,
    /// Outbound dispatcher for form submissions.
    pub mailer: Arc<dyn Mailer>,
    /// Directory holding the built SPA bundle.
    pub static_dir: PathBuf,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
