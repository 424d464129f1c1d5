//! Static SPA bundle hosting.
//!
//! Unknown paths serve `index.html` so the client-side router can take over;
//! the SPA renders its own not-found page.

use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_status::SetStatus;

/// File service for the built SPA bundle with an `index.html` fallback.
pub fn service(static_dir: &Path) -> ServeDir<SetStatus<ServeFile>> {
    ServeDir::new(static_dir).not_found_service(ServeFile::new(static_dir.join("index.html")))
}
