//! Zero Shift site HTTP server.
//!
//! Wires the content layer and the submission dispatcher into a running Axum
//! server. Serves the JSON API at `/api/*` and the static single-page bundle
//! everywhere else.

pub mod config;
pub mod error;
pub mod forms;
pub mod mailer;
pub mod routes;
pub mod state;
