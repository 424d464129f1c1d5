//! Content layer for the Zero Shift site.
//!
//! Fetches marketing content (services, products, page copy) from the
//! external headless CMS over HTTP and hands it to the web tier. Contains the
//! typed content model, the retrying fetch client, a staleness-window cache
//! with stale-while-revalidate semantics, and the static fallback catalog
//! served when the CMS is unreachable. This crate knows nothing about the
//! HTTP server or the contact form.

pub mod cache;
pub mod client;
pub mod error;
pub mod fallback;
pub mod model;
pub mod service;
