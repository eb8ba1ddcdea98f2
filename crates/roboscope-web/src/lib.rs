//! Web surface for roboscope.
//!
//! This crate provides the HTTP interface to the streaming core:
//! - The embedded viewer page
//! - Topic listing
//! - Per-topic Server-Sent-Events streams

mod error;
mod routes;
mod sse;

pub use error::WebError;
pub use routes::{AppState, create_router};
