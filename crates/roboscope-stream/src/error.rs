//! Error types for the streaming core.

use thiserror::Error;

/// Errors that can occur in streaming operations.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The requested topic is not in the registry.
    #[error("unknown topic: {0}")]
    TopicNotFound(String),
}

/// The peer closed its side of a stream session's sink.
///
/// Not surfaced as an error to callers; a session treats it as normal
/// termination.
#[derive(Debug, Error)]
#[error("client disconnected")]
pub struct Disconnected;
