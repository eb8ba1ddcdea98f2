//! Streaming core for roboscope.
//!
//! This crate provides the pieces behind the live telemetry view:
//! - A static topic registry (the simulated ROS topics)
//! - A synthetic reading generator
//! - The per-connection stream session state machine

mod error;
mod generator;
mod registry;
mod session;

pub use error::{Disconnected, StreamError};
pub use generator::{Reading, generate};
pub use registry::{FieldSpec, Topic, TopicRegistry};
pub use session::{EventSink, SessionState, StreamSession, TICK_PERIOD};
