//! Per-connection stream session.
//!
//! A session owns one topic, one outbound sink, and one cancellation signal.
//! Its `run` loop generates a reading every tick and pushes it to the sink
//! until the client disconnects or shutdown is requested.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::error::{Disconnected, StreamError};
use crate::generator::generate;
use crate::registry::{Topic, TopicRegistry};

/// Fixed interval between pushed readings.
pub const TICK_PERIOD: Duration = Duration::from_millis(500);

/// Destination a session writes serialized readings to.
///
/// Abstracted so the session can be driven in tests without a socket. A send
/// error means the peer is gone; the session never retries a failed write.
#[async_trait]
pub trait EventSink: Send {
    async fn send(&mut self, payload: String) -> Result<(), Disconnected>;
}

/// A bounded channel whose receiver feeds the SSE response. A closed
/// receiver is the disconnect signal.
#[async_trait]
impl EventSink for mpsc::Sender<String> {
    async fn send(&mut self, payload: String) -> Result<(), Disconnected> {
        mpsc::Sender::send(self, payload)
            .await
            .map_err(|_| Disconnected)
    }
}

/// Lifecycle of a stream session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, topic validated, loop not yet running.
    Starting,
    /// Push loop running.
    Active,
    /// Loop exited; no further ticks occur.
    Terminated,
}

/// The per-connection push loop.
#[derive(Debug)]
pub struct StreamSession<S> {
    topic: Topic,
    sink: S,
    state: SessionState,
    shutdown_rx: watch::Receiver<bool>,
}

impl<S: EventSink> StreamSession<S> {
    /// Validate the topic and construct a session bound to `sink`.
    ///
    /// Fails with [`StreamError::TopicNotFound`] before anything is written,
    /// so callers can reject the request without opening a stream.
    pub fn open(
        registry: &TopicRegistry,
        topic_id: &str,
        sink: S,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Result<Self, StreamError> {
        let topic = registry.get(topic_id)?.clone();
        Ok(Self {
            topic,
            sink,
            state: SessionState::Starting,
            shutdown_rx,
        })
    }

    /// The topic this session is bound to.
    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run the push loop until disconnect or shutdown.
    ///
    /// One reading per tick, in generation order. The per-tick wait is the
    /// only suspension point; missed ticks delay rather than burst, so ticks
    /// are never pipelined.
    pub async fn run(&mut self) {
        if self.state == SessionState::Terminated {
            return;
        }
        if *self.shutdown_rx.borrow() {
            self.terminate();
            return;
        }

        self.state = SessionState::Active;
        info!(topic = %self.topic.id, "stream session started");

        let mut ticker = time::interval(TICK_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let reading = generate(&self.topic);
                    let payload = match serde_json::to_string(&reading) {
                        Ok(p) => p,
                        Err(e) => {
                            // Non-fatal: skip this tick, retry nothing.
                            warn!(topic = %self.topic.id, error = %e, "failed to serialize reading");
                            continue;
                        }
                    };

                    if self.sink.send(payload).await.is_err() {
                        debug!(topic = %self.topic.id, "client disconnected");
                        break;
                    }
                }
                changed = self.shutdown_rx.changed() => {
                    // A dropped sender counts as shutdown too.
                    if changed.is_err() || *self.shutdown_rx.borrow() {
                        debug!(topic = %self.topic.id, "shutdown requested");
                        break;
                    }
                }
            }
        }

        self.terminate();
    }

    /// Transition to `Terminated`. Idempotent.
    pub fn terminate(&mut self) {
        if self.state == SessionState::Terminated {
            return;
        }
        self.state = SessionState::Terminated;
        info!(topic = %self.topic.id, "stream session terminated");
    }
}
