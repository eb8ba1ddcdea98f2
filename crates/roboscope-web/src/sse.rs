//! Server-Sent Events for live telemetry.

use std::convert::Infallible;

use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;

/// Create an SSE response fed by a session's outbound channel.
///
/// The stream ends when the sending session drops its side; dropping the
/// response (client disconnect) closes the receiver, which the session
/// observes as a failed write.
pub fn create_sse_stream(
    rx: tokio::sync::mpsc::Receiver<String>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let stream = ReceiverStream::new(rx).map(|data| Ok(Event::default().data(data)));

    Sse::new(stream).keep_alive(KeepAlive::default())
}
