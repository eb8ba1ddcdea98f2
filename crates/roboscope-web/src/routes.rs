//! Web routes.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    response::{Html, IntoResponse, Json},
    routing::get,
};
use serde_json::json;
use tokio::sync::{mpsc, watch};
use tower_http::services::ServeDir;
use tracing::debug;

use roboscope_stream::{StreamSession, TopicRegistry};

use crate::error::WebError;
use crate::sse::create_sse_stream;

/// Outbound event buffer per stream session. The session blocks on a full
/// buffer, so a slow client throttles its own stream.
const EVENT_BUFFER: usize = 16;

/// Shared state for the web server.
pub struct AppState {
    pub registry: TopicRegistry,
    pub shutdown_rx: watch::Receiver<bool>,
}

/// Create the web router.
pub fn create_router(
    registry: TopicRegistry,
    static_dir: Option<&str>,
    shutdown_rx: watch::Receiver<bool>,
) -> Router {
    let state = Arc::new(AppState {
        registry,
        shutdown_rx,
    });

    let mut router = Router::new()
        .route("/", get(index))
        .route("/topics", get(list_topics))
        .route("/stream/{*topic}", get(stream_topic))
        .route("/health", get(health))
        .with_state(state);

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router
}

async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "topics": state.registry.topics().len(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn list_topics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let topics: Vec<_> = state
        .registry
        .topics()
        .iter()
        .map(|t| {
            json!({
                "id": t.id,
                "label": t.label,
                "fields": t.field_names(),
            })
        })
        .collect();

    Json(topics)
}

async fn stream_topic(
    State(state): State<Arc<AppState>>,
    Path(topic): Path<String>,
) -> Result<impl IntoResponse, WebError> {
    // Topic ids begin with a slash; the wildcard capture may or may not
    // include it depending on how the client spelled the URL.
    let id = if topic.starts_with('/') {
        topic
    } else {
        format!("/{topic}")
    };

    debug!(topic = %id, "stream requested");

    let (tx, rx) = mpsc::channel(EVENT_BUFFER);
    let mut session = StreamSession::open(&state.registry, &id, tx, state.shutdown_rx.clone())?;

    tokio::spawn(async move {
        session.run().await;
    });

    Ok(create_sse_stream(rx))
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Robot Topic Viewer</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 640px; margin: 2rem auto; padding: 0 1rem; background: #111; color: #eee; }
  h1 { font-size: 1.4rem; }
  select { font-size: 1rem; padding: 0.3rem; background: #222; color: #eee; border: 1px solid #444; }
  #status { margin-left: 0.75rem; font-size: 0.9rem; }
  #status.connected { color: #6c6; }
  #status.disconnected { color: #c66; }
  #status.error { color: #e55; }
  table { border-collapse: collapse; margin-top: 1.5rem; width: 100%; }
  td, th { border: 1px solid #333; padding: 0.4rem 0.8rem; text-align: left; }
  th { background: #1a1a1a; font-weight: 600; }
  td.value { font-variant-numeric: tabular-nums; }
  #timestamp { margin-top: 0.75rem; color: #888; font-size: 0.85rem; }
</style>
</head>
<body>
<h1>Robot Topic Viewer</h1>
<label for="topic">Topic:</label>
<select id="topic"><option value="">select a topic</option></select>
<span id="status"></span>
<table id="values" hidden><thead><tr><th>Field</th><th>Value</th></tr></thead><tbody></tbody></table>
<div id="timestamp"></div>
<script>
const select = document.getElementById("topic");
const status = document.getElementById("status");
const table = document.getElementById("values");
const tbody = table.querySelector("tbody");
const timestamp = document.getElementById("timestamp");
let source = null;

function setStatus(cls, text) {
  status.className = cls;
  status.textContent = text;
}

fetch("/topics")
  .then((r) => r.json())
  .then((topics) => {
    for (const t of topics) {
      const opt = document.createElement("option");
      opt.value = t.id;
      opt.textContent = `${t.id} (${t.label})`;
      select.appendChild(opt);
    }
  })
  .catch(() => setStatus("error", "failed to load topics"));

select.addEventListener("change", () => {
  if (source) { source.close(); source = null; }
  tbody.innerHTML = "";
  timestamp.textContent = "";
  table.hidden = true;
  if (!select.value) { setStatus("", ""); return; }

  source = new EventSource("/stream" + select.value);
  setStatus("connected", "connected");
  source.onmessage = (ev) => {
    const reading = JSON.parse(ev.data);
    tbody.innerHTML = "";
    for (const [field, value] of Object.entries(reading.values)) {
      const row = document.createElement("tr");
      row.innerHTML = `<td>${field}</td><td class="value">${value.toFixed(3)}</td>`;
      tbody.appendChild(row);
    }
    table.hidden = false;
    timestamp.textContent = "last update: " + reading.timestamp;
  };
  source.onerror = () => setStatus("disconnected", "disconnected");
});
</script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        create_router(TopicRegistry::builtin(), None, shutdown_rx)
    }

    #[tokio::test]
    async fn test_index_page() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Robot Topic Viewer"));
        assert!(html.contains("EventSource"));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["topics"], 3);
    }

    #[tokio::test]
    async fn test_topics_listing() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/topics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                {
                    "id": "/robot/position",
                    "label": "geometry_msgs/Point",
                    "fields": ["x", "y", "z"]
                },
                {
                    "id": "/robot/velocity",
                    "label": "geometry_msgs/Twist",
                    "fields": ["linear_x", "linear_y", "linear_z", "angular_x", "angular_y", "angular_z"]
                },
                {
                    "id": "/sensor/gps",
                    "label": "sensor_msgs/NavSatFix",
                    "fields": ["latitude", "longitude"]
                }
            ])
        );
    }

    #[tokio::test]
    async fn test_stream_unknown_topic_is_client_error() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/stream/unknown-channel")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Rejected synchronously: a complete 404 body, no stream bytes.
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "unknown topic: /unknown-channel");
    }

    #[tokio::test]
    async fn test_stream_known_topic_is_event_stream() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/stream/robot/position")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("content-type")
                .unwrap()
                .to_str()
                .unwrap(),
            "text/event-stream"
        );
    }
}
