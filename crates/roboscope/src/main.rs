//! roboscope: simulated robot telemetry viewer.
//!
//! Serves a small web UI that streams synthetic readings for a chosen topic
//! over Server-Sent Events.

use clap::Parser;
use miette::Result;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roboscope_stream::TopicRegistry;
use roboscope_web::create_router;

#[derive(Parser)]
#[command(name = "roboscope")]
#[command(about = "Simulated robot telemetry viewer", long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Web server port
    #[arg(long, env = "ROBOSCOPE_PORT", default_value = "8000")]
    port: u16,

    /// Static files directory (served under /static)
    #[arg(long)]
    static_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "roboscope=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let registry = TopicRegistry::builtin();
    info!(topics = registry.topics().len(), "loaded topic registry");

    // Shutdown is a courtesy cancellation: every active stream session
    // observes this channel and terminates within one tick.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    let router = create_router(registry, cli.static_dir.as_deref(), shutdown_rx.clone());

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", cli.host, cli.port))
        .await
        .map_err(|e| miette::miette!("{}", e))?;

    info!("web server listening on http://{}:{}", cli.host, cli.port);

    let mut shutdown_rx = shutdown_rx;
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
        })
        .await
        .map_err(|e| miette::miette!("{}", e))?;

    info!("web server shut down gracefully");
    Ok(())
}
