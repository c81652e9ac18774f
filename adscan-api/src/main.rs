use adscan_api::{build_router, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adscan_api=debug,analyzers=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load();
    tracing::info!(?config, "Adscan API starting");

    let listener = match tokio::net::TcpListener::bind(config.addr()).await {
        Ok(listener) => listener,
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
            tracing::warn!(
                "Port {} in use, trying {}...",
                config.port,
                config.fallback_addr().port()
            );
            tokio::net::TcpListener::bind(config.fallback_addr()).await?
        }
        Err(e) => return Err(e),
    };

    let app = build_router(config);

    tracing::info!("📖 Endpoints: POST /api/score, POST /api/score/batch, GET /api/tier/:value");
    tracing::info!("✅ Server ready on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}
