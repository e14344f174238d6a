use squeeze::{routes, Config, Squeeze};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "squeeze=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(
        compress = config.squeeze.compress,
        minify_js = config.squeeze.minify_js,
        minify_css = config.squeeze.minify_css,
        minify_html = config.squeeze.minify_html,
        min_size = config.squeeze.min_size,
        "Starting squeeze server on port {}",
        config.port
    );

    let app = routes::router(Squeeze::new(config.squeeze));

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await
}
