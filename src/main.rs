use lms_api::app::app;
use lms_api::config;
use lms_api::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up MONGODB_URI, GOOGLE_API_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lms_api=info,tower_http=info".into()),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting LMS API in {:?} mode", config.environment);

    let app = app(AppState::new());

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("LMS API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
