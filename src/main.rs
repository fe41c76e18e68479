use girya::{config, db, router, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Girya in {:?} mode", config.environment);

    let pool = db::connect(&config.database).await?;
    db::migrate(&pool).await?;

    let app = router::app(AppState { pool });

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Girya listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
