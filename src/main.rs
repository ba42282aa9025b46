use anyhow::Result;

use housecalc_backend::{app, config, db, logging, store::PgPriceStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting housecalc backend"
    );

    // Create database pool
    let pool = db::create_pool(&settings).await?;

    // The reference price store is the only collaborator of the pricing
    // engine; every calculator reads point lookups through it.
    let store = PgPriceStore::new(pool.clone());

    // Create application state
    let state = app::AppState::new(pool, store, settings.clone());

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
