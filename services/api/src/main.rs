use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use std::path::PathBuf;

use common::database::{self, DatabaseConfig};
use common::error::DatabaseError;
use tokio::net::TcpListener;

use api::{
    jwt::{JwtConfig, JwtService},
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting fridge-share API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    // Apply pending migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;

    // Check database connectivity
    database::health_check(&pool).await?;
    info!("Database connection successful");

    // Initialize JWT service
    let jwt_config = JwtConfig::from_env()?;
    let jwt_service = JwtService::new(jwt_config);

    let static_dir = std::env::var("STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("frontend/dist"));

    let app_state = AppState::new(pool, jwt_service, static_dir);

    info!("API service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("API service listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
