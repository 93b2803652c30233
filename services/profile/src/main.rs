use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use common::database::{DatabaseConfig, init_pool};
use profile::{repositories::ProfileRepository, routes, schema, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting profile service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Make sure the profile store tables exist
    schema::init_schema(&pool).await?;

    info!("Profile service initialized successfully");

    let profile_repository = ProfileRepository::new(pool.clone());

    let app_state = AppState {
        db_pool: pool,
        profile_repository,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3002").await?;
    info!("Profile service listening on 0.0.0.0:3002");

    axum::serve(listener, app).await?;

    Ok(())
}
