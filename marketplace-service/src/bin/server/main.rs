use std::sync::Arc;

use auth::Authenticator;
use marketplace_service::config::Config;
use marketplace_service::inbound::http::router::create_router;
use marketplace_service::outbound::images::HttpImageInspector;
use marketplace_service::outbound::repositories::PostgresListingRepository;
use marketplace_service::outbound::repositories::PostgresUserRepository;
use marketplace_service::ListingService;
use marketplace_service::UserService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marketplace_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "marketplace-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        image_fetch_timeout_secs = config.images.fetch_timeout_secs,
        image_max_size_bytes = config.images.max_size_bytes,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes())?);
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let listing_repository = Arc::new(PostgresListingRepository::new(pg_pool));
    let image_inspector = Arc::new(HttpImageInspector::new(
        config.images.fetch_timeout(),
        config.images.max_size_bytes,
    )?);

    let user_service = Arc::new(UserService::new(
        user_repository,
        Arc::clone(&authenticator),
    ));
    let listing_service = Arc::new(ListingService::new(listing_repository, image_inspector));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, listing_service, authenticator);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
