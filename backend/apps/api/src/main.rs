//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use auth::application::PromoteUserUseCase;
use auth::middleware::AuthMiddlewareState;
use auth::{PgAuthRepository, auth_router};
use axum::{
    Json, Router, http,
    http::{Method, header},
    routing::get,
};
use catalog::application::config::UPLOADS_URL_PREFIX;
use catalog::{DiskImageStore, PgCatalogRepository, catalog_router};
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_repo = PgAuthRepository::new(pool.clone());

    // Bootstrap admin: failures are logged, never fatal
    if let Some(email) = &config.bootstrap_admin_email {
        match PromoteUserUseCase::new(Arc::new(auth_repo.clone()))
            .promote_by_email(email)
            .await
        {
            Ok(Some(user)) => {
                tracing::info!(user_id = %user.user_id, "Bootstrap admin ready");
            }
            Ok(None) => {
                tracing::warn!(email = %email, "Bootstrap admin email is not registered yet");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Bootstrap admin promotion failed, continuing anyway");
            }
        }
    }

    // Upload directory
    let image_store = DiskImageStore::new(config.catalog.upload_dir.clone());
    image_store.ensure_dir().await?;
    tracing::info!(upload_dir = %config.catalog.upload_dir.display(), "Upload directory ready");

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let auth_middleware = AuthMiddlewareState::new(
        Arc::new(auth_repo.clone()),
        Arc::new(config.auth.clone()),
    );

    let api = Router::new()
        .route("/health", get(health))
        .merge(auth_router(auth_repo, config.auth.clone()))
        .merge(catalog_router(
            PgCatalogRepository::new(pool.clone()),
            image_store,
            config.catalog.clone(),
            auth_middleware,
        ));

    let app = Router::new()
        .nest("/api", api)
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(&config.catalog.upload_dir))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// GET /api/health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Authentication service is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> AppError {
    AppError::not_found("Route not found")
}
