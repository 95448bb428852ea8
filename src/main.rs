//!
//! Room-reservation service entry point.
//! Reads configuration from a TOML file (~/.config/stayhub/config.toml).

use std::sync::Arc;
use std::time::Duration;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use stayhub::application::payments::{PaymentGateway, UnconfiguredPaymentGateway};
use stayhub::application::reservations::{
    start_expiry_sweeper, ReservationPolicy, ReservationService,
};
use stayhub::infrastructure::database::migrator::Migrator;
use stayhub::infrastructure::gateway::{HttpPaymentGateway, PaymentGatewayConfig};
use stayhub::shared::clock::SystemClock;
use stayhub::shared::retry::RetryConfig;
use stayhub::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
use stayhub::{
    create_api_router, default_config_path, init_database, AppConfig, DatabaseConfig,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("STAYHUB_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting StayHub reservation service...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
    };
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Wire the engine (no globals; everything injected) ──────
    let repos: Arc<dyn stayhub::domain::RepositoryProvider> =
        Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    let gateway: Arc<dyn PaymentGateway> = if app_cfg.gateway.enabled {
        info!("Payment gateway enabled: {}", app_cfg.gateway.base_url);
        Arc::new(HttpPaymentGateway::new(PaymentGatewayConfig {
            base_url: app_cfg.gateway.base_url.clone(),
            server_key: app_cfg.gateway.server_key.clone(),
            timeout: Duration::from_secs(app_cfg.gateway.timeout_secs),
            retry: RetryConfig::default(),
        }))
    } else {
        info!("Payment gateway disabled; gateway bookings downgrade to manual transfer");
        Arc::new(UnconfiguredPaymentGateway)
    };

    let policy = ReservationPolicy {
        hold: chrono::Duration::minutes(app_cfg.booking.hold_minutes),
        ..ReservationPolicy::default()
    };
    let service = Arc::new(ReservationService::new(
        repos,
        gateway,
        Arc::new(SystemClock),
        policy,
    ));

    // ── Shutdown signal (SIGTERM, SIGINT) ──────────────────────
    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    // ── Expiry sweeper ─────────────────────────────────────────
    start_expiry_sweeper(
        service.clone(),
        shutdown.clone(),
        app_cfg.booking.sweep_interval_secs,
    );

    // ── REST API server with graceful shutdown ─────────────────
    let api_router = create_api_router(service);
    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown.clone();
    axum::serve(listener, api_router)
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await?;

    // ── Final cleanup ──────────────────────────────────────────
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("StayHub reservation service shutdown complete");
    Ok(())
}
