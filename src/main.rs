// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use weather_or_not::application::dashboard_service::DashboardService;
use weather_or_not::application::location_service::LocationService;
use weather_or_not::infrastructure::config::{load_app_config, load_dashboard_config};
use weather_or_not::infrastructure::file_repository::FileReadingRepository;
use weather_or_not::presentation::app_state::AppState;
use weather_or_not::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let app_config = load_app_config()?;
    let dashboard_config = load_dashboard_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(FileReadingRepository::load(&app_config.data.directory).await?);

    // Create services (application layer)
    let location_service = LocationService::new(repository.clone());
    let dashboard_service = DashboardService::new(repository.clone(), dashboard_config);

    // Create application state
    let state = Arc::new(AppState {
        location_service,
        dashboard_service,
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = app_config.server.bind_address.parse()?;
    tracing::info!("Starting weather-or-not service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
