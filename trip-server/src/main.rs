use tracing_subscriber::EnvFilter;

use trip_server::config::ServerConfig;
use trip_server::explain::ExplanationTable;
use trip_server::maps::{CacheConfig, MapService};
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trip_server=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let explanations = match &config.explanations {
        Some(path) => {
            let table = ExplanationTable::load(path)?;
            tracing::info!(path = %path.display(), entries = table.len(), "loaded explanations");
            table
        }
        None => ExplanationTable::builtin()?,
    };

    let maps = MapService::from_config(&config.maps, &CacheConfig::default())?;

    let state = AppState::new(config.session, explanations, maps);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("Trip planner listening on http://{}", config.addr);
    tracing::info!("  POST /session/start        - Start planning");
    tracing::info!("  POST /wizard/next          - Next wizard step");
    tracing::info!("  GET  /itinerary            - Generated itinerary");
    tracing::info!("  POST /booking              - Book the cart");

    axum::serve(listener, app).await?;
    Ok(())
}
