use flight_search::config::AppConfig;
use flight_search::planner::SearchConfig;
use flight_search::store::PgStore;
use flight_search::web::{AppState, create_router};
use tracing::{error, info};

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "invalid configuration");
        e
    })?;

    info!(
        port = config.port,
        max_connections = config.max_connections,
        "starting flight search service"
    );

    let store = PgStore::connect(&config).await.map_err(|e| {
        error!(error = %e, "failed to connect to database");
        e
    })?;
    store.ensure_schema().await?;

    let state = AppState::new(store, SearchConfig::default());
    let app = create_router(state);

    let addr = config.listen_addr();
    info!(addr = %addr, "listening");
    println!("API Endpoints:");
    println!("  GET  /health                  - Health check");
    println!("  GET  /api/v1/routes/search    - Search itineraries");
    println!("  POST /api/v1/permitted_routes - Import permitted routes");
    println!("  POST /api/v1/segments         - Import flight segments");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
