use tracing_subscriber::EnvFilter;

use airport_server::airport::Airport;
use airport_server::config::AirportConfig;
use airport_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("airport_server=info,tower_http=info")),
        )
        .init();

    let config = AirportConfig::from_env().unwrap_or_else(|e| {
        tracing::error!("{e}");
        std::process::exit(2);
    });

    let airport = Airport::new(&config);
    tracing::info!(
        security_slots = airport.security.capacity(),
        landing_window_mins = config.landing_window_mins,
        "Airport ready"
    );

    let addr = config.bind_addr;
    let app = create_router(AppState::new(airport, config));

    tracing::info!("Airport server listening on http://{addr}");
    tracing::info!("API Endpoints:");
    tracing::info!("  GET  /health                 - Health check");
    tracing::info!("  GET  /terminals              - List terminals");
    tracing::info!("  POST /shuttles               - Add a shuttle");
    tracing::info!("  GET  /routes/fastest?from=&to= - Fastest route");
    tracing::info!("  GET  /board                  - Arrivals board");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
