use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bus_server::config::ServerConfig;
use bus_server::uwave::{MockUwaveClient, TransitProvider, UwaveClient};
use bus_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bus_server=info,tower_http=info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let network = match config.load_network() {
        Ok(network) => network,
        Err(e) => {
            error!("failed to load network: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        stops = network.stops.len(),
        lines = network.lines.len(),
        "loaded known network"
    );

    let result = match &config.mock_dir {
        Some(dir) => {
            let client = match MockUwaveClient::from_dir(dir, config.uwave.decode_mode) {
                Ok(client) => client,
                Err(e) => {
                    error!("failed to load mock upstream from {}: {e}", dir.display());
                    return ExitCode::FAILURE;
                }
            };
            info!(dir = %dir.display(), "serving from mock upstream");
            serve(client, network, &config).await
        }
        None => {
            let client = match UwaveClient::new(config.uwave.clone()) {
                Ok(client) => client,
                Err(e) => {
                    error!("failed to create uWave client: {e}");
                    return ExitCode::FAILURE;
                }
            };
            info!(
                base_url = %config.uwave.base_url,
                decode_mode = %client.decode_mode(),
                "using uWave upstream"
            );
            serve(client, network, &config).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("server error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn serve<P>(
    provider: P,
    network: bus_server::network::KnownNetwork,
    config: &ServerConfig,
) -> std::io::Result<()>
where
    P: TransitProvider + 'static,
{
    let state = AppState::new(
        provider,
        network,
        config.aggregator.clone(),
        config.request_timeout,
    );
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("bus arrival server listening on http://{}", config.addr);
    info!("open http://{} in your browser for the route list", config.addr);

    axum::serve(listener, app).await
}
