//! HTTP route handlers.
//!
//! Every route fetches fresh upstream data. Unknown names and ids are
//! answered with suggestions rather than error statuses; only upstream
//! failures, malformed ids and timeouts produce error responses.

use std::future::Future;
use std::time::Duration;

use askama::Template;
use axum::{
    Router,
    extract::{Path, State},
    response::Html,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::arrivals::Aggregator;
use crate::directory::StopDirectory;
use crate::domain::{LineId, StopId};
use crate::uwave::TransitProvider;

use super::error::AppError;
use super::render;
use super::state::AppState;
use super::templates::IndexTemplate;

/// Create the application router.
pub fn create_router<P>(state: AppState<P>) -> Router
where
    P: TransitProvider + 'static,
{
    Router::new()
        .route("/", get(index_page::<P>))
        .route("/health", get(health))
        .route("/BusStop/:id", get(stop_by_id::<P>))
        .route("/BusStopName/:name", get(stop_by_name::<P>))
        .route("/BusStopLists/:name", get(stop_forecasts::<P>))
        .route("/BusStopList/:name/:id", get(stop_forecast_for_line::<P>))
        .route("/BusLine/:id", get(line_arrivals::<P>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run a handler body under the request deadline.
///
/// Dropping the body future on timeout also drops its in-flight
/// upstream requests.
async fn with_deadline<T>(
    timeout: Duration,
    body: impl Future<Output = Result<T, AppError>>,
) -> Result<T, AppError> {
    tokio::time::timeout(timeout, body)
        .await
        .map_err(|_| AppError::Timeout(timeout))?
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page listing the routes and known lines.
async fn index_page<P>(State(state): State<AppState<P>>) -> Result<Html<String>, AppError> {
    let page = IndexTemplate {
        lines: state.network.lines.clone(),
        stop_count: state.network.stops.len(),
    };
    Ok(Html(page.render()?))
}

/// Raw stop document by id.
async fn stop_by_id<P: TransitProvider>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
) -> Result<String, AppError> {
    let id = StopId::parse(&id)?;
    with_deadline(state.request_timeout, async {
        Ok(state.provider.fetch_stop_raw(&id).await?)
    })
    .await
}

/// Build the name index, then resolve `name` against it.
async fn resolve_stop<P: TransitProvider>(
    state: &AppState<P>,
    name: &str,
) -> Result<Result<StopId, String>, AppError> {
    let directory = StopDirectory::build(
        state.provider.as_ref(),
        &state.network.stops,
        state.aggregator.fetch_concurrency,
    )
    .await?;

    match directory.get(name) {
        Some(id) => Ok(Ok(id.clone())),
        None => {
            debug!(name, "unknown stop name");
            Ok(Err(render::unknown_stop(name, &directory)))
        }
    }
}

/// Raw stop document by name.
async fn stop_by_name<P: TransitProvider>(
    State(state): State<AppState<P>>,
    Path(name): Path<String>,
) -> Result<String, AppError> {
    with_deadline(state.request_timeout, async {
        match resolve_stop(&state, &name).await? {
            Ok(id) => Ok(state.provider.fetch_stop_raw(&id).await?),
            Err(suggestions) => Ok(suggestions),
        }
    })
    .await
}

/// Every forecast at the named stop.
async fn stop_forecasts<P: TransitProvider>(
    State(state): State<AppState<P>>,
    Path(name): Path<String>,
) -> Result<String, AppError> {
    with_deadline(state.request_timeout, async {
        match resolve_stop(&state, &name).await? {
            Ok(id) => {
                let stop = state.provider.fetch_stop(&id).await?;
                Ok(render::stop_forecasts(&stop))
            }
            Err(suggestions) => Ok(suggestions),
        }
    })
    .await
}

/// The first forecast at the named stop for one line.
async fn stop_forecast_for_line<P: TransitProvider>(
    State(state): State<AppState<P>>,
    Path((name, line)): Path<(String, String)>,
) -> Result<String, AppError> {
    with_deadline(state.request_timeout, async {
        let id = match resolve_stop(&state, &name).await? {
            Ok(id) => id,
            Err(suggestions) => return Ok(suggestions),
        };

        let line_name = LineId::parse(&line)
            .ok()
            .and_then(|l| state.network.line_name(&l).map(|n| (l, n.to_string())));
        let Some((line_id, line_name)) = line_name else {
            debug!(line = %line, "unknown line id");
            return Ok(render::unknown_line(&line, &state.network));
        };

        let stop = state.provider.fetch_stop(&id).await?;
        let forecast = stop.first_forecast_for_line(&line_id);
        Ok(render::stop_forecast_for_line(forecast, &line_name))
    })
    .await
}

/// Arrival table for every bus on a line.
async fn line_arrivals<P: TransitProvider>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
) -> Result<String, AppError> {
    let line_id = LineId::parse(&id)?;
    with_deadline(state.request_timeout, async {
        let result = Aggregator::new(state.provider.as_ref(), &state.aggregator)
            .aggregate(&line_id, &state.network.stops)
            .await?;
        Ok(render::line_arrivals(&result))
    })
    .await
}
