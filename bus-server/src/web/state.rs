//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::arrivals::AggregatorConfig;
use crate::network::KnownNetwork;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
pub struct AppState<P> {
    /// Upstream stop/line source
    pub provider: Arc<P>,

    /// Known stops and lines
    pub network: Arc<KnownNetwork>,

    /// Arrival table configuration
    pub aggregator: Arc<AggregatorConfig>,

    /// Deadline for one request, upstream fetches included
    pub request_timeout: Duration,
}

impl<P> AppState<P> {
    /// Create a new app state.
    pub fn new(
        provider: P,
        network: KnownNetwork,
        aggregator: AggregatorConfig,
        request_timeout: Duration,
    ) -> Self {
        Self {
            provider: Arc::new(provider),
            network: Arc::new(network),
            aggregator: Arc::new(aggregator),
            request_timeout,
        }
    }
}

// Manual impl: cloning the state must not require `P: Clone`.
impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            network: Arc::clone(&self.network),
            aggregator: Arc::clone(&self.aggregator),
            request_timeout: self.request_timeout,
        }
    }
}
