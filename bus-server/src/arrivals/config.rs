//! Aggregator configuration.

/// Default number of stop documents fetched in parallel.
const DEFAULT_FETCH_CONCURRENCY: usize = 4;

/// Configuration parameters for building arrival tables.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Maximum number of stop fetches in flight for one request.
    /// `1` fetches strictly one stop after another.
    pub fetch_concurrency: usize,
}

impl AggregatorConfig {
    /// Create a new configuration.
    pub fn new(fetch_concurrency: usize) -> Self {
        Self {
            fetch_concurrency: fetch_concurrency.max(1),
        }
    }

    /// Sequential fetching, one stop at a time.
    pub fn sequential() -> Self {
        Self::new(1)
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_CONCURRENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        assert_eq!(AggregatorConfig::default().fetch_concurrency, 4);
    }

    #[test]
    fn zero_concurrency_is_sequential() {
        assert_eq!(AggregatorConfig::new(0).fetch_concurrency, 1);
        assert_eq!(AggregatorConfig::sequential().fetch_concurrency, 1);
    }
}
