//! The seam between request handling and the upstream data source.

use std::future::Future;

use futures::{StreamExt, TryStreamExt, stream};

use crate::domain::{Line, LineId, Stop, StopId};

use super::error::UwaveError;

/// Source of stop and line documents.
///
/// Implemented by the live [`UwaveClient`](super::UwaveClient) and by
/// [`MockUwaveClient`](super::MockUwaveClient), so the aggregator and the
/// web layer can be exercised without network access.
pub trait TransitProvider: Send + Sync {
    /// Fetch and decode a stop document.
    fn fetch_stop(&self, id: &StopId) -> impl Future<Output = Result<Stop, UwaveError>> + Send;

    /// Fetch and decode a line document.
    fn fetch_line(&self, id: &LineId) -> impl Future<Output = Result<Line, UwaveError>> + Send;

    /// Fetch a stop document without decoding it.
    fn fetch_stop_raw(&self, id: &StopId)
    -> impl Future<Output = Result<String, UwaveError>> + Send;
}

/// Fetch every stop in `ids`, at most `concurrency` at a time.
///
/// Results come back in the order of `ids` regardless of completion
/// order. The first failure aborts the batch.
pub async fn fetch_stops<P: TransitProvider>(
    provider: &P,
    ids: &[StopId],
    concurrency: usize,
) -> Result<Vec<Stop>, UwaveError> {
    let fetches: Vec<_> = ids.iter().map(|id| provider.fetch_stop(id)).collect();

    stream::iter(fetches)
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}
