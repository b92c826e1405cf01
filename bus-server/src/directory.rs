//! Stop name lookup.
//!
//! Maps human-readable stop names to upstream stop ids for the name-based
//! routes. The index is rebuilt from live stop documents on every request
//! that needs it.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{Stop, StopId};
use crate::uwave::{TransitProvider, UwaveError, fetch_stops};

/// Stop name → stop id index.
///
/// Names are iterated in sorted order. When two ids resolve to the same
/// name, the one later in the input wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopDirectory {
    by_name: BTreeMap<String, StopId>,
}

impl StopDirectory {
    /// Build the index by fetching every stop in `ids`.
    pub async fn build<P: TransitProvider>(
        provider: &P,
        ids: &[StopId],
        concurrency: usize,
    ) -> Result<Self, UwaveError> {
        let stops = fetch_stops(provider, ids, concurrency).await?;
        let directory = build_name_index(ids.iter().cloned().zip(stops));
        debug!(
            stops = ids.len(),
            names = directory.by_name.len(),
            "built stop directory"
        );
        Ok(directory)
    }

    /// Look up a stop id by exact name.
    pub fn get(&self, name: &str) -> Option<&StopId> {
        self.by_name.get(name)
    }

    /// All known names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }
}

/// Build the name index from fetched stops, last write wins.
pub fn build_name_index(stops: impl IntoIterator<Item = (StopId, Stop)>) -> StopDirectory {
    let mut by_name = BTreeMap::new();
    for (id, stop) in stops {
        by_name.insert(stop.name, id);
    }
    StopDirectory { by_name }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uwave::{DecodeMode, MockUwaveClient};

    fn id(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    fn named(name: &str) -> Stop {
        Stop {
            name: name.to_string(),
            ..Stop::default()
        }
    }

    #[test]
    fn later_duplicate_name_wins() {
        let directory = build_name_index(vec![
            (id("1"), named("Hall 6")),
            (id("2"), named("Hall 2")),
            (id("3"), named("Hall 6")),
        ]);

        assert_eq!(directory.names().count(), 2);
        assert_eq!(directory.get("Hall 6"), Some(&id("3")));
        assert_eq!(directory.get("Hall 2"), Some(&id("2")));
        assert_eq!(directory.get("Hall 9"), None);
    }

    #[test]
    fn names_are_sorted() {
        let directory = build_name_index(vec![
            (id("1"), named("Opp Hall 6")),
            (id("2"), named("Hall 2")),
            (id("3"), named("Canteen 2")),
        ]);

        let names: Vec<_> = directory.names().collect();
        assert_eq!(names, ["Canteen 2", "Hall 2", "Opp Hall 6"]);
    }

    #[tokio::test]
    async fn build_fetches_each_stop() {
        let mock = MockUwaveClient::new(DecodeMode::Lenient)
            .with_stop(id("378204"), r#"{"name": "Hall 6"}"#)
            .with_stop(id("383050"), r#"{"name": "Hall 2"}"#)
            .with_stop(id("378202"), r#"{"name": "Hall 6"}"#);

        let directory = StopDirectory::build(&mock, &[id("378204"), id("383050"), id("378202")], 2)
            .await
            .unwrap();

        assert_eq!(mock.stop_fetch_count(), 3);
        assert_eq!(directory.get("Hall 6"), Some(&id("378202")));
        assert_eq!(directory.get("Hall 2"), Some(&id("383050")));
    }

    #[tokio::test]
    async fn build_propagates_fetch_failure() {
        let mock = MockUwaveClient::new(DecodeMode::Lenient);
        let result = StopDirectory::build(&mock, &[id("1")], 1).await;
        assert!(result.is_err());
    }
}
