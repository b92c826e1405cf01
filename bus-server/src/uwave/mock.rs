//! Mock uWave client for testing without API access.
//!
//! Serves raw JSON documents from memory, decoding them through the same
//! [`DecodeMode`] path as the live client. Documents can be registered one
//! by one or loaded from a fixture directory laid out as
//! `stops/{id}.json` and `lines/{id}.json`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{Line, LineId, Stop, StopId};

use super::decode::DecodeMode;
use super::error::UwaveError;
use super::provider::TransitProvider;
use super::types::{BusLineDto, BusStopDto};

/// Mock uWave client backed by in-memory documents.
#[derive(Debug, Default)]
pub struct MockUwaveClient {
    stops: HashMap<StopId, String>,
    lines: HashMap<LineId, String>,
    decode_mode: DecodeMode,
    stop_fetches: AtomicUsize,
}

impl MockUwaveClient {
    /// Create an empty mock with the given decoding mode.
    pub fn new(decode_mode: DecodeMode) -> Self {
        Self {
            decode_mode,
            ..Self::default()
        }
    }

    /// Register a stop document.
    pub fn with_stop(mut self, id: StopId, body: impl Into<String>) -> Self {
        self.stops.insert(id, body.into());
        self
    }

    /// Register a line document.
    pub fn with_line(mut self, id: LineId, body: impl Into<String>) -> Self {
        self.lines.insert(id, body.into());
        self
    }

    /// Load documents from a fixture directory.
    ///
    /// Expects `stops/{id}.json` and `lines/{id}.json`; either
    /// subdirectory may be absent.
    pub fn from_dir(dir: impl AsRef<Path>, decode_mode: DecodeMode) -> Result<Self, UwaveError> {
        let dir = dir.as_ref();
        let mut mock = Self::new(decode_mode);

        for (id, body) in read_documents(&dir.join("stops"))? {
            let id = StopId::parse(&id).map_err(|e| UwaveError::MockData {
                message: e.to_string(),
            })?;
            mock.stops.insert(id, body);
        }

        for (id, body) in read_documents(&dir.join("lines"))? {
            let id = LineId::parse(&id).map_err(|e| UwaveError::MockData {
                message: e.to_string(),
            })?;
            mock.lines.insert(id, body);
        }

        if mock.stops.is_empty() && mock.lines.is_empty() {
            return Err(UwaveError::MockData {
                message: format!("no mock documents found in {}", dir.display()),
            });
        }

        Ok(mock)
    }

    /// Number of stop documents served so far (decoded or raw).
    pub fn stop_fetch_count(&self) -> usize {
        self.stop_fetches.load(Ordering::Relaxed)
    }

    fn stop_body(&self, id: &StopId) -> Result<&str, UwaveError> {
        self.stop_fetches.fetch_add(1, Ordering::Relaxed);
        self.stops
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| UwaveError::MockMissing {
                resource: format!("busstop/{id}"),
            })
    }
}

/// Read every `*.json` file in `dir` as `(file stem, contents)`.
fn read_documents(dir: &Path) -> Result<Vec<(String, String)>, UwaveError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir).map_err(|e| UwaveError::MockData {
        message: format!("failed to read {}: {e}", dir.display()),
    })?;

    let mut documents = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| UwaveError::MockData {
                message: format!("failed to read directory entry: {e}"),
            })?
            .path();

        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let body = std::fs::read_to_string(&path).map_err(|e| UwaveError::MockData {
            message: format!("failed to read {}: {e}", path.display()),
        })?;
        documents.push((stem.to_string(), body));
    }

    Ok(documents)
}

impl TransitProvider for MockUwaveClient {
    async fn fetch_stop(&self, id: &StopId) -> Result<Stop, UwaveError> {
        let body = self.stop_body(id)?;
        let dto: BusStopDto = self.decode_mode.decode(&format!("busstop/{id}"), body)?;
        Ok(dto.into())
    }

    async fn fetch_line(&self, id: &LineId) -> Result<Line, UwaveError> {
        let resource = format!("busline/{id}");
        let body = self
            .lines
            .get(id)
            .ok_or_else(|| UwaveError::MockMissing {
                resource: resource.clone(),
            })?;
        let dto: BusLineDto = self.decode_mode.decode(&resource, body)?;
        Ok(dto.into())
    }

    async fn fetch_stop_raw(&self, id: &StopId) -> Result<String, UwaveError> {
        self.stop_body(id).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn stop_id(s: &str) -> StopId {
        StopId::parse(s).unwrap()
    }

    #[tokio::test]
    async fn serves_registered_documents() {
        let mock = MockUwaveClient::new(DecodeMode::Lenient)
            .with_stop(stop_id("378204"), r#"{"id": 378204, "name": "Hall 6"}"#)
            .with_line(LineId::parse("44478").unwrap(), r#"{"id": 44478}"#);

        let stop = mock.fetch_stop(&stop_id("378204")).await.unwrap();
        assert_eq!(stop.name, "Hall 6");

        let line = mock.fetch_line(&LineId::parse("44478").unwrap()).await.unwrap();
        assert_eq!(line.id, 44478);
        assert_eq!(mock.stop_fetch_count(), 1);
    }

    #[tokio::test]
    async fn missing_document_is_error() {
        let mock = MockUwaveClient::new(DecodeMode::Lenient);
        let err = mock.fetch_stop(&stop_id("1")).await.unwrap_err();
        assert_eq!(err.to_string(), "no mock document for busstop/1");
    }

    #[tokio::test]
    async fn decode_mode_applies() {
        let lenient = MockUwaveClient::new(DecodeMode::Lenient).with_stop(stop_id("1"), "{oops");
        assert_eq!(lenient.fetch_stop(&stop_id("1")).await.unwrap(), Stop::default());

        let strict = MockUwaveClient::new(DecodeMode::Strict).with_stop(stop_id("1"), "{oops");
        assert!(strict.fetch_stop(&stop_id("1")).await.is_err());
        assert_eq!(strict.fetch_stop_raw(&stop_id("1")).await.unwrap(), "{oops");
    }

    #[tokio::test]
    async fn loads_fixture_directory() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("stops")).unwrap();
        std::fs::create_dir_all(dir.path().join("lines")).unwrap();
        std::fs::write(
            dir.path().join("stops").join("378204.json"),
            r#"{"name": "Hall 6"}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("stops").join("README.txt"), "ignored").unwrap();
        std::fs::write(
            dir.path().join("lines").join("44478.json"),
            r#"{"id": 44478, "vehicles": []}"#,
        )
        .unwrap();

        let mock = MockUwaveClient::from_dir(dir.path(), DecodeMode::Lenient).unwrap();
        let stop = mock.fetch_stop(&stop_id("378204")).await.unwrap();
        assert_eq!(stop.name, "Hall 6");
        let line = mock.fetch_line(&LineId::parse("44478").unwrap()).await.unwrap();
        assert!(line.is_idle());
    }

    #[test]
    fn empty_fixture_directory_is_error() {
        let dir = tempdir().unwrap();
        assert!(MockUwaveClient::from_dir(dir.path(), DecodeMode::Lenient).is_err());
    }

    #[test]
    fn bad_fixture_name_is_error() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("stops")).unwrap();
        std::fs::write(dir.path().join("stops").join("hall.json"), "{}").unwrap();
        assert!(MockUwaveClient::from_dir(dir.path(), DecodeMode::Lenient).is_err());
    }
}
