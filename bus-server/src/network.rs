//! The known bus network: which stops and lines the service knows about.
//!
//! The upstream API has no "list all stops" endpoint, so the set of stops
//! scanned for forecasts and the display names of lines are configuration.
//! The built-in default describes the campus network; a JSON file can
//! replace it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{LineId, StopId};

const DEFAULT_STOPS: &[&str] = &[
    "378204", "383050", "378202", "383049", "382998", "378237", "378233", "378230", "378229",
    "378228", "378227", "382995", "378224", "378226", "383010", "383009", "383006", "383004",
    "378234", "383003", "378222", "383048", "378203", "382999", "378225", "383014", "383013",
    "383011", "377906", "383018", "383015", "378207",
];

const DEFAULT_LINES: &[(&str, &str)] = &[
    ("44478", "Campus Loop Red"),
    ("44479", "Campus Loop Blue"),
    ("44480", "Campus Rider Green"),
    ("44481", "Campus Weekend Rider Brown"),
];

/// Errors loading a network file.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("failed to read network file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid network file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A line the service can name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownLine {
    pub id: LineId,
    pub name: String,
}

/// Known stop ids (in scan order) and known lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownNetwork {
    pub stops: Vec<StopId>,
    pub lines: Vec<KnownLine>,
}

impl KnownNetwork {
    /// Create a network from explicit lists.
    pub fn new(stops: Vec<StopId>, lines: Vec<KnownLine>) -> Self {
        Self { stops, lines }
    }

    /// Load a network from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NetworkError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| NetworkError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| NetworkError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// Display name of a known line.
    pub fn line_name(&self, id: &LineId) -> Option<&str> {
        self.lines
            .iter()
            .find(|l| &l.id == id)
            .map(|l| l.name.as_str())
    }
}

impl Default for KnownNetwork {
    fn default() -> Self {
        // The constants are all-digit literals.
        let stops = DEFAULT_STOPS
            .iter()
            .filter_map(|s| StopId::parse(s).ok())
            .collect();
        let lines = DEFAULT_LINES
            .iter()
            .filter_map(|(id, name)| {
                LineId::parse(id).ok().map(|id| KnownLine {
                    id,
                    name: (*name).to_string(),
                })
            })
            .collect();
        Self { stops, lines }
    }
}
