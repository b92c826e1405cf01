//! Decoding of upstream response bodies.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use tracing::warn;

use super::error::UwaveError;

/// Maximum number of body characters kept in errors and logs.
const BODY_SNIPPET_CHARS: usize = 500;

/// How malformed upstream documents are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// A body that is not a JSON document yields a zero-valued record
    /// and a warning; non-success statuses are decoded the same way.
    #[default]
    Lenient,

    /// Bodies that are not a JSON document and non-success statuses are
    /// errors.
    Strict,
}

impl DecodeMode {
    /// Build a mode from a "strict" flag.
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            DecodeMode::Strict
        } else {
            DecodeMode::Lenient
        }
    }

    /// Decode a response body into `T`.
    ///
    /// `resource` names the document for logs (e.g. `busstop/378204`).
    /// Field-level problems never reach this point; the DTOs default
    /// them individually.
    pub fn decode<T>(self, resource: &str, body: &str) -> Result<T, UwaveError>
    where
        T: DeserializeOwned + Default,
    {
        match serde_json::from_str(body) {
            Ok(value) => Ok(value),
            Err(e) => match self {
                DecodeMode::Lenient => {
                    warn!(
                        resource,
                        error = %e,
                        "malformed upstream document, using empty record"
                    );
                    Ok(T::default())
                }
                DecodeMode::Strict => Err(UwaveError::Decode {
                    message: e.to_string(),
                    body: Some(snippet(body)),
                }),
            },
        }
    }

    /// Handle a non-success HTTP status.
    ///
    /// Lenient mode logs and lets the caller decode the body anyway;
    /// strict mode turns the status into an error.
    pub fn check_status(self, resource: &str, status: u16, body: &str) -> Result<(), UwaveError> {
        if (200..300).contains(&status) {
            return Ok(());
        }

        match self {
            DecodeMode::Lenient => {
                warn!(resource, status, "upstream returned non-success status");
                Ok(())
            }
            DecodeMode::Strict => Err(UwaveError::Api {
                status,
                message: snippet(body),
            }),
        }
    }
}

impl fmt::Display for DecodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeMode::Lenient => f.write_str("lenient"),
            DecodeMode::Strict => f.write_str("strict"),
        }
    }
}

impl FromStr for DecodeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(DecodeMode::Lenient),
            "strict" => Ok(DecodeMode::Strict),
            other => Err(format!("unknown decode mode: {other}")),
        }
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_CHARS).collect()
}
