//! Upstream identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid stop or line identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id {value:?}: {reason}")]
pub struct InvalidId {
    kind: &'static str,
    value: String,
    reason: &'static str,
}

fn validate(kind: &'static str, s: &str) -> Result<(), InvalidId> {
    if s.is_empty() {
        return Err(InvalidId {
            kind,
            value: s.to_string(),
            reason: "must not be empty",
        });
    }

    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidId {
            kind,
            value: s.to_string(),
            reason: "must be ASCII digits",
        });
    }

    Ok(())
}

/// A bus stop identifier as assigned by the upstream provider.
///
/// Upstream ids are numeric but travel as strings in URLs; this type
/// guarantees the string is a non-empty run of ASCII digits.
///
/// # Examples
///
/// ```
/// use bus_server::domain::StopId;
///
/// let id = StopId::parse("378204").unwrap();
/// assert_eq!(id.as_str(), "378204");
///
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse("37a").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopId(String);

impl StopId {
    /// Parse a stop id.
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        validate("stop", s)?;
        Ok(Self(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopId {
    type Error = InvalidId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        validate("stop", &s)?;
        Ok(Self(s))
    }
}

impl From<StopId> for String {
    fn from(id: StopId) -> Self {
        id.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bus line identifier as assigned by the upstream provider.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LineId(String);

impl LineId {
    /// Parse a line id.
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        validate("line", s)?;
        Ok(Self(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LineId {
    type Error = InvalidId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        validate("line", &s)?;
        Ok(Self(s))
    }
}

impl From<LineId> for String {
    fn from(id: LineId) -> Self {
        id.0
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a single vehicle (bus).
///
/// Vehicles are referenced both from a line's roster and from stop
/// forecasts; the two views are correlated only through this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct VehicleId(pub i64);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
