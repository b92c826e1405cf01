//! uWave bus tracking API client.
//!
//! The upstream exposes two read-only documents keyed by numeric id:
//! `busstop/{id}` (name, live forecasts, geometry) and `busline/{id}`
//! (name, vehicle roster). Documents are loosely structured: absent fields
//! default, unknown fields are ignored, and by default a body that fails
//! to parse degrades to an empty record (see [`DecodeMode`]).

mod client;
mod convert;
mod decode;
mod error;
mod mock;
mod provider;
mod types;

pub use client::{DEFAULT_BASE_URL, UwaveClient, UwaveConfig};
pub use decode::DecodeMode;
pub use error::UwaveError;
pub use mock::MockUwaveClient;
pub use provider::{TransitProvider, fetch_stops};
