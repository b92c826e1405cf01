//! Server configuration from environment variables.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::arrivals::AggregatorConfig;
use crate::network::{KnownNetwork, NetworkError};
use crate::uwave::{DEFAULT_BASE_URL, DecodeMode, UwaveConfig};

/// Default overall deadline for one inbound request, in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {var}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Everything the server needs at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (`BUS_SERVER_ADDR`).
    pub addr: SocketAddr,

    /// Upstream client settings (`UWAVE_*`).
    pub uwave: UwaveConfig,

    /// Arrival table settings (`BUS_FETCH_CONCURRENCY`).
    pub aggregator: AggregatorConfig,

    /// Deadline for one inbound request (`BUS_REQUEST_TIMEOUT_SECS`).
    pub request_timeout: Duration,

    /// Known network override (`BUS_NETWORK_FILE`).
    pub network_file: Option<PathBuf>,

    /// Serve fixtures instead of the live upstream (`UWAVE_MOCK_DIR`).
    pub mock_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = parse_var(&lookup, "BUS_SERVER_ADDR")?.unwrap_or_else(default_addr);

        let base_url = lookup("UWAVE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut uwave = UwaveConfig::new(base_url);
        if let Some(secs) = parse_var(&lookup, "UWAVE_TIMEOUT_SECS")? {
            uwave = uwave.with_timeout(secs);
        }
        if let Some(n) = parse_var(&lookup, "UWAVE_MAX_CONCURRENT")? {
            uwave = uwave.with_max_concurrent(n);
        }
        if let Some(strict) = parse_flag(&lookup, "UWAVE_STRICT_DECODING")? {
            uwave = uwave.with_decode_mode(DecodeMode::from_strict(strict));
        }

        let aggregator = match parse_var(&lookup, "BUS_FETCH_CONCURRENCY")? {
            Some(n) => AggregatorConfig::new(n),
            None => AggregatorConfig::default(),
        };

        let request_timeout = Duration::from_secs(
            parse_var(&lookup, "BUS_REQUEST_TIMEOUT_SECS")?.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        );

        Ok(Self {
            addr,
            uwave,
            aggregator,
            request_timeout,
            network_file: lookup("BUS_NETWORK_FILE").map(PathBuf::from),
            mock_dir: lookup("UWAVE_MOCK_DIR").map(PathBuf::from),
        })
    }

    /// The known network: the override file if set, else the built-in one.
    pub fn load_network(&self) -> Result<KnownNetwork, NetworkError> {
        match &self.network_file {
            Some(path) => KnownNetwork::load(path),
            None => Ok(KnownNetwork::default()),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            uwave: UwaveConfig::default(),
            aggregator: AggregatorConfig::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            network_file: None,
            mock_dir: None,
        }
    }
}

/// Default listen address, 127.0.0.1:8080.
fn default_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    lookup(var)
        .map(|value| {
            value.trim().parse::<T>().map_err(|e| ConfigError {
                var,
                value: value.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

fn parse_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<bool>, ConfigError> {
    lookup(var)
        .map(|value| match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(ConfigError {
                var,
                value: value.clone(),
                reason: "expected true or false".to_string(),
            }),
        })
        .transpose()
}
