//! uWave API response DTOs.
//!
//! These types map directly to the upstream JSON documents, which are
//! loosely structured. Every field defaults when absent, unknown fields
//! are ignored, and a field holding `null` or a value of the wrong type
//! decodes to its default without affecting its siblings.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// Decode one field, falling back to its default on `null` or a type
/// mismatch.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(from_value_or_default(value))
}

/// Decode an array field element by element. A non-array decodes to an
/// empty list; a malformed element decodes to its default.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.into_iter().map(from_value_or_default).collect()),
        Value::Null => Ok(Vec::new()),
        other => {
            debug!(value = %other, "expected an array, using empty list");
            Ok(Vec::new())
        }
    }
}

fn from_value_or_default<T: DeserializeOwned + Default>(value: Value) -> T {
    if value.is_null() {
        return T::default();
    }
    T::deserialize(&value).unwrap_or_else(|e| {
        debug!(value = %value, error = %e, "malformed field, using default");
        T::default()
    })
}

/// Response from `GET /busstop/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BusStopDto {
    #[serde(deserialize_with = "lenient")]
    pub id: i64,
    #[serde(deserialize_with = "lenient")]
    pub external_id: String,
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(alias = "Name_en", deserialize_with = "lenient")]
    pub name_en: String,
    #[serde(alias = "Name_ru", deserialize_with = "lenient")]
    pub name_ru: String,
    #[serde(alias = "Nameslug", deserialize_with = "lenient")]
    pub nameslug: String,
    #[serde(alias = "Resource_uri", deserialize_with = "lenient")]
    pub resource_uri: String,

    /// Predicted waits for approaching vehicles.
    #[serde(deserialize_with = "lenient_seq")]
    pub forecast: Vec<ForecastDto>,

    #[serde(deserialize_with = "lenient_seq")]
    pub geometry: Vec<GeometryDto>,
}

/// One entry of a stop's `forecast` array.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ForecastDto {
    #[serde(deserialize_with = "lenient")]
    pub forecast_seconds: f64,
    #[serde(deserialize_with = "lenient")]
    pub route: RouteDto,
    /// Id of the bus line this forecast belongs to.
    #[serde(deserialize_with = "lenient")]
    pub rv_id: i64,
    #[serde(deserialize_with = "lenient")]
    pub total_pass: f64,
    #[serde(deserialize_with = "lenient")]
    pub vehicle: String,
    #[serde(deserialize_with = "lenient")]
    pub vehicle_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteDto {
    #[serde(deserialize_with = "lenient")]
    pub id: i64,
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub short_name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GeometryDto {
    #[serde(deserialize_with = "lenient")]
    pub external_id: String,
    #[serde(deserialize_with = "lenient")]
    pub lat: String,
    #[serde(deserialize_with = "lenient")]
    pub lon: String,
    #[serde(deserialize_with = "lenient")]
    pub seq: i64,
}

/// Response from `GET /busline/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BusLineDto {
    #[serde(deserialize_with = "lenient")]
    pub id: i64,
    #[serde(deserialize_with = "lenient")]
    pub external_id: String,
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub name_en: String,
    #[serde(deserialize_with = "lenient")]
    pub name_ru: String,
    #[serde(deserialize_with = "lenient")]
    pub nameslug: String,
    #[serde(alias = "Resource_uri", deserialize_with = "lenient")]
    pub resource_uri: String,
    #[serde(deserialize_with = "lenient")]
    pub routename: String,
    #[serde(deserialize_with = "lenient")]
    pub via: String,

    /// Vehicles currently running on the line.
    #[serde(deserialize_with = "lenient_seq")]
    pub vehicles: Vec<VehicleDto>,
}

/// A vehicle on a line's roster.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VehicleDto {
    #[serde(deserialize_with = "lenient")]
    pub vehicle_id: i64,
    #[serde(deserialize_with = "lenient")]
    pub registration_code: String,
    #[serde(deserialize_with = "lenient")]
    pub bearing: i64,
    #[serde(deserialize_with = "lenient")]
    pub lat: String,
    #[serde(deserialize_with = "lenient")]
    pub lon: String,
    #[serde(deserialize_with = "lenient")]
    pub speed: String,
    #[serde(deserialize_with = "lenient")]
    pub ts: String,
    #[serde(deserialize_with = "lenient")]
    pub device_ts: String,
    #[serde(deserialize_with = "lenient")]
    pub routevariant_id: i64,
    #[serde(deserialize_with = "lenient")]
    pub position: PositionDto,
    #[serde(deserialize_with = "lenient")]
    pub enterprise: EnterpriseDto,
    #[serde(deserialize_with = "lenient")]
    pub park: ParkDto,
    #[serde(deserialize_with = "lenient")]
    pub projection: ProjectionDto,
    #[serde(deserialize_with = "lenient")]
    pub stats: StatsDto,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PositionDto {
    #[serde(deserialize_with = "lenient")]
    pub bearing: i64,
    #[serde(deserialize_with = "lenient")]
    pub device_ts: i64,
    #[serde(deserialize_with = "lenient")]
    pub lat: String,
    #[serde(deserialize_with = "lenient")]
    pub lon: String,
    #[serde(deserialize_with = "lenient")]
    pub speed: i64,
    #[serde(deserialize_with = "lenient")]
    pub ts: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EnterpriseDto {
    #[serde(deserialize_with = "lenient")]
    pub enterprise_id: i64,
    #[serde(deserialize_with = "lenient")]
    pub enterprise_name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ParkDto {
    #[serde(deserialize_with = "lenient")]
    pub park_id: i64,
    #[serde(deserialize_with = "lenient")]
    pub park_name: String,
}

/// Map-matched projection of the vehicle onto the road graph.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectionDto {
    #[serde(deserialize_with = "lenient")]
    pub edge_distance: String,
    #[serde(deserialize_with = "lenient")]
    pub edge_id: i64,
    #[serde(alias = "edge_protection", deserialize_with = "lenient")]
    pub edge_projection: String,
    #[serde(deserialize_with = "lenient")]
    pub edge_start_node_id: i64,
    #[serde(deserialize_with = "lenient")]
    pub edge_stop_node_id: i64,
    #[serde(deserialize_with = "lenient")]
    pub lat: String,
    #[serde(deserialize_with = "lenient")]
    pub lon: String,
    #[serde(deserialize_with = "lenient")]
    pub orig_lat: String,
    #[serde(deserialize_with = "lenient")]
    pub orig_lon: String,
    #[serde(deserialize_with = "lenient")]
    pub routevariant_id: i64,
    #[serde(deserialize_with = "lenient")]
    pub ts: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StatsDto {
    #[serde(deserialize_with = "lenient")]
    pub avg_speed: String,
    #[serde(deserialize_with = "lenient")]
    pub bearing: i64,
    #[serde(deserialize_with = "lenient")]
    pub cumm_speed_10: String,
    #[serde(deserialize_with = "lenient")]
    pub cumm_speed_2: String,
    #[serde(deserialize_with = "lenient")]
    pub device_ts: i64,
    #[serde(deserialize_with = "lenient")]
    pub lat: String,
    #[serde(deserialize_with = "lenient")]
    pub lon: String,
    #[serde(deserialize_with = "lenient")]
    pub speed: i64,
    #[serde(deserialize_with = "lenient")]
    pub ts: i64,
}
