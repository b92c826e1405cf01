//! Bus stops and their arrival forecasts.

use super::ids::{LineId, VehicleId};

/// Convert a forecast wait in seconds to whole minutes.
///
/// The seconds are first truncated to an integer, then divided by 60,
/// both truncating toward zero: 119 s is 1 minute, not 2.
pub fn wait_minutes(forecast_seconds: f64) -> i64 {
    // `as` saturates and maps NaN to 0.
    (forecast_seconds as i64) / 60
}

/// The route a forecast entry belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRef {
    pub id: i64,
    pub name: String,
    pub short_name: String,
}

/// A predicted arrival of one vehicle at one stop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    /// Predicted wait, in seconds.
    pub forecast_seconds: f64,

    /// The route (line) the vehicle is running on.
    pub route: RouteRef,

    /// Integer id of the line, matched against `Line::id`.
    pub rv_id: i64,

    pub vehicle: String,
    pub vehicle_id: VehicleId,
}

impl Forecast {
    /// Predicted wait in whole minutes.
    pub fn wait_minutes(&self) -> i64 {
        wait_minutes(self.forecast_seconds)
    }
}

/// One point of a stop's geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeometryPoint {
    pub lat: String,
    pub lon: String,
    pub seq: i64,
}

/// A snapshot of a bus stop with its live forecasts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stop {
    /// Upstream integer id (zero if the document omitted it).
    pub id: i64,
    pub name: String,
    pub forecasts: Vec<Forecast>,
    pub geometry: Vec<GeometryPoint>,
}

impl Stop {
    /// Whether any forecast at this stop belongs to the given line.
    pub fn serves_line(&self, line_id: i64) -> bool {
        self.forecasts.iter().any(|f| f.rv_id == line_id)
    }

    /// The first forecast for the given vehicle, if any.
    pub fn first_forecast_for_vehicle(&self, vehicle: VehicleId) -> Option<&Forecast> {
        self.forecasts.iter().find(|f| f.vehicle_id == vehicle)
    }

    /// The first forecast whose line id reads as `line`, if any.
    ///
    /// Compared as text, so `"044478"` does not match line 44478.
    pub fn first_forecast_for_line(&self, line: &LineId) -> Option<&Forecast> {
        self.forecasts
            .iter()
            .find(|f| f.rv_id.to_string() == line.as_str())
    }
}
