//! Per-vehicle arrival tables for a bus line.
//!
//! The upstream offers two independent views: a line's vehicle roster, and
//! each stop's forecasts. Neither says which stops a vehicle will visit, so
//! the table is built by cross-referencing them through the vehicle id:
//!
//! 1. Fetch the line. An empty roster ends the lookup.
//! 2. Fetch every known stop and keep those with at least one forecast for
//!    this line (`rv_id` equal to the line's integer id).
//! 3. For each vehicle, walk the candidate stops in order and record the
//!    wait from the first forecast naming that vehicle, at most once per
//!    stop name.
//!
//! Candidate order is the known-stops order, which is not necessarily the
//! order a bus visits the stops.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{Line, LineId, Stop, StopId, Vehicle, VehicleId};
use crate::uwave::{TransitProvider, UwaveError, fetch_stops};

use super::config::AggregatorConfig;

/// Message shown when a line has no vehicles.
pub const NO_BUSES_RUNNING: &str = "there are currently no buses running on this line";

/// Predicted wait of one vehicle at one stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopArrival {
    pub stop_name: String,
    /// Whole minutes, truncated toward zero.
    pub minutes: i64,
}

/// A roster vehicle with its predicted arrivals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleArrivals {
    pub vehicle: Vehicle,
    /// At most one entry per stop name, in candidate-stop order.
    pub arrivals: Vec<StopArrival>,
}

/// Arrival table for a line with at least one vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalTable {
    /// One entry per roster vehicle, in roster order.
    pub vehicles: Vec<VehicleArrivals>,
}

impl ArrivalTable {
    /// Arrivals recorded for a vehicle, if it is on the roster.
    pub fn arrivals_for(&self, vehicle: VehicleId) -> Option<&[StopArrival]> {
        self.vehicles
            .iter()
            .find(|v| v.vehicle.id == vehicle)
            .map(|v| v.arrivals.as_slice())
    }
}

/// Outcome of a line lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineArrivals {
    /// The roster is empty. Not an error.
    NoBusesRunning,

    Running(ArrivalTable),
}

/// Builds arrival tables from a transit provider.
pub struct Aggregator<'a, P: TransitProvider> {
    provider: &'a P,
    config: &'a AggregatorConfig,
}

impl<'a, P: TransitProvider> Aggregator<'a, P> {
    /// Create a new aggregator.
    pub fn new(provider: &'a P, config: &'a AggregatorConfig) -> Self {
        Self { provider, config }
    }

    /// Build the arrival table for `line_id`, scanning `known_stops`.
    pub async fn aggregate(
        &self,
        line_id: &LineId,
        known_stops: &[StopId],
    ) -> Result<LineArrivals, UwaveError> {
        let line = self.provider.fetch_line(line_id).await?;

        if line.is_idle() {
            debug!(%line_id, "no vehicles on roster");
            return Ok(LineArrivals::NoBusesRunning);
        }

        let stops = fetch_stops(self.provider, known_stops, self.config.fetch_concurrency).await?;
        let candidates = candidate_stops(stops, line.id);

        debug!(
            %line_id,
            vehicles = line.vehicles.len(),
            candidates = candidates.len(),
            "building arrival table"
        );

        Ok(LineArrivals::Running(build_table(line, &candidates)))
    }
}

/// Keep the stops with at least one forecast for `line_id`, in order.
pub fn candidate_stops(stops: Vec<Stop>, line_id: i64) -> Vec<Stop> {
    stops
        .into_iter()
        .filter(|s| s.serves_line(line_id))
        .collect()
}

/// Cross-reference a line's roster against candidate stops.
pub fn build_table(line: Line, candidates: &[Stop]) -> ArrivalTable {
    let vehicles = line
        .vehicles
        .into_iter()
        .map(|vehicle| {
            let arrivals = vehicle_arrivals(vehicle.id, candidates);
            VehicleArrivals { vehicle, arrivals }
        })
        .collect();

    ArrivalTable { vehicles }
}

/// Arrivals of one vehicle across the candidate stops.
///
/// A stop name is only marked as seen once it yields an arrival, so a
/// later stop with the same name can still contribute if the earlier one
/// had no forecast for this vehicle.
fn vehicle_arrivals(vehicle: VehicleId, candidates: &[Stop]) -> Vec<StopArrival> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut arrivals = Vec::new();

    for stop in candidates {
        if seen.contains(stop.name.as_str()) {
            continue;
        }

        if let Some(forecast) = stop.first_forecast_for_vehicle(vehicle) {
            seen.insert(stop.name.as_str());
            arrivals.push(StopArrival {
                stop_name: stop.name.clone(),
                minutes: forecast.wait_minutes(),
            });
        }
    }

    arrivals
}
