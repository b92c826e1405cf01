//! Line arrival tables.
//!
//! This module answers "where is each bus on this line, and when will it
//! reach each stop?" by correlating a line's vehicle roster with the live
//! forecasts of every known stop.

mod aggregate;
mod config;

#[cfg(test)]
mod aggregate_tests;

pub use aggregate::{
    Aggregator, ArrivalTable, LineArrivals, NO_BUSES_RUNNING, StopArrival, VehicleArrivals,
    build_table, candidate_stops,
};
pub use config::AggregatorConfig;
