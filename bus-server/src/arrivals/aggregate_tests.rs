//! Unit tests for the arrival table aggregation.

use super::*;
use crate::domain::{Forecast, Line, LineId, Stop, StopId, Vehicle, VehicleId};
use crate::uwave::{DecodeMode, MockUwaveClient};
use serde_json::json;

const LINE: i64 = 44478;

fn stop_id(s: &str) -> StopId {
    StopId::parse(s).unwrap()
}

fn line_id() -> LineId {
    LineId::parse("44478").unwrap()
}

fn vehicle(id: i64) -> Vehicle {
    Vehicle {
        id: VehicleId(id),
        ..Vehicle::default()
    }
}

fn forecast(rv_id: i64, vehicle: i64, seconds: f64) -> Forecast {
    Forecast {
        forecast_seconds: seconds,
        rv_id,
        vehicle_id: VehicleId(vehicle),
        ..Forecast::default()
    }
}

fn stop(name: &str, forecasts: Vec<Forecast>) -> Stop {
    Stop {
        name: name.to_string(),
        forecasts,
        ..Stop::default()
    }
}

fn line(vehicles: &[i64]) -> Line {
    Line {
        id: LINE,
        name: "Campus Loop Red".to_string(),
        vehicles: vehicles.iter().map(|&v| vehicle(v)).collect(),
    }
}

fn arrivals(table: &ArrivalTable, vehicle: i64) -> Vec<(&str, i64)> {
    table
        .arrivals_for(VehicleId(vehicle))
        .unwrap()
        .iter()
        .map(|a| (a.stop_name.as_str(), a.minutes))
        .collect()
}

/// Stop document JSON with `(rv_id, vehicle_id, seconds)` forecasts.
fn stop_json(name: &str, forecasts: &[(i64, i64, f64)]) -> String {
    let forecasts: Vec<_> = forecasts
        .iter()
        .map(|(rv, v, s)| json!({"rv_id": rv, "vehicle_id": v, "forecast_seconds": s}))
        .collect();
    json!({"name": name, "forecast": forecasts}).to_string()
}

fn line_json(id: i64, vehicles: &[i64]) -> String {
    let vehicles: Vec<_> = vehicles
        .iter()
        .map(|v| json!({"vehicle_id": v, "position": {"lat": "1.34", "lon": "103.68"}}))
        .collect();
    json!({"id": id, "name": "Campus Loop Red", "vehicles": vehicles}).to_string()
}

#[test]
fn two_vehicles_two_stops() {
    let candidates = vec![
        stop("S1", vec![forecast(LINE, 1, 125.0)]),
        stop("S2", vec![forecast(LINE, 2, 300.0)]),
    ];

    let table = build_table(line(&[1, 2]), &candidates);

    assert_eq!(arrivals(&table, 1), [("S1", 2)]);
    assert_eq!(arrivals(&table, 2), [("S2", 5)]);
}

#[test]
fn vehicles_off_roster_are_absent() {
    let candidates = vec![stop(
        "S1",
        vec![forecast(LINE, 1, 60.0), forecast(LINE, 99, 60.0)],
    )];

    let table = build_table(line(&[1]), &candidates);

    assert_eq!(table.vehicles.len(), 1);
    assert!(table.arrivals_for(VehicleId(99)).is_none());
}

#[test]
fn stop_without_match_contributes_nothing() {
    let candidates = vec![
        stop("S1", vec![forecast(LINE, 2, 60.0)]),
        stop("S2", vec![forecast(LINE, 1, 240.0)]),
    ];

    let table = build_table(line(&[1]), &candidates);

    assert_eq!(arrivals(&table, 1), [("S2", 4)]);
}

#[test]
fn duplicate_stop_name_first_wins() {
    let candidates = vec![
        stop("Hall 6", vec![forecast(LINE, 1, 60.0)]),
        stop("Hall 6", vec![forecast(LINE, 1, 600.0)]),
    ];

    let table = build_table(line(&[1]), &candidates);

    assert_eq!(arrivals(&table, 1), [("Hall 6", 1)]);
}

#[test]
fn duplicate_name_without_earlier_match_still_counts() {
    let candidates = vec![
        stop("Hall 6", vec![forecast(LINE, 2, 60.0)]),
        stop("Hall 6", vec![forecast(LINE, 1, 600.0)]),
    ];

    let table = build_table(line(&[1, 2]), &candidates);

    assert_eq!(arrivals(&table, 1), [("Hall 6", 10)]);
    assert_eq!(arrivals(&table, 2), [("Hall 6", 1)]);
}

#[test]
fn first_forecast_for_vehicle_wins() {
    let candidates = vec![stop(
        "S1",
        vec![forecast(LINE, 1, 180.0), forecast(LINE, 1, 30.0)],
    )];

    let table = build_table(line(&[1]), &candidates);

    assert_eq!(arrivals(&table, 1), [("S1", 3)]);
}

#[test]
fn minutes_truncate() {
    let candidates = vec![
        stop("A", vec![forecast(LINE, 1, 119.0)]),
        stop("B", vec![forecast(LINE, 1, 180.0)]),
        stop("C", vec![forecast(LINE, 1, 0.0)]),
    ];

    let table = build_table(line(&[1]), &candidates);

    assert_eq!(arrivals(&table, 1), [("A", 1), ("B", 3), ("C", 0)]);
}

#[test]
fn forecast_vehicle_matched_regardless_of_rv_id() {
    // Candidacy is decided by rv_id; the per-vehicle scan only looks at
    // the vehicle id.
    let candidates = vec![stop(
        "S1",
        vec![forecast(LINE, 2, 60.0), forecast(44479, 1, 120.0)],
    )];

    let table = build_table(line(&[1]), &candidates);

    assert_eq!(arrivals(&table, 1), [("S1", 2)]);
}

#[test]
fn candidates_filter_by_line_id() {
    let stops = vec![
        stop("A", vec![forecast(44479, 1, 60.0)]),
        stop("B", vec![forecast(44479, 1, 60.0), forecast(LINE, 2, 60.0)]),
        stop("C", vec![]),
        stop("D", vec![forecast(LINE, 3, 60.0), forecast(LINE, 4, 60.0)]),
    ];

    let names: Vec<_> = candidate_stops(stops, LINE)
        .into_iter()
        .map(|s| s.name)
        .collect();

    assert_eq!(names, ["B", "D"]);
}

#[test]
fn roster_order_preserved() {
    let table = build_table(line(&[5, 3, 9]), &[]);
    let ids: Vec<_> = table.vehicles.iter().map(|v| v.vehicle.id.0).collect();
    assert_eq!(ids, [5, 3, 9]);
    assert!(table.vehicles.iter().all(|v| v.arrivals.is_empty()));
}

#[tokio::test]
async fn empty_roster_stops_early() {
    let mock = MockUwaveClient::new(DecodeMode::Lenient)
        .with_line(line_id(), line_json(LINE, &[]))
        .with_stop(stop_id("1"), stop_json("S1", &[(LINE, 1, 60.0)]));
    let config = AggregatorConfig::default();

    let result = Aggregator::new(&mock, &config)
        .aggregate(&line_id(), &[stop_id("1")])
        .await
        .unwrap();

    assert_eq!(result, LineArrivals::NoBusesRunning);
    assert_eq!(mock.stop_fetch_count(), 0);
}

#[tokio::test]
async fn end_to_end_through_provider() {
    let mock = MockUwaveClient::new(DecodeMode::Lenient)
        .with_line(line_id(), line_json(LINE, &[1, 2]))
        .with_stop(stop_id("10"), stop_json("S1", &[(LINE, 1, 125.0)]))
        .with_stop(stop_id("11"), stop_json("Elsewhere", &[(44479, 1, 60.0)]))
        .with_stop(stop_id("12"), stop_json("S2", &[(LINE, 2, 300.0)]));
    let config = AggregatorConfig::default();

    let result = Aggregator::new(&mock, &config)
        .aggregate(&line_id(), &[stop_id("10"), stop_id("11"), stop_id("12")])
        .await
        .unwrap();

    let LineArrivals::Running(table) = result else {
        panic!("expected running buses");
    };
    assert_eq!(arrivals(&table, 1), [("S1", 2)]);
    assert_eq!(arrivals(&table, 2), [("S2", 5)]);
    assert_eq!(mock.stop_fetch_count(), 3);
}

#[tokio::test]
async fn line_compared_by_resolved_id() {
    // The document for line 44478 reports id 7; forecasts must match 7.
    let mock = MockUwaveClient::new(DecodeMode::Lenient)
        .with_line(line_id(), line_json(7, &[1]))
        .with_stop(stop_id("10"), stop_json("By request id", &[(LINE, 1, 60.0)]))
        .with_stop(stop_id("11"), stop_json("By record id", &[(7, 1, 120.0)]));
    let config = AggregatorConfig::default();

    let result = Aggregator::new(&mock, &config)
        .aggregate(&line_id(), &[stop_id("10"), stop_id("11")])
        .await
        .unwrap();

    let LineArrivals::Running(table) = result else {
        panic!("expected running buses");
    };
    assert_eq!(arrivals(&table, 1), [("By record id", 2)]);
}

#[tokio::test]
async fn concurrency_does_not_change_table() {
    let mut mock = MockUwaveClient::new(DecodeMode::Lenient).with_line(line_id(), line_json(LINE, &[1, 2, 3]));
    let mut known = Vec::new();
    for i in 0..20i64 {
        let id = stop_id(&(100 + i).to_string());
        let name = format!("Stop {}", i % 7);
        let forecasts = [(LINE, i % 3 + 1, (i * 37) as f64), (LINE, (i + 1) % 3 + 1, (i * 11) as f64)];
        mock = mock.with_stop(id.clone(), stop_json(&name, &forecasts));
        known.push(id);
    }

    let sequential = AggregatorConfig::sequential();
    let parallel = AggregatorConfig::new(8);

    let a = Aggregator::new(&mock, &sequential)
        .aggregate(&line_id(), &known)
        .await
        .unwrap();
    let b = Aggregator::new(&mock, &parallel)
        .aggregate(&line_id(), &known)
        .await
        .unwrap();

    assert_eq!(a, b);
}

#[tokio::test]
async fn malformed_stop_is_skipped_leniently() {
    let mock = MockUwaveClient::new(DecodeMode::Lenient)
        .with_line(line_id(), line_json(LINE, &[1]))
        .with_stop(stop_id("10"), "<html>502</html>")
        .with_stop(stop_id("11"), stop_json("S1", &[(LINE, 1, 90.0)]));
    let config = AggregatorConfig::default();

    let result = Aggregator::new(&mock, &config)
        .aggregate(&line_id(), &[stop_id("10"), stop_id("11")])
        .await
        .unwrap();

    let LineArrivals::Running(table) = result else {
        panic!("expected running buses");
    };
    assert_eq!(arrivals(&table, 1), [("S1", 1)]);
}

#[tokio::test]
async fn malformed_stop_fails_strictly() {
    let mock = MockUwaveClient::new(DecodeMode::Strict)
        .with_line(line_id(), line_json(LINE, &[1]))
        .with_stop(stop_id("10"), "<html>502</html>");
    let config = AggregatorConfig::default();

    let result = Aggregator::new(&mock, &config)
        .aggregate(&line_id(), &[stop_id("10")])
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn missing_line_is_error() {
    let mock = MockUwaveClient::new(DecodeMode::Lenient);
    let config = AggregatorConfig::default();

    let result = Aggregator::new(&mock, &config)
        .aggregate(&line_id(), &[])
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn null_and_mistyped_fields_do_not_empty_the_table() {
    let line = json!({"id": LINE, "vehicles": [
        {"vehicle_id": 1, "registration_code": null, "position": {"lat": "1.34", "lon": "103.68"}},
        {"vehicle_id": 2, "speed": 12}
    ]});
    let stop = json!({"name": "S1", "forecast": [
        {"rv_id": LINE, "vehicle_id": 2, "forecast_seconds": null},
        {"rv_id": LINE, "vehicle_id": 1, "forecast_seconds": 125}
    ]});
    let mock = MockUwaveClient::new(DecodeMode::Lenient)
        .with_line(line_id(), line.to_string())
        .with_stop(stop_id("10"), stop.to_string());
    let config = AggregatorConfig::default();

    let result = Aggregator::new(&mock, &config)
        .aggregate(&line_id(), &[stop_id("10")])
        .await
        .unwrap();

    let LineArrivals::Running(table) = result else {
        panic!("expected running buses");
    };
    assert_eq!(arrivals(&table, 1), [("S1", 2)]);
    assert_eq!(arrivals(&table, 2), [("S1", 0)]);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn arb_stop() -> impl Strategy<Value = Stop> {
        (
            0u8..5,
            prop::collection::vec((prop_oneof![Just(LINE), Just(44479)], 1i64..8, 0u32..1800), 0..6),
        )
            .prop_map(|(name, forecasts)| {
                stop(
                    &format!("Stop {name}"),
                    forecasts
                        .into_iter()
                        .map(|(rv, v, s)| forecast(rv, v, f64::from(s)))
                        .collect(),
                )
            })
    }

    proptest! {
        #[test]
        fn table_invariants(
            roster in prop::collection::vec(1i64..6, 0..5),
            stops in prop::collection::vec(arb_stop(), 0..12),
        ) {
            let candidates = candidate_stops(stops, LINE);
            let table = build_table(line(&roster), &candidates);

            // One row per roster entry, in roster order.
            let ids: Vec<_> = table.vehicles.iter().map(|v| v.vehicle.id.0).collect();
            prop_assert_eq!(ids, roster);

            for row in &table.vehicles {
                // At most one entry per stop name.
                let mut names = HashSet::new();
                for arrival in &row.arrivals {
                    prop_assert!(names.insert(arrival.stop_name.clone()));
                }

                // Each entry comes from the first matching stop with that
                // name and its first forecast for this vehicle.
                for arrival in &row.arrivals {
                    let source = candidates
                        .iter()
                        .find(|s| s.name == arrival.stop_name
                            && s.first_forecast_for_vehicle(row.vehicle.id).is_some())
                        .unwrap();
                    let expected = source
                        .first_forecast_for_vehicle(row.vehicle.id)
                        .unwrap()
                        .wait_minutes();
                    prop_assert_eq!(arrival.minutes, expected);
                }

                // Every name with a forecast for this vehicle shows up.
                let expected_names: HashSet<_> = candidates
                    .iter()
                    .filter(|s| s.first_forecast_for_vehicle(row.vehicle.id).is_some())
                    .map(|s| s.name.clone())
                    .collect();
                prop_assert_eq!(names, expected_names);
            }
        }
    }
}
