//! Plain-text rendering of lookup results.

use crate::arrivals::{LineArrivals, NO_BUSES_RUNNING};
use crate::directory::StopDirectory;
use crate::domain::{Forecast, Stop};
use crate::network::KnownNetwork;

/// Arrival table for a line: a position line per bus, then one line per
/// stop it is heading for, then a blank line.
pub fn line_arrivals(result: &LineArrivals) -> String {
    let LineArrivals::Running(table) = result else {
        return NO_BUSES_RUNNING.to_string();
    };

    let mut out = String::new();
    for row in &table.vehicles {
        let position = &row.vehicle.position;
        out.push_str(&format!(
            "Bus Id: {} Latitude: {} Longitude: {}\n",
            row.vehicle.id, position.lat, position.lon
        ));
        for arrival in &row.arrivals {
            out.push_str(&format!(
                "Arriving at {} in {} minutes\n",
                arrival.stop_name, arrival.minutes
            ));
        }
        out.push('\n');
    }
    out
}

fn forecast_line(forecast: &Forecast) -> String {
    format!(
        "Bus ID: {} running in {} is arriving in {} minutes\n",
        forecast.vehicle_id,
        forecast.route.short_name,
        forecast.wait_minutes()
    )
}

/// Every forecast at a stop, in upstream order.
pub fn stop_forecasts(stop: &Stop) -> String {
    stop.forecasts.iter().map(forecast_line).collect()
}

/// One forecast at a stop for a specific line, or a note that none of
/// the line's buses stop there.
pub fn stop_forecast_for_line(forecast: Option<&Forecast>, line_name: &str) -> String {
    match forecast {
        Some(forecast) => forecast_line(forecast),
        None => format!("There are no buses running in {line_name} which stop at this bus stop."),
    }
}

/// Suggestions for an unrecognised stop name.
pub fn unknown_stop(name: &str, directory: &StopDirectory) -> String {
    let mut out = format!("{name} is not valid. Please type in one of the following :\n\n");
    for known in directory.names() {
        out.push_str(&format!("Bus Stop Name: {known}\n"));
    }
    out
}

/// Suggestions for an unrecognised line id.
pub fn unknown_line(id: &str, network: &KnownNetwork) -> String {
    let mut out = format!("{id} is not valid. Please type in one of the following :\n\n");
    for line in &network.lines {
        out.push_str(&format!("Bus Line: {} ({})\n", line.id, line.name));
    }
    out
}
