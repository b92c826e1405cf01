//! Bus lines and the vehicles running on them.

use super::ids::VehicleId;

/// Last reported position of a vehicle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Position {
    /// Latitude as reported upstream (decimal string).
    pub lat: String,
    /// Longitude as reported upstream (decimal string).
    pub lon: String,
    pub bearing: i64,
    /// Unix timestamp (seconds) of the fix.
    pub ts: i64,
}

/// A vehicle on a line's roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub registration_code: String,
    pub position: Position,
    pub routevariant_id: i64,
}

/// A bus line with its current vehicle roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    /// Upstream integer id; forecasts reference it through `rv_id`.
    pub id: i64,
    pub name: String,
    /// Vehicles currently assigned, in upstream order.
    pub vehicles: Vec<Vehicle>,
}

impl Line {
    /// Whether no vehicles are currently running.
    pub fn is_idle(&self) -> bool {
        self.vehicles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_line() {
        assert!(Line::default().is_idle());
        let line = Line {
            vehicles: vec![Vehicle::default()],
            ..Line::default()
        };
        assert!(!line.is_idle());
    }
}
