//! Domain types for the bus arrival service.
//!
//! These are the lean, validated shapes the rest of the crate works with.
//! The upstream wire documents live in [`crate::uwave`] and are converted
//! into these types at the client boundary.

mod ids;
mod line;
mod stop;

pub use ids::{InvalidId, LineId, StopId, VehicleId};
pub use line::{Line, Position, Vehicle};
pub use stop::{Forecast, GeometryPoint, RouteRef, Stop, wait_minutes};
