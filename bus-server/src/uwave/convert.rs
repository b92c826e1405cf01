//! Conversion from uWave DTOs to domain types.

use crate::domain::{Forecast, GeometryPoint, Line, Position, RouteRef, Stop, Vehicle, VehicleId};

use super::types::{BusLineDto, BusStopDto, ForecastDto, GeometryDto, VehicleDto};

impl From<ForecastDto> for Forecast {
    fn from(dto: ForecastDto) -> Self {
        Forecast {
            forecast_seconds: dto.forecast_seconds,
            route: RouteRef {
                id: dto.route.id,
                name: dto.route.name,
                short_name: dto.route.short_name,
            },
            rv_id: dto.rv_id,
            vehicle: dto.vehicle,
            vehicle_id: VehicleId(dto.vehicle_id),
        }
    }
}

impl From<GeometryDto> for GeometryPoint {
    fn from(dto: GeometryDto) -> Self {
        GeometryPoint {
            lat: dto.lat,
            lon: dto.lon,
            seq: dto.seq,
        }
    }
}

impl From<BusStopDto> for Stop {
    fn from(dto: BusStopDto) -> Self {
        Stop {
            id: dto.id,
            name: dto.name,
            forecasts: dto.forecast.into_iter().map(Forecast::from).collect(),
            geometry: dto.geometry.into_iter().map(GeometryPoint::from).collect(),
        }
    }
}

impl From<VehicleDto> for Vehicle {
    fn from(dto: VehicleDto) -> Self {
        Vehicle {
            id: VehicleId(dto.vehicle_id),
            registration_code: dto.registration_code,
            position: Position {
                lat: dto.position.lat,
                lon: dto.position.lon,
                bearing: dto.position.bearing,
                ts: dto.position.ts,
            },
            routevariant_id: dto.routevariant_id,
        }
    }
}

impl From<BusLineDto> for Line {
    fn from(dto: BusLineDto) -> Self {
        Line {
            id: dto.id,
            name: dto.name,
            vehicles: dto.vehicles.into_iter().map(Vehicle::from).collect(),
        }
    }
}
