use serde::{Deserialize, Serialize};

use crate::engine::Direction;

/// Row of the route dataset (`routes.csv` or the `linha` table).
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RouteRecord {
    pub code: String,
    pub origin: String,
    pub destination: String,
    pub name: String,
    pub registration: String,
    pub distance_km: Option<f64>,
    pub duration_min: Option<u32>,
    pub origin_lat: String,
    pub origin_lon: String,
    pub destination_lat: String,
    pub destination_lon: String,
}

/// Row of the fleet dataset (`vehicles.csv` or the `veiculo` table).
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct VehicleRecord {
    pub code: String,
    pub plate: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct RouteEndpoint {
    pub place: String,
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct RouteParameters {
    pub code: String,
    pub origin: RouteEndpoint,
    pub destination: RouteEndpoint,
    pub name: String,
    /// Transit-authority registration, `NN-NNNN-NN`.
    pub registration: String,
    pub distance_km: Option<f64>,
    pub duration_min: Option<u32>,
}

impl RouteParameters {
    /// Registration code with its separators removed.
    pub fn prefix(&self) -> String {
        self.registration.replace('-', "")
    }

    /// `(open, close)` endpoints of a trip travelling in `direction`.
    pub fn endpoints(&self, direction: Direction) -> (&RouteEndpoint, &RouteEndpoint) {
        match direction {
            Direction::Outbound => (&self.origin, &self.destination),
            Direction::Return => (&self.destination, &self.origin),
        }
    }

    /// Precomputed distance, ignored when it is not a positive number.
    pub fn known_distance_km(&self) -> Option<f64> {
        self.distance_km
            .filter(|distance| distance.is_finite() && *distance > 0.0)
    }
}

impl From<RouteRecord> for RouteParameters {
    fn from(value: RouteRecord) -> Self {
        Self {
            code: value.code.trim().to_string(),
            origin: RouteEndpoint {
                place: value.origin,
                latitude: value.origin_lat.trim().to_string(),
                longitude: value.origin_lon.trim().to_string(),
            },
            destination: RouteEndpoint {
                place: value.destination,
                latitude: value.destination_lat.trim().to_string(),
                longitude: value.destination_lon.trim().to_string(),
            },
            name: value.name,
            registration: value.registration.trim().to_string(),
            distance_km: value.distance_km,
            duration_min: value.duration_min,
        }
    }
}
