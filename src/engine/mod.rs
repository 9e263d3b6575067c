use thiserror::Error;
use tracing::{debug, warn};

mod direction;
mod fare;
mod row;
mod speed;
pub use direction::*;
pub use fare::*;
pub use row::*;
pub use speed::*;

use crate::{
    btc::Trip,
    config::Config,
    identity::{IdentityLookup, document_digits},
    reference::ReferenceData,
    shared::{
        Lookup,
        geo::{self, Distance},
        time::{Duration, TimestampError, parse_timestamp},
    },
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid {field} timestamp {value:?}: {source}")]
    InvalidTimestamp {
        field: &'static str,
        value: String,
        source: TimestampError,
    },
}

/// `(lat1, lon1, lat2, lon2) -> km`, zero when unknown.
pub type DistanceFn = fn(&str, &str, &str, &str) -> f64;

/// Turns raw trips into report rows.
///
/// Lookups degrade to blank fields, only a malformed timestamp is an error.
pub struct Enricher<'a> {
    company: &'a str,
    speed: SpeedPolicy,
    references: &'a dyn ReferenceData,
    identity: &'a dyn IdentityLookup,
    distance: DistanceFn,
}

impl<'a> Enricher<'a> {
    pub fn new(
        config: &'a Config,
        references: &'a dyn ReferenceData,
        identity: &'a dyn IdentityLookup,
    ) -> Self {
        Self {
            company: &config.company,
            speed: config.speed,
            references,
            identity,
            distance: geo::distance_km,
        }
    }

    pub fn with_distance(mut self, distance: DistanceFn) -> Self {
        self.distance = distance;
        self
    }

    pub fn enrich(
        &self,
        directions: &mut DirectionAssigner,
        personnel_code: &str,
        trip: &Trip,
    ) -> Result<EnrichedTripRow, self::Error> {
        let started_at =
            parse_timestamp(&trip.started_at).map_err(|source| Error::InvalidTimestamp {
                field: "start",
                value: trip.started_at.clone(),
                source,
            })?;
        let ended_at =
            parse_timestamp(&trip.ended_at).map_err(|source| Error::InvalidTimestamp {
                field: "end",
                value: trip.ended_at.clone(),
                source,
            })?;

        let route_code = trip.route.trim();
        let direction = directions.next_direction(route_code);

        let mut route_field = String::new();
        let mut prefix = String::new();
        let mut coordinates: [String; 4] = Default::default();
        let mut distance_km = 0.0;
        if let Some(route) = self.references.route(route_code).found() {
            let (open, close) = route.endpoints(direction);
            route_field = route.code.clone();
            prefix = route.prefix();
            distance_km = route.known_distance_km().unwrap_or_else(|| {
                (self.distance)(
                    &open.latitude,
                    &open.longitude,
                    &close.latitude,
                    &close.longitude,
                )
            });
            coordinates = [
                open.latitude.clone(),
                open.longitude.clone(),
                close.latitude.clone(),
                close.longitude.clone(),
            ];
        } else {
            debug!("Route {route_code:?} has no reference entry");
        }

        let vehicle_plate = self
            .references
            .vehicle_plate(&trip.vehicle)
            .found()
            .unwrap_or_else(|| trip.vehicle.trim().to_string());

        let driver_document = self.driver_document(personnel_code);

        let fares = FareTally::from_events(&trip.passengers.fares);

        let elapsed = match Duration::from_delta(ended_at - started_at) {
            Some(elapsed) => elapsed,
            None => {
                warn!(
                    "Trip on route {route_code} ends before it starts ({} > {}), elapsed set to zero",
                    trip.started_at, trip.ended_at
                );
                Duration::ZERO
            }
        };

        let speed = self
            .speed
            .estimate(Distance::from_kilometers(distance_km), elapsed);
        if speed.is_clamped() {
            debug!(
                "Route {route_code}: {distance_km:.1} km in {elapsed} is implausible, reporting {} km/h over {:.2} h",
                speed.speed_kmh, speed.elapsed_hours
            );
        }

        let [open_latitude, open_longitude, close_latitude, close_longitude] = coordinates;
        Ok(EnrichedTripRow {
            company: self.company.to_string(),
            prefix,
            route_code: route_field,
            direction,
            trip_date: started_at.date(),
            start_time: started_at.time(),
            end_time: ended_at.time(),
            paying: fares.paying(),
            elderly: fares.elderly(),
            free_pass: fares.free_pass(),
            other_gratuity: fares.other_gratuity(),
            total_passengers: trip.total_passengers(),
            cash_paid: fares.cash(),
            electronic_paid: fares.electronic_paid(),
            distance_km: speed::ceil_to_u32(distance_km),
            elapsed,
            average_speed_kmh: speed.reported_kmh(),
            open_latitude,
            open_longitude,
            close_latitude,
            close_longitude,
            vehicle_plate,
            driver_document,
            speed_band: speed.band,
        })
    }

    fn driver_document(&self, personnel_code: &str) -> String {
        let personnel_code = personnel_code.trim();
        if personnel_code.is_empty() {
            warn!("Batch has no personnel code, driver document left blank");
            return String::new();
        }
        match self.identity.driver_document(personnel_code) {
            Lookup::Found(document) => document_digits(&document),
            other => {
                debug!(
                    "Driver document for {personnel_code} is {}, left blank",
                    other.label()
                );
                String::new()
            }
        }
    }
}
