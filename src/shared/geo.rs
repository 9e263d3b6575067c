use serde::Serialize;
use tracing::debug;

/// Mean earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Length in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    pub const fn from_kilometers(km: f64) -> Self {
        Self(km * 1000.0)
    }

    pub const fn as_meters(&self) -> f64 {
        self.0
    }

    pub const fn as_kilometers(&self) -> f64 {
        self.0 / 1000.0
    }
}

/// Decimal degrees, WGS84.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Coordinate {
    /// Parses a pair of decimal-degree strings, `None` if either side is blank or not a number.
    pub fn parse(latitude: &str, longitude: &str) -> Option<Self> {
        let latitude: f64 = latitude.trim().parse().ok()?;
        let longitude: f64 = longitude.trim().parse().ok()?;
        (latitude.is_finite() && longitude.is_finite()).then_some(Self {
            latitude,
            longitude,
        })
    }

    /// Great-circle distance to `other`.
    pub fn haversine(&self, other: &Self) -> Distance {
        let (phi1, phi2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let half_dphi = (phi2 - phi1) / 2.0;
        let half_dlambda = (other.longitude - self.longitude).to_radians() / 2.0;
        let h = half_dphi.sin().powi(2) + phi1.cos() * phi2.cos() * half_dlambda.sin().powi(2);
        let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
        Distance::from_kilometers(EARTH_RADIUS_KM * central_angle)
    }
}

/// Distance in kilometers between two textual coordinates.
///
/// Returns `0.0` when any of the four values is empty or not a number. The zero is a
/// "distance unknown" sentinel, callers must not read it as "same place".
pub fn distance_km(lat1: &str, lon1: &str, lat2: &str, lon2: &str) -> f64 {
    match (Coordinate::parse(lat1, lon1), Coordinate::parse(lat2, lon2)) {
        (Some(from), Some(to)) => from.haversine(&to).as_kilometers(),
        _ => {
            debug!("Unusable coordinates: lat1={lat1:?}, lon1={lon1:?}, lat2={lat2:?}, lon2={lon2:?}");
            0.0
        }
    }
}

#[test]
fn parse_rejects_blank_test() {
    assert!(Coordinate::parse("", "-47.6").is_none());
    assert!(Coordinate::parse("-15.4", "  ").is_none());
    assert!(Coordinate::parse("abc", "-47.6").is_none());
    assert!(Coordinate::parse(" -15.4 ", "-47.6").is_some());
}

#[test]
fn quarter_meridian_test() {
    let pole = Coordinate::from((90.0, 0.0));
    let equator = Coordinate::from((0.0, 0.0));
    let expected = EARTH_RADIUS_KM * std::f64::consts::FRAC_PI_2;
    assert!((equator.haversine(&pole).as_kilometers() - expected).abs() < 1e-6);
}
