use crate::shared::{geo::Distance, time::Duration};

/// Plausible speed envelope for a bus trip, in km/h.
///
/// Device timestamps are unreliable: a shift that was never closed inflates the
/// elapsed time with layovers, a clock glitch can shrink it. Speeds outside the
/// envelope are replaced by a synthesized time base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedPolicy {
    /// Ceiling, faster trips are reported at exactly this speed.
    pub max_kmh: f64,
    /// Floor, slower trips are reported at `fallback_kmh`.
    pub min_kmh: f64,
    /// Assumed average for trips under the floor.
    pub fallback_kmh: f64,
}

impl Default for SpeedPolicy {
    fn default() -> Self {
        Self {
            max_kmh: 70.0,
            min_kmh: 20.0,
            fallback_kmh: 45.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedBand {
    /// Distance unknown, nothing to derive.
    #[default]
    Unknown,
    Accepted,
    Ceiling,
    Floor,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpeedEstimate {
    pub speed_kmh: f64,
    /// Time base the speed was derived from.
    pub elapsed_hours: f64,
    pub band: SpeedBand,
}

impl SpeedBand {
    pub fn is_clamped(&self) -> bool {
        matches!(self, SpeedBand::Ceiling | SpeedBand::Floor)
    }
}

impl SpeedEstimate {
    pub fn is_clamped(&self) -> bool {
        self.band.is_clamped()
    }

    /// Whole km/h, rounded up.
    pub fn reported_kmh(&self) -> u32 {
        ceil_to_u32(self.speed_kmh)
    }
}

impl SpeedPolicy {
    pub fn is_valid(&self) -> bool {
        self.min_kmh.is_finite()
            && self.max_kmh.is_finite()
            && self.fallback_kmh.is_finite()
            && self.min_kmh > 0.0
            && self.min_kmh <= self.max_kmh
            && self.fallback_kmh > 0.0
    }

    pub fn estimate(&self, distance: Distance, elapsed: Duration) -> SpeedEstimate {
        let km = distance.as_kilometers();
        if !km.is_finite() || km <= 0.0 {
            return SpeedEstimate::default();
        }

        // A zero span over a known distance is as implausible as a very short one.
        let raw_kmh = if elapsed.is_zero() {
            f64::INFINITY
        } else {
            km / elapsed.as_hours()
        };

        if raw_kmh > self.max_kmh {
            SpeedEstimate {
                speed_kmh: self.max_kmh,
                elapsed_hours: km / self.max_kmh,
                band: SpeedBand::Ceiling,
            }
        } else if raw_kmh < self.min_kmh {
            SpeedEstimate {
                speed_kmh: self.fallback_kmh,
                elapsed_hours: km / self.fallback_kmh,
                band: SpeedBand::Floor,
            }
        } else {
            SpeedEstimate {
                speed_kmh: raw_kmh,
                elapsed_hours: elapsed.as_hours(),
                band: SpeedBand::Accepted,
            }
        }
    }
}

pub(crate) fn ceil_to_u32(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.ceil().min(u32::MAX as f64) as u32
}

#[test]
fn floor_band_test() {
    let estimate =
        SpeedPolicy::default().estimate(Distance::from_kilometers(70.0), Duration::from_hours(8.0));
    assert_eq!(estimate.band, SpeedBand::Floor);
    assert_eq!(estimate.speed_kmh, 45.0);
    assert!((estimate.elapsed_hours - 70.0 / 45.0).abs() < 1e-9);
}

#[test]
fn ceiling_band_test() {
    let estimate = SpeedPolicy::default()
        .estimate(Distance::from_kilometers(210.0), Duration::from_hours(1.0));
    assert_eq!(estimate.band, SpeedBand::Ceiling);
    assert_eq!(estimate.reported_kmh(), 70);
    assert!((estimate.elapsed_hours - 3.0).abs() < 1e-9);
}
