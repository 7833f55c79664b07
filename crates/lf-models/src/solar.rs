//! Solar position from day of year, time of day and location.
//!
//! Declination and equation of time follow Spencer (1971); the zenith
//! angle follows De Pury & Farquhar (1997), eq. A13.

use crate::traits::SolarGeometry;
use std::f64::consts::PI;

/// Degrees of longitude per hour of solar time
const DEG_PER_HOUR: f64 = 15.0;

/// Minutes per radian of solar time
const MINUTES_PER_RADIAN: f64 = 229.18;

/// Solar geometry after Spencer (1971).
#[derive(Debug, Clone, Copy, Default)]
pub struct SpencerSolarGeometry;

impl SolarGeometry for SpencerSolarGeometry {
    fn cos_zenith(&self, doy: f64, hod: f64, latitude: f64, longitude: f64) -> f64 {
        cos_zenith(doy, hod, latitude, longitude)
    }
}

/// Fractional year (radians).
pub fn day_angle(doy: f64) -> f64 {
    2.0 * PI * (doy - 1.0) / 365.0
}

/// Solar declination (radians).
pub fn solar_declination(day_angle: f64) -> f64 {
    let g = day_angle;
    0.006918 - 0.399912 * g.cos() + 0.070257 * g.sin() - 0.006758 * (2.0 * g).cos()
        + 0.000907 * (2.0 * g).sin()
        - 0.002697 * (3.0 * g).cos()
        + 0.00148 * (3.0 * g).sin()
}

/// Equation of time (minutes).
pub fn equation_of_time(day_angle: f64) -> f64 {
    let g = day_angle;
    let et = 0.000075 + 0.001868 * g.cos()
        - 0.032077 * g.sin()
        - 0.014615 * (2.0 * g).cos()
        - 0.04089 * (2.0 * g).sin();
    et * MINUTES_PER_RADIAN
}

/// Local standard time of solar noon (hours).
///
/// Standard meridians are taken as the nearest multiple of 15 degrees.
pub fn solar_noon(equation_of_time: f64, longitude: f64) -> f64 {
    let meridian = (longitude / DEG_PER_HOUR).round() * DEG_PER_HOUR;
    12.0 + (4.0 * (meridian - longitude) - equation_of_time) / 60.0
}

/// Hour angle (radians), zero at solar noon.
pub fn hour_angle(hod: f64, noon: f64) -> f64 {
    PI * (hod - noon) / 12.0
}

/// Cosine of the solar zenith angle, clamped to [0, 1].
pub fn cos_zenith(doy: f64, hod: f64, latitude: f64, longitude: f64) -> f64 {
    let gamma = day_angle(doy);
    let decl = solar_declination(gamma);
    let noon = solar_noon(equation_of_time(gamma), longitude);
    let h = hour_angle(hod, noon);
    let lat = latitude.to_radians();

    let sin_beta = lat.sin() * decl.sin() + lat.cos() * decl.cos() * h.cos();
    sin_beta.clamp(0.0, 1.0)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn cos_zenith_is_bounded(
            doy in 1.0_f64..366.0,
            hod in 0.0_f64..24.0,
            lat in -90.0_f64..90.0,
            lon in -180.0_f64..180.0,
        ) {
            let cz = cos_zenith(doy, hod, lat, lon);
            prop_assert!((0.0..=1.0).contains(&cz));
        }
    }
}
