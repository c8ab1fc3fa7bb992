//! Low-precision solar position
//!
//! Mean longitude and anomaly with a three-term equation of centre. Good
//! to about 0.01 degrees between 1950 and 2050.

use crate::coordinates::angle::wrap_degrees;
use crate::coordinates::{AzAlt, Ecliptic, RaDec};
use crate::framelib::ecliptic::{ecliptic_to_equatorial, mean_obliquity};
use crate::framelib::horizontal::ra_dec_to_az_alt;
use crate::time::{jd_j2000, julian_date_from_datetime};
use chrono::{DateTime, TimeZone};

/// Apparent geocentric ecliptic longitude of the Sun in degrees, `n` days
/// from J2000
pub fn sun_ecliptic_longitude(n: f64) -> f64 {
    // Mean longitude, corrected for aberration
    let l = wrap_degrees(280.461 + 0.9856474 * n);
    let g = wrap_degrees(357.5291 + 0.985_600_28 * n).to_radians();

    l + 1.9148 * g.sin() + 0.0200 * (2.0 * g).sin() + 0.0003 * (3.0 * g).sin()
}

/// Horizontal and equatorial (Jnow) position of the Sun
///
/// `latitude` and `longitude` in degrees, longitude East positive.
pub fn sun_position<Tz: TimeZone>(
    latitude: f64,
    longitude: f64,
    dt: &DateTime<Tz>,
) -> (AzAlt, RaDec) {
    let n = julian_date_from_datetime(dt) - jd_j2000();
    let ecl = Ecliptic {
        lon: sun_ecliptic_longitude(n),
        lat: 0.0,
    };
    let rd = ecliptic_to_equatorial(ecl, mean_obliquity(n));

    (ra_dec_to_az_alt(rd, latitude, longitude, dt, false), rd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::utc_datetime;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_june_solstice_2020() {
        // Solstice was 2020-06-20 21:43 UT
        let dt = utc_datetime(2020, 6, 20, 21, 43, 0).unwrap();
        let (_, rd) = sun_position(0.0, 0.0, &dt);
        assert_abs_diff_eq!(rd.ra, 6.0, epsilon = 0.01);
        assert_abs_diff_eq!(rd.dec, 23.4366, epsilon = 1e-3);
    }

    #[test]
    fn test_meeus_example_25a() {
        // Meeus, Astronomical Algorithms (2nd ed.) example 25.a, 1992 Oct 13.0:
        // apparent RA 13h13m31.4s, Dec -7°47'06"
        let dt = utc_datetime(1992, 10, 13, 0, 0, 0).unwrap();
        let (_, rd) = sun_position(0.0, 0.0, &dt);
        let expected_ra = 13.0 + 13.0 / 60.0 + 31.4 / 3600.0;
        let expected_dec = -(7.0 + 47.0 / 60.0 + 6.0 / 3600.0);
        assert_abs_diff_eq!(rd.ra, expected_ra, epsilon = 0.1 / 15.0);
        assert_abs_diff_eq!(rd.dec, expected_dec, epsilon = 0.1);
    }

    #[test]
    fn test_december_solstice_equator() {
        let dt = utc_datetime(2022, 12, 21, 12, 0, 0).unwrap();
        let (aa, rd) = sun_position(0.0, 0.0, &dt);
        assert_abs_diff_eq!(rd.ra, 17.9705, epsilon = 1e-3);
        assert_abs_diff_eq!(rd.dec, -23.4357, epsilon = 1e-3);
        assert_abs_diff_eq!(aa.alt, 66.5597, epsilon = 1e-3);
    }

    #[test]
    fn test_ecliptic_longitude_near_equinox() {
        // Around 2000 March 20, 7.5 UT the longitude passes 360
        let lon = wrap_degrees(sun_ecliptic_longitude(78.8));
        assert!(lon > 359.5 || lon < 0.5, "lon = {}", lon);
    }
}
