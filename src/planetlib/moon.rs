//! Lunar position from mean orbital elements
//!
//! Paul Schlyter's method: Keplerian elements of date, the largest
//! perturbations in longitude, latitude and distance, then a topocentric
//! parallax correction. Accurate to about 4 arcminutes.

use crate::constants::{DEG_PER_HOUR, RAD2DEG};
use crate::coordinates::angle::{degrees_to_hours, wrap_degrees};
use crate::coordinates::cartesian::Cartesian3;
use crate::coordinates::{AzAlt, RaDec};
use crate::framelib::ecliptic::{ecliptic_rotation, mean_obliquity};
use crate::framelib::horizontal::ra_dec_to_az_alt;
use crate::time::calendar::day_number_2000;
use chrono::{DateTime, TimeZone, Timelike, Utc};

/// Day number used by the orbital elements (days since 1999-12-31 0h UT)
pub fn moon_days<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    day_number_2000(dt)
}

/// Geocentric Moon before parallax
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocentricMoon {
    /// Equatorial coordinates of date
    pub ra_dec: RaDec,
    /// Distance in Earth radii
    pub distance: f64,
    /// Mean longitude of the Sun in radians, needed for sidereal time
    pub sun_mean_longitude: f64,
}

/// Geocentric position of the Moon at day number `d`
pub fn moon_geocentric(d: f64) -> GeocentricMoon {
    let ecl = mean_obliquity(d);

    // Sun
    let ws = (282.9404 + 4.70935e-5 * d).to_radians();
    let ms = (356.0470 + 0.985_600_258_5 * d).to_radians();

    // Moon: ascending node, inclination, argument of perigee, mean distance
    // (Earth radii), eccentricity, mean anomaly
    let nm = (125.1228 - 0.052_953_808_3 * d).to_radians();
    let im = 5.1454_f64.to_radians();
    let wm = (318.0634 + 0.164_357_322_3 * d).to_radians();
    let am = 60.2666;
    let em = 0.054900;
    let mm = (115.3654 + 13.064_992_950_9 * d).to_radians();

    // A single fixed-point step of Kepler's equation
    let e_anom = mm + em * mm.sin() * (1.0 + em * mm.cos());

    let xv = am * (e_anom.cos() - em);
    let yv = am * ((1.0 - em * em).sqrt() * e_anom.sin());
    let v = yv.atan2(xv);
    let mut r = (xv * xv + yv * yv).sqrt();

    let (sin_n, cos_n) = nm.sin_cos();
    let (sin_vw, cos_vw) = (v + wm).sin_cos();
    let orbit = Cartesian3::new(
        r * (cos_n * cos_vw - sin_n * sin_vw * im.cos()),
        r * (sin_n * cos_vw + cos_n * sin_vw * im.cos()),
        r * (sin_vw * im.sin()),
    );
    let (mut lon, mut lat, _) = orbit.to_spherical();

    let ls = ms + ws;
    let lm = mm + wm + nm;
    let dm = lm - ls;
    let f = lm - nm;

    let dlon = -1.274 * (mm - 2.0 * dm).sin() // evection
        + 0.658 * (2.0 * dm).sin() // variation
        - 0.186 * ms.sin() // yearly equation
        - 0.059 * (2.0 * mm - 2.0 * dm).sin()
        - 0.057 * (mm - 2.0 * dm + ms).sin()
        + 0.053 * (mm + 2.0 * dm).sin()
        + 0.046 * (2.0 * dm - ms).sin()
        + 0.041 * (mm - ms).sin()
        - 0.035 * dm.sin() // parallactic equation
        - 0.031 * (mm + ms).sin()
        - 0.015 * (2.0 * f - 2.0 * dm).sin()
        + 0.011 * (mm - 4.0 * dm).sin();

    let dlat = -0.173 * (f - 2.0 * dm).sin()
        - 0.055 * (mm - f - 2.0 * dm).sin()
        - 0.046 * (mm + f - 2.0 * dm).sin()
        + 0.033 * (f + 2.0 * dm).sin()
        + 0.017 * (2.0 * mm + f).sin();

    lon += dlon.to_radians();
    lat += dlat.to_radians();
    r += -0.58 * (mm - 2.0 * dm).cos() - 0.46 * (2.0 * dm).cos();

    let equatorial = Cartesian3::from_spherical(lon, lat, r).rotate(&ecliptic_rotation(ecl));

    GeocentricMoon {
        ra_dec: RaDec::from_cartesian(&equatorial),
        distance: r,
        sun_mean_longitude: ls,
    }
}

/// Horizontal and topocentric equatorial (Jnow) position of the Moon
///
/// `latitude` and `longitude` in degrees, longitude East positive.
pub fn moon_position<Tz: TimeZone>(
    latitude: f64,
    longitude: f64,
    dt: &DateTime<Tz>,
) -> (AzAlt, RaDec) {
    let geo = moon_geocentric(moon_days(dt));
    let ra = geo.ra_dec.ra_degrees().to_radians();
    let dec = geo.ra_dec.dec.to_radians();

    // Horizontal parallax
    let mpar = (1.0 / geo.distance).asin();

    // Geocentric latitude and distance from the Earth's centre on the ellipsoid
    let lat_rad = latitude.to_radians();
    let gclat = (latitude - 0.1924 * (2.0 * lat_rad).sin()).to_radians();
    let rho = 0.99833 + 0.00167 * (2.0 * lat_rad).cos();

    let utc = dt.with_timezone(&Utc);
    let ut = f64::from(utc.hour())
        + f64::from(utc.minute()) / 60.0
        + f64::from(utc.second()) / 3600.0;
    let gmst0 = degrees_to_hours(geo.sun_mean_longitude * RAD2DEG) + 12.0;
    let lst = gmst0 + ut + longitude / DEG_PER_HOUR;
    let ha = (lst * DEG_PER_HOUR - geo.ra_dec.ra_degrees()).to_radians();

    let g = (gclat.tan() / ha.cos()).atan();

    let top_ra = ra - mpar * rho * gclat.cos() * ha.sin() / dec.cos();
    let top_dec = if g != 0.0 {
        dec - mpar * rho * gclat.sin() * (g - dec).sin() / g.sin()
    } else {
        // Observer on the equator
        dec - mpar * rho * (-dec).sin() * ha.cos()
    };

    let rd = RaDec::from_degrees(wrap_degrees(top_ra * RAD2DEG), top_dec * RAD2DEG);
    (ra_dec_to_az_alt(rd, latitude, longitude, dt, false), rd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::utc_datetime;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_moon_days() {
        let dt = utc_datetime(1990, 4, 19, 0, 0, 0).unwrap();
        assert_eq!(moon_days(&dt), -3543.0);
        let dt = utc_datetime(2000, 1, 1, 6, 0, 0).unwrap();
        assert_eq!(moon_days(&dt), 1.25);
    }

    #[test]
    fn test_worked_example_1990() {
        // Schlyter's worked example, 1990 April 19 0h UT
        let geo = moon_geocentric(-3543.0);
        assert_abs_diff_eq!(geo.ra_dec.ra_degrees(), 309.5011, epsilon = 0.01);
        assert_abs_diff_eq!(geo.ra_dec.dec, -19.1032, epsilon = 0.01);
        assert_abs_diff_eq!(geo.distance, 60.678, epsilon = 0.01);
    }

    #[test]
    fn test_topocentric_1990() {
        let dt = utc_datetime(1990, 4, 19, 0, 0, 0).unwrap();
        let (aa, rd) = moon_position(60.0, 15.0, &dt);
        assert_abs_diff_eq!(rd.ra, 20.66647, epsilon = 1e-4);
        assert_abs_diff_eq!(rd.dec, -19.88063, epsilon = 1e-4);
        assert_abs_diff_eq!(aa.alt, -16.2261, epsilon = 1e-3);
        assert_abs_diff_eq!(aa.az, 101.7871, epsilon = 1e-3);
    }

    #[test]
    fn test_new_year_2024() {
        let dt = utc_datetime(2024, 1, 1, 0, 0, 0).unwrap();
        let geo = moon_geocentric(moon_days(&dt));
        assert_abs_diff_eq!(geo.ra_dec.ra, 10.60914, epsilon = 1e-4);
        assert_abs_diff_eq!(geo.ra_dec.dec, 12.63624, epsilon = 1e-4);

        // On the equator the geocentric latitude is zero, so g == 0
        let (_, equator) = moon_position(0.0, 0.0, &dt);
        assert_abs_diff_eq!(equator.ra, 10.66198, epsilon = 1e-4);
        assert_abs_diff_eq!(equator.dec, 12.73799, epsilon = 1e-4);

        let (aa, _) = moon_position(51.5, -0.1, &dt);
        assert_abs_diff_eq!(aa.alt, 28.1097, epsilon = 1e-3);
        assert_abs_diff_eq!(aa.az, 107.0059, epsilon = 1e-3);
    }

    #[test]
    fn test_parallax_bounded() {
        let dt = utc_datetime(2015, 9, 28, 2, 47, 0).unwrap();
        let geo = moon_geocentric(moon_days(&dt));
        for lat in [-60.0, -10.0, 0.0, 35.0, 70.0] {
            let (_, top) = moon_position(lat, 20.0, &dt);
            // Lunar parallax never exceeds about 1.02 degrees
            let shift = (top.dec - geo.ra_dec.dec).abs();
            assert!(shift < 1.1, "lat {} shifted dec by {}", lat, shift);
        }
    }
}
