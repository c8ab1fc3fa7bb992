//! Sidereal time and the equatorial <-> horizontal transform
//!
//! No atmospheric refraction is applied here; altitudes are geometric.
//! See [`crate::refraction`] for the apparent-altitude correction.

use crate::constants::{DEG2RAD, DEG_PER_HOUR, RAD2DEG};
use crate::coordinates::angle::{
    clamp_unit, hours_to_degrees, wrap_degrees, wrap_degrees_signed, wrap_hours,
};
use crate::coordinates::{AzAlt, RaDec};
use crate::framelib::precession::precess;
use crate::time::{jd_j2000, julian_date_from_datetime};
use chrono::{DateTime, TimeZone};

/// GMST at 0h UT on 2000 January 1, degrees
const GMST_J2000_DEG: f64 = 100.46;
/// Sidereal advance per solar day beyond a full turn, degrees
const SIDEREAL_DRIFT_DEG_PER_DAY: f64 = 0.985647;

/// Local mean sidereal time in degrees `[0, 360)`
///
/// Linear approximation in days since J2000. `longitude` is East positive.
pub fn local_sidereal_time<Tz: TimeZone>(dt: &DateTime<Tz>, longitude: f64) -> f64 {
    local_sidereal_time_jd(julian_date_from_datetime(dt), longitude)
}

/// Local mean sidereal time in degrees `[0, 360)` for a UTC Julian date
pub fn local_sidereal_time_jd(jd: f64, longitude: f64) -> f64 {
    let d = jd - jd_j2000();
    // Julian dates start at noon
    let ut_hours = (jd.rem_euclid(1.0) + 0.5) * 24.0;

    wrap_degrees(
        GMST_J2000_DEG + SIDEREAL_DRIFT_DEG_PER_DAY * d + longitude + DEG_PER_HOUR * ut_hours,
    )
}

/// Equatorial to horizontal coordinates for an observer and time
///
/// With `j2000` set, `rd` is taken as J2000 and precessed to the equinox
/// of date first; otherwise it is already Jnow. Latitude and longitude are
/// in degrees, longitude East positive.
pub fn ra_dec_to_az_alt<Tz: TimeZone>(
    rd: RaDec,
    latitude: f64,
    longitude: f64,
    dt: &DateTime<Tz>,
    j2000: bool,
) -> AzAlt {
    let jd = julian_date_from_datetime(dt);
    let rd = if j2000 { precess(rd, jd_j2000(), jd) } else { rd };

    let lst_deg = local_sidereal_time_jd(jd, longitude);
    let ha_rad = ((lst_deg - rd.ra_degrees()) % 360.0) * DEG2RAD;
    let dec_rad = rd.dec * DEG2RAD;
    let lat_rad = latitude * DEG2RAD;

    let alt_rad =
        clamp_unit(dec_rad.sin() * lat_rad.sin() + dec_rad.cos() * lat_rad.cos() * ha_rad.cos())
            .asin();

    // Azimuth is undefined at the zenith and at the poles; report North
    let denominator = alt_rad.cos() * lat_rad.cos();
    let a = if denominator.abs() < 1e-12 {
        0.0
    } else {
        clamp_unit((dec_rad.sin() - alt_rad.sin() * lat_rad.sin()) / denominator).acos() * RAD2DEG
    };

    // acos only covers 0..180; the sign of the hour angle picks East or West
    let az = if ha_rad.sin() < 0.0 { a } else { 360.0 - a };

    AzAlt::new(wrap_degrees(az), alt_rad * RAD2DEG)
}

/// Horizontal to equatorial (Jnow) coordinates for an observer and time
///
/// The hour angle comes from `atan2`, which keeps the correct half of the
/// sky for every azimuth.
pub fn az_alt_to_ra_dec<Tz: TimeZone>(
    aa: AzAlt,
    latitude: f64,
    longitude: f64,
    dt: &DateTime<Tz>,
) -> RaDec {
    let lst_deg = local_sidereal_time(dt, longitude);

    let alt_rad = aa.alt * DEG2RAD;
    let az_rad = aa.az * DEG2RAD;
    let lat_rad = latitude * DEG2RAD;

    let sin_dec = clamp_unit(
        lat_rad.sin() * alt_rad.sin() + lat_rad.cos() * alt_rad.cos() * az_rad.cos(),
    );
    let dec_rad = sin_dec.asin();

    let y = -alt_rad.cos() * lat_rad.cos() * az_rad.sin();
    let x = alt_rad.sin() - lat_rad.sin() * sin_dec;
    let ha_deg = y.atan2(x) * RAD2DEG;

    RaDec {
        ra: wrap_hours((lst_deg - ha_deg) / DEG_PER_HOUR),
        dec: dec_rad * RAD2DEG,
    }
}

/// East-positive longitude whose meridian carries right ascension
/// `ra_hours` when Greenwich sidereal time is `gst` degrees
///
/// The result is in `(-180, 180]`. `gst` is the value of
/// [`local_sidereal_time`] at longitude 0.
pub fn lst_and_ra_to_longitude(gst: f64, ra_hours: f64) -> f64 {
    wrap_degrees_signed(hours_to_degrees(ra_hours) - gst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::utc_datetime;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_lst_at_j2000_greenwich() {
        // 2000-01-01 12:00 UT: 100.46 + 15 * 12
        let dt = utc_datetime(2000, 1, 1, 12, 0, 0).unwrap();
        assert_abs_diff_eq!(local_sidereal_time(&dt, 0.0), 280.46, epsilon = 8.3e-5);
    }

    #[test]
    fn test_lst_negative_longitude_in_range() {
        let dt = utc_datetime(2000, 1, 1, 0, 0, 0).unwrap();
        let lst = local_sidereal_time(&dt, -179.0);
        assert!((0.0..360.0).contains(&lst));
        assert_abs_diff_eq!(
            lst,
            wrap_degrees(local_sidereal_time(&dt, 0.0) - 179.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_object_on_meridian() {
        // A source whose RA equals the LST transits due South (north of dec) at
        // altitude 90 - |lat - dec|
        let dt = utc_datetime(2022, 3, 14, 21, 0, 0).unwrap();
        let lat = 52.0;
        let lon = -2.0;
        let lst = local_sidereal_time(&dt, lon);
        let rd = RaDec::from_degrees(lst, 20.0);

        let aa = ra_dec_to_az_alt(rd, lat, lon, &dt, false);
        assert_abs_diff_eq!(aa.alt, 58.0, epsilon = 1e-6);
        assert_abs_diff_eq!(aa.az, 180.0, epsilon = 1e-4);
    }

    #[test]
    fn test_meeus_example_13b() {
        // Meeus, Astronomical Algorithms (2nd ed.) example 13.b: Venus from
        // the US Naval Observatory, 1987 Apr 10 19:21:00 UT. Meeus measures
        // azimuth from the South, A = 68.0337; altitude h = 15.1249
        let dt = utc_datetime(1987, 4, 10, 19, 21, 0).unwrap();
        let venus = RaDec::new(
            23.0 + 9.0 / 60.0 + 16.641 / 3600.0,
            -(6.0 + 43.0 / 60.0 + 11.61 / 3600.0),
        );
        let lat = 38.0 + 55.0 / 60.0 + 17.0 / 3600.0;
        let lon = -(77.0 + 3.0 / 60.0 + 56.0 / 3600.0);

        let aa = ra_dec_to_az_alt(venus, lat, lon, &dt, false);
        assert_abs_diff_eq!(aa.az, 68.0337 + 180.0, epsilon = 0.1);
        assert_abs_diff_eq!(aa.alt, 15.1249, epsilon = 0.1);
    }

    #[test]
    fn test_east_west_branch() {
        let dt = utc_datetime(2022, 3, 14, 21, 0, 0).unwrap();
        let lst = local_sidereal_time(&dt, 0.0);

        // Rising (negative hour angle) is in the East
        let rising = ra_dec_to_az_alt(RaDec::from_degrees(lst + 30.0, 0.0), 45.0, 0.0, &dt, false);
        assert!(rising.az > 0.0 && rising.az < 180.0, "{:?}", rising);

        let setting = ra_dec_to_az_alt(RaDec::from_degrees(lst - 30.0, 0.0), 45.0, 0.0, &dt, false);
        assert!(setting.az > 180.0 && setting.az < 360.0, "{:?}", setting);
    }

    #[test]
    fn test_zenith_has_finite_azimuth() {
        let dt = utc_datetime(2022, 3, 14, 21, 0, 0).unwrap();
        let lst = local_sidereal_time(&dt, 10.0);
        let aa = ra_dec_to_az_alt(RaDec::from_degrees(lst, 45.0), 45.0, 10.0, &dt, false);
        assert_abs_diff_eq!(aa.alt, 90.0, epsilon = 1e-6);
        assert!(aa.az.is_finite());
        assert!((0.0..360.0).contains(&aa.az));
    }

    #[test]
    fn test_horizontal_roundtrip_random() {
        let mut rng = StdRng::seed_from_u64(5150);
        let dt = utc_datetime(2023, 8, 1, 3, 25, 45).unwrap();

        for _ in 0..200 {
            let lat = rng.gen_range(-80.0..80.0);
            let lon = rng.gen_range(-180.0..180.0);
            let rd = RaDec::new(rng.gen_range(0.0..24.0), rng.gen_range(-85.0..85.0));

            let aa = ra_dec_to_az_alt(rd, lat, lon, &dt, false);
            assert!((0.0..360.0).contains(&aa.az));
            assert!((-90.0..=90.0).contains(&aa.alt));

            let back = az_alt_to_ra_dec(aa, lat, lon, &dt);
            // acos loses digits near the meridian
            assert_abs_diff_eq!(back.dec, rd.dec, epsilon = 1e-5);
            let dra = (back.ra - rd.ra + 12.0).rem_euclid(24.0) - 12.0;
            assert!(dra.abs() < 1e-5, "ra {} came back as {}", rd.ra, back.ra);
        }
    }

    #[test]
    fn test_j2000_flag_precesses() {
        let dt = utc_datetime(2050, 1, 1, 0, 0, 0).unwrap();
        let rd = RaDec::new(6.0, 20.0);
        let a = ra_dec_to_az_alt(rd, 30.0, 0.0, &dt, false);
        let b = ra_dec_to_az_alt(rd, 30.0, 0.0, &dt, true);
        // Half a century of precession is around 0.7 degrees
        let shift = (a.alt - b.alt).abs() + (a.az - b.az).abs();
        assert!(shift > 0.1 && shift < 3.0, "shift {}", shift);
    }

    #[test]
    fn test_longitude_from_meridian_ra() {
        let dt = utc_datetime(2019, 11, 2, 6, 45, 0).unwrap();
        let gst = local_sidereal_time(&dt, 0.0);
        for lon in [-150.0, -20.0, 0.0, 33.3, 170.0] {
            let ra = local_sidereal_time(&dt, lon) / 15.0;
            assert_abs_diff_eq!(lst_and_ra_to_longitude(gst, ra), lon, epsilon = 1e-9);
        }
    }
}
