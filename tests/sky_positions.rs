//! Checks that combine several modules through the public API

use approx::assert_abs_diff_eq;
use chrono::{Duration, NaiveDate};
use radiosky::almanac::{sunrise, SunriseSunset};
use radiosky::constants::HYDROGEN_LINE_HZ;
use radiosky::framelib::{
    az_alt_to_ra_dec, az_alt_to_xy85, equatorial_to_galactic, precess, ra_dec_to_az_alt,
    xy85_to_az_alt,
};
use radiosky::planetlib::{sun_position, Body};
use radiosky::radio::{observer_velocity_lsrk, velocity_to_doppler};
use radiosky::time::{jd_j2000, julian_date_from_datetime, utc_datetime};
use radiosky::{GeographicPosition, Observer, RaDec};
use rstest::rstest;

/// Sun altitude at sunrise and sunset: refraction plus the solar semi-diameter
const SUNRISE_ALTITUDE: f64 = -0.833;

#[rstest]
#[case(NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(), 51.4779, -0.0015)]
#[case(NaiveDate::from_ymd_opt(2023, 3, 20).unwrap(), 0.0, 0.0)]
#[case(NaiveDate::from_ymd_opt(2023, 3, 20).unwrap(), -33.8688, 151.2093)]
fn test_sun_on_horizon_at_sunrise(
    #[case] day: NaiveDate,
    #[case] latitude: f64,
    #[case] longitude: f64,
) {
    let SunriseSunset::RiseAndSet { rise, set } = sunrise(day, latitude, longitude).unwrap()
    else {
        panic!("expected the Sun to rise and set");
    };

    let (at_rise, _) = sun_position(latitude, longitude, &rise);
    let (at_set, _) = sun_position(latitude, longitude, &set);
    // The sunrise equation uses the transit declination for both events, which
    // near an equinox moves the Sun by up to about 0.2 degrees
    assert_abs_diff_eq!(at_rise.alt, SUNRISE_ALTITUDE, epsilon = 0.25);
    assert_abs_diff_eq!(at_set.alt, SUNRISE_ALTITUDE, epsilon = 0.25);
    // Rising in the east, setting in the west
    assert!(at_rise.az < 180.0);
    assert!(at_set.az > 180.0);
}

#[test]
fn test_track_cas_a_through_the_night() {
    let observer = Observer::at(GeographicPosition::new(53.24, -2.31, 80.0));
    let cas_a = RaDec::new(23.391, 58.808);
    let start = utc_datetime(2024, 3, 1, 18, 0, 0).unwrap();

    for step in 0..12 {
        let dt = start + Duration::minutes(30 * step);
        let (lat, lon) = (observer.position.latitude, observer.position.longitude);
        let aa = ra_dec_to_az_alt(cas_a, lat, lon, &dt, true);

        // Circumpolar from this latitude
        assert!(aa.alt > 58.808 - (90.0 - 53.24) - 1.0, "alt {} at {}", aa.alt, dt);
        assert!(observer.apparent_altitude(aa.alt) > aa.alt);

        // The mount projection returns to the same pointing
        let (x, y) = az_alt_to_xy85(aa);
        let back = xy85_to_az_alt(x, y);
        assert_abs_diff_eq!(back.alt, aa.alt, epsilon = 1e-9);
        assert_abs_diff_eq!(back.az, aa.az, epsilon = 1e-9);

        // The inverse gives Jnow; precessing back is only good to the
        // non-orthogonality of the precession matrix
        let rd = az_alt_to_ra_dec(aa, lat, lon, &dt);
        let j2000 = precess(rd, julian_date_from_datetime(&dt), jd_j2000());
        assert_abs_diff_eq!(j2000.ra, cas_a.ra, epsilon = 1e-4);
        assert_abs_diff_eq!(j2000.dec, cas_a.dec, epsilon = 1e-4);
    }
}

#[test]
fn test_galactic_centre() {
    let sgr_a = RaDec::new(17.761_124, -29.007_81);
    let g = equatorial_to_galactic(sgr_a);
    assert!(g.l < 0.1 || g.l > 359.9, "l {}", g.l);
    assert_abs_diff_eq!(g.b, 0.0, epsilon = 0.1);
}

#[test]
fn test_hydrogen_line_lsrk_correction() {
    let dt = utc_datetime(2024, 9, 1, 0, 0, 0).unwrap();
    let target = RaDec::new(20.0, 40.0);
    let v = observer_velocity_lsrk(target, 52.0, 0.0, &dt);

    // Earth orbit, rotation and solar motion together stay well below 55 km/s
    assert!(v.abs() < 55.0, "v {}", v);

    let observed = velocity_to_doppler(v * 1000.0, HYDROGEN_LINE_HZ);
    assert!((observed - HYDROGEN_LINE_HZ).abs() < 55.0 / 299_792.458 * HYDROGEN_LINE_HZ);
}

#[test]
fn test_body_positions_are_consistent() {
    let dt = utc_datetime(2024, 1, 1, 0, 0, 0).unwrap();
    for body in [Body::Sun, Body::Moon] {
        let (aa, rd) = body.position(51.5, -0.1, &dt);
        assert!((0.0..360.0).contains(&aa.az), "{} az {}", body, aa.az);
        assert!((-90.0..=90.0).contains(&aa.alt));
        assert!((0.0..24.0).contains(&rd.ra));
    }
    // Midnight in January: the Sun is well below the horizon in London
    let (sun, _) = Body::Sun.position(51.5, -0.1, &dt);
    assert!(sun.alt < -50.0);
}
