//! Doppler, observer velocity and thermal noise helpers for radio work
//!
//! Line-of-sight velocities are in km/s and positive when the observer
//! approaches the target. Doppler conversions use the non-relativistic
//! radio definition and work in m/s and Hz.

use crate::constants::{AUDAY_TO_KMS, BOLTZMANN, C, DEG2RAD, EARTH_ROTATION_SPEED_KMS};
use crate::coordinates::cartesian::Cartesian3;
use crate::coordinates::RaDec;
use crate::ephemeris::earth_pv_mjd;
use crate::framelib::horizontal::local_sidereal_time;
use crate::time::modified_julian_date;
use chrono::{DateTime, TimeZone};
use lazy_static::lazy_static;

lazy_static! {
    /// Solar motion relative to the LSRK: 20 km/s towards RA 18h, Dec +30°
    /// (1900), as a J2000 equatorial vector in km/s
    static ref SOLAR_MOTION_LSRK: Cartesian3 = Cartesian3::new(0.29000, -17.31726, 10.00141);
}

/// Velocity in m/s for a line at rest frequency `f0` observed at `f` (Hz)
pub fn doppler_to_velocity(f: f64, f0: f64) -> f64 {
    C * f / f0 - C
}

/// Observed frequency in Hz of a line at rest frequency `f0` for velocity `v` (m/s)
pub fn velocity_to_doppler(v: f64, f0: f64) -> f64 {
    f0 * (v + C) / C
}

/// Line-of-sight velocity towards `rd` due to the Earth's rotation
///
/// The equinox of `rd` hardly matters here; the speed is under 0.5 km/s.
pub fn earth_rotation_velocity<Tz: TimeZone>(
    rd: RaDec,
    latitude: f64,
    longitude: f64,
    dt: &DateTime<Tz>,
) -> f64 {
    let hour_angle = (local_sidereal_time(dt, longitude) - rd.ra_degrees()) * DEG2RAD;
    -EARTH_ROTATION_SPEED_KMS
        * (latitude * DEG2RAD).cos()
        * hour_angle.sin()
        * (rd.dec * DEG2RAD).cos()
}

/// Line-of-sight velocity towards `rd` (J2000) due to the Earth's orbit,
/// relative to the solar system barycentre
pub fn earth_orbit_velocity_bcrs<Tz: TimeZone>(rd: RaDec, dt: &DateTime<Tz>) -> f64 {
    let state = earth_pv_mjd(modified_julian_date(dt));
    let velocity_kms = state.barycentric.velocity * AUDAY_TO_KMS;
    velocity_kms.dot(&rd.to_unit_vector())
}

/// Line-of-sight velocity towards `rd` (J2000) due to the Sun's motion
/// relative to the kinematic Local Standard of Rest
pub fn sun_velocity_lsrk(rd: RaDec) -> f64 {
    SOLAR_MOTION_LSRK.dot(&rd.to_unit_vector())
}

/// Total line-of-sight velocity of an observer on the Earth towards `rd`
/// (J2000) relative to the LSRK
///
/// Subtract this from a measured topocentric velocity to refer it to the LSRK.
pub fn observer_velocity_lsrk<Tz: TimeZone>(
    rd: RaDec,
    latitude: f64,
    longitude: f64,
    dt: &DateTime<Tz>,
) -> f64 {
    earth_rotation_velocity(rd, latitude, longitude, dt)
        + earth_orbit_velocity_bcrs(rd, dt)
        + sun_velocity_lsrk(rd)
}

/// Thermal noise power in dBm for temperature `temp` (K) over bandwidth `bw` (Hz)
pub fn noise_power_dbm(temp: f64, bw: f64) -> f64 {
    10.0 * (BOLTZMANN * temp * bw).log10() + 30.0
}

/// Noise temperature in K of a power `dbm` over bandwidth `bw` (Hz)
pub fn noise_temp(dbm: f64, bw: f64) -> f64 {
    10f64.powf((dbm - 30.0) / 10.0) / (BOLTZMANN * bw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HYDROGEN_LINE_HZ;
    use crate::time::utc_datetime;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rstest::rstest;

    #[rstest]
    #[case(HYDROGEN_LINE_HZ + 100_000.0)]
    #[case(HYDROGEN_LINE_HZ - 2_500_000.0)]
    #[case(HYDROGEN_LINE_HZ)]
    fn test_doppler_roundtrip(#[case] f: f64) {
        let v = doppler_to_velocity(f, HYDROGEN_LINE_HZ);
        assert_relative_eq!(velocity_to_doppler(v, HYDROGEN_LINE_HZ), f, max_relative = 1e-15);
    }

    #[test]
    fn test_doppler_sign() {
        // Blue shift is approach
        assert!(doppler_to_velocity(HYDROGEN_LINE_HZ + 1e3, HYDROGEN_LINE_HZ) > 0.0);
        assert_eq!(doppler_to_velocity(HYDROGEN_LINE_HZ, HYDROGEN_LINE_HZ), 0.0);
        // 1 km/s at 21 cm is about 4.74 kHz
        let shift = velocity_to_doppler(1000.0, HYDROGEN_LINE_HZ) - HYDROGEN_LINE_HZ;
        assert_abs_diff_eq!(shift, 4737.964, epsilon = 0.001);
    }

    #[rstest]
    #[case(290.0, 1e6)]
    #[case(3.0, 2.4e9)]
    #[case(10_000.0, 1.0)]
    fn test_noise_roundtrip(#[case] temp: f64, #[case] bw: f64) {
        assert_relative_eq!(noise_temp(noise_power_dbm(temp, bw), bw), temp, max_relative = 1e-12);
    }

    #[test]
    fn test_room_temperature_noise_floor() {
        // kTB at 290 K is -174 dBm/Hz
        assert_abs_diff_eq!(noise_power_dbm(290.0, 1.0), -173.975, epsilon = 1e-3);
    }

    #[test]
    fn test_rotation_velocity_limits() {
        let dt = utc_datetime(2023, 4, 1, 0, 0, 0).unwrap();
        let lst = local_sidereal_time(&dt, 0.0);

        // Rising on the equator, the observer moves straight towards the source
        let east = RaDec::from_degrees(lst + 90.0, 0.0);
        assert_abs_diff_eq!(earth_rotation_velocity(east, 0.0, 0.0, &dt), 0.4655, epsilon = 1e-9);

        // On the meridian and at the pole there is no radial component
        let south = RaDec::from_degrees(lst, 0.0);
        assert_abs_diff_eq!(earth_rotation_velocity(south, 0.0, 0.0, &dt), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(earth_rotation_velocity(east, 90.0, 0.0, &dt), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_orbit_velocity_bounded_by_orbital_speed() {
        let dt = utc_datetime(2021, 9, 22, 18, 0, 0).unwrap();
        let mut max: f64 = 0.0;
        for ra in 0..24 {
            let v = earth_orbit_velocity_bcrs(RaDec::new(f64::from(ra), 0.0), &dt);
            assert!(v.abs() < 30.5);
            max = max.max(v.abs());
        }
        assert!(max > 25.0, "max {}", max);
    }

    #[test]
    fn test_solar_apex() {
        // Towards the solar apex the whole 20 km/s is along the line of sight
        let apex = RaDec::from_cartesian(&SOLAR_MOTION_LSRK);
        assert_abs_diff_eq!(
            sun_velocity_lsrk(apex),
            SOLAR_MOTION_LSRK.magnitude(),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(SOLAR_MOTION_LSRK.magnitude(), 20.0, epsilon = 1e-3);
    }

    #[test]
    fn test_lsrk_is_sum() {
        let dt = utc_datetime(2022, 7, 4, 3, 0, 0).unwrap();
        let rd = RaDec::new(20.5, 40.0);
        let total = observer_velocity_lsrk(rd, 52.0, -1.0, &dt);
        let parts = earth_rotation_velocity(rd, 52.0, -1.0, &dt)
            + earth_orbit_velocity_bcrs(rd, &dt)
            + sun_velocity_lsrk(rd);
        assert_eq!(total, parts);
    }
}
