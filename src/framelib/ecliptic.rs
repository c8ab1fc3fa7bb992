//! Ecliptic to equatorial rotation
use crate::constants::DEG2RAD;
use crate::coordinates::cartesian::Cartesian3;
use crate::coordinates::{Ecliptic, RaDec};
use nalgebra::Matrix3;

/// Mean obliquity of the ecliptic in degrees, `d` days from J2000
pub fn mean_obliquity(d: f64) -> f64 {
    23.4393 - 3.563e-7 * d
}

/// Rotation about the equinox direction from ecliptic to equatorial axes
pub fn ecliptic_rotation(obliquity_deg: f64) -> Matrix3<f64> {
    let (s, c) = (obliquity_deg * DEG2RAD).sin_cos();
    Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, c, -s, //
        0.0, s, c,
    )
}

/// Ecliptic longitude/latitude to RA/Dec of the same equinox
pub fn ecliptic_to_equatorial(ecl: Ecliptic, obliquity_deg: f64) -> RaDec {
    let v = Cartesian3::from_spherical(ecl.lon * DEG2RAD, ecl.lat * DEG2RAD, 1.0)
        .rotate(&ecliptic_rotation(obliquity_deg));
    RaDec::from_cartesian(&v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_obliquity_at_j2000() {
        assert_eq!(mean_obliquity(0.0), 23.4393);
        assert!(mean_obliquity(36525.0) < 23.4393);
    }

    #[test]
    fn test_solstice_points() {
        let eps = mean_obliquity(0.0);
        let summer = ecliptic_to_equatorial(Ecliptic { lon: 90.0, lat: 0.0 }, eps);
        assert_abs_diff_eq!(summer.ra, 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(summer.dec, eps, epsilon = 1e-12);

        let winter = ecliptic_to_equatorial(Ecliptic { lon: 270.0, lat: 0.0 }, eps);
        assert_abs_diff_eq!(winter.ra, 18.0, epsilon = 1e-12);
        assert_abs_diff_eq!(winter.dec, -eps, epsilon = 1e-12);
    }

    #[test]
    fn test_ecliptic_pole() {
        let eps = 23.4393;
        let pole = ecliptic_to_equatorial(Ecliptic { lon: 0.0, lat: 90.0 }, eps);
        assert_abs_diff_eq!(pole.ra, 18.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pole.dec, 90.0 - eps, epsilon = 1e-9);
    }
}
