//! Antenna-mount projections of the horizontal sky
//!
//! Two X/Y conventions for pointing X-Y mounted dishes:
//!
//! - **XY85**: X positive towards the South, Y positive towards the East.
//! - **XY30**: X positive towards the East, Y positive towards the North.
//!
//! Both put the zenith at `(0, 0)`. All angles are degrees. Elevations
//! above 90 are folded back over the zenith before projecting.

use crate::constants::{DEG2RAD, RAD2DEG};
use crate::coordinates::angle::{clamp_unit, wrap_degrees};
use crate::coordinates::AzAlt;

/// Fold an elevation past the zenith back into `[-90, 90]`, flipping azimuth
fn fold_over_zenith(aa: AzAlt) -> (f64, f64) {
    let mut az = aa.az;
    let mut el = aa.alt;
    if az >= 360.0 {
        az -= 360.0;
    }
    if el > 90.0 {
        el = 180.0 - el;
        az = if az >= 180.0 { az - 180.0 } else { az + 180.0 };
    }
    (az, el)
}

/// Horizontal to XY85 `(x, y)`
pub fn az_alt_to_xy85(aa: AzAlt) -> (f64, f64) {
    if aa.alt == 90.0 {
        return (0.0, 0.0);
    }
    let (az, el) = fold_over_zenith(aa);
    let az_rad = az * DEG2RAD;
    let el_rad = el * DEG2RAD;

    let y = clamp_unit(el_rad.cos() * az_rad.sin()).asin() * RAD2DEG;

    // cot(el) is infinite on the horizon
    let x = if el == 0.0 {
        if az == 90.0 || az == 270.0 {
            0.0
        } else if az > 90.0 && az < 270.0 {
            90.0
        } else {
            -90.0
        }
    } else {
        (-(el_rad.cos() / el_rad.sin()) * az_rad.cos()).atan() * RAD2DEG
    };

    (x, y)
}

/// Horizontal to XY30 `(x, y)`
pub fn az_alt_to_xy30(aa: AzAlt) -> (f64, f64) {
    if aa.alt == 90.0 {
        return (0.0, 0.0);
    }
    let (az, el) = fold_over_zenith(aa);
    let az_rad = az * DEG2RAD;
    let el_rad = el * DEG2RAD;

    let y = clamp_unit(el_rad.cos() * az_rad.cos()).asin() * RAD2DEG;

    let x = if el == 0.0 {
        if az == 0.0 || az == 180.0 {
            0.0
        } else if (0.0..=180.0).contains(&az) {
            90.0
        } else {
            -90.0
        }
    } else {
        ((el_rad.cos() / el_rad.sin()) * az_rad.sin()).atan() * RAD2DEG
    };

    (x, y)
}

/// XY85 to horizontal; azimuth in `[0, 360)`
pub fn xy85_to_az_alt(x: f64, y: f64) -> AzAlt {
    if x == 0.0 && y == 0.0 {
        return AzAlt::new(0.0, 90.0);
    }
    let x_rad = x * DEG2RAD;
    let y_rad = y * DEG2RAD;
    let el_rad = clamp_unit(y_rad.cos() * x_rad.cos()).asin();

    let az_deg = if x == 0.0 {
        if y >= 0.0 {
            90.0
        } else {
            270.0
        }
    } else if y == 90.0 {
        90.0
    } else if y == -90.0 {
        270.0
    } else {
        ((-y_rad.tan()).atan2(x_rad.sin()) + std::f64::consts::PI) * RAD2DEG
    };

    AzAlt::new(wrap_degrees(az_deg), el_rad * RAD2DEG)
}

/// XY30 to horizontal; azimuth in `[0, 360)`
pub fn xy30_to_az_alt(x: f64, y: f64) -> AzAlt {
    if x == 0.0 && y == 0.0 {
        return AzAlt::new(0.0, 90.0);
    }
    let x_rad = x * DEG2RAD;
    let y_rad = y * DEG2RAD;
    let el_rad = clamp_unit(y_rad.cos() * x_rad.cos()).asin();

    let az_deg = if y == 0.0 {
        if x >= 0.0 {
            90.0
        } else {
            270.0
        }
    } else if y == 90.0 {
        0.0
    } else if y == -90.0 {
        180.0
    } else {
        x_rad.sin().atan2(y_rad.tan()) * RAD2DEG
    };

    AzAlt::new(wrap_degrees(az_deg), el_rad * RAD2DEG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[test]
    fn test_zenith_is_origin() {
        assert_eq!(az_alt_to_xy85(AzAlt::new(123.0, 90.0)), (0.0, 0.0));
        assert_eq!(az_alt_to_xy30(AzAlt::new(123.0, 90.0)), (0.0, 0.0));
        assert_eq!(xy85_to_az_alt(0.0, 0.0), AzAlt::new(0.0, 90.0));
        assert_eq!(xy30_to_az_alt(0.0, 0.0), AzAlt::new(0.0, 90.0));
    }

    #[rstest]
    #[case(0.0, -90.0)]
    #[case(45.0, -90.0)]
    #[case(90.0, 0.0)]
    #[case(180.0, 90.0)]
    #[case(270.0, 0.0)]
    #[case(300.0, -90.0)]
    fn test_xy85_horizon_branches(#[case] az: f64, #[case] expected_x: f64) {
        let (x, _) = az_alt_to_xy85(AzAlt::new(az, 0.0));
        assert_eq!(x, expected_x);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(90.0, 90.0)]
    #[case(180.0, 0.0)]
    #[case(270.0, -90.0)]
    fn test_xy30_horizon_branches(#[case] az: f64, #[case] expected_x: f64) {
        let (x, _) = az_alt_to_xy30(AzAlt::new(az, 0.0));
        assert_eq!(x, expected_x);
    }

    #[test]
    fn test_xy85_north_meridian_tracks_elevation() {
        // Along the North meridian X85 runs from -90 at the horizon to 0 overhead
        for el in [10.0, 30.0, 60.0, 85.0] {
            let (x, y) = az_alt_to_xy85(AzAlt::new(0.0, el));
            assert_abs_diff_eq!(x, el - 90.0, epsilon = 1e-9);
            assert_abs_diff_eq!(y, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_axis_directions() {
        // Low in the South: X85 positive
        let (x85, _) = az_alt_to_xy85(AzAlt::new(180.0, 30.0));
        assert_abs_diff_eq!(x85, 60.0, epsilon = 1e-9);
        // Low in the East: Y85 and X30 positive
        let (x85, y85) = az_alt_to_xy85(AzAlt::new(90.0, 30.0));
        assert_abs_diff_eq!(x85, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(y85, 60.0, epsilon = 1e-9);
        let (x30, y30) = az_alt_to_xy30(AzAlt::new(90.0, 30.0));
        assert_abs_diff_eq!(x30, 60.0, epsilon = 1e-9);
        assert_abs_diff_eq!(y30, 0.0, epsilon = 1e-9);
        // Low in the North: Y30 positive
        let (_, y30) = az_alt_to_xy30(AzAlt::new(0.0, 30.0));
        assert_abs_diff_eq!(y30, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_elevation_past_zenith_folds() {
        let over = az_alt_to_xy85(AzAlt::new(10.0, 100.0));
        let folded = az_alt_to_xy85(AzAlt::new(190.0, 80.0));
        assert_abs_diff_eq!(over.0, folded.0, epsilon = 1e-12);
        assert_abs_diff_eq!(over.1, folded.1, epsilon = 1e-12);
    }

    #[rstest]
    #[case(20.0, 35.0)]
    #[case(135.0, 10.0)]
    #[case(200.0, 55.0)]
    #[case(315.0, 75.0)]
    fn test_xy85_roundtrip(#[case] az: f64, #[case] alt: f64) {
        let (x, y) = az_alt_to_xy85(AzAlt::new(az, alt));
        let back = xy85_to_az_alt(x, y);
        assert_abs_diff_eq!(back.az, az, epsilon = 1e-9);
        assert_abs_diff_eq!(back.alt, alt, epsilon = 1e-9);
    }

    #[rstest]
    #[case(20.0, 35.0)]
    #[case(135.0, 10.0)]
    #[case(200.0, 55.0)]
    #[case(315.0, 75.0)]
    fn test_xy30_roundtrip(#[case] az: f64, #[case] alt: f64) {
        let (x, y) = az_alt_to_xy30(AzAlt::new(az, alt));
        let back = xy30_to_az_alt(x, y);
        assert_abs_diff_eq!(back.az, az, epsilon = 1e-9);
        assert_abs_diff_eq!(back.alt, alt, epsilon = 1e-9);
    }

    #[test]
    fn test_inverse_axis_branches() {
        assert_eq!(xy85_to_az_alt(0.0, 30.0).az, 90.0);
        assert_eq!(xy85_to_az_alt(0.0, -30.0).az, 270.0);
        assert_eq!(xy30_to_az_alt(30.0, 0.0).az, 90.0);
        assert_eq!(xy30_to_az_alt(-30.0, 0.0).az, 270.0);
        let aa = xy30_to_az_alt(0.0, 45.0);
        assert_abs_diff_eq!(aa.alt, 45.0, epsilon = 1e-12);
    }
}
