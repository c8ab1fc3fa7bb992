//! Atmospheric refraction corrections
//!
//! Both models return the amount in degrees to add to a true (geometric)
//! altitude to obtain the apparent altitude. At the zenith the correction
//! is zero.
//!
//! - [`saemundsson`]: a one-line empirical fit for optical wavelengths.
//! - [`pal`]: numerical integration through a model atmosphere, valid for
//!   radio as well as optical frequencies and accounting for humidity.

pub mod pal;

use crate::constants::{C, DEG2RAD, RAD2DEG};
use crate::coordinates::angle::celsius_to_kelvin;
use crate::observer::Atmosphere;
use log::debug;
use pal::PalConditions;
use serde::{Deserialize, Serialize};

/// Precision requested from the refraction integral
const INTEGRATION_EPS: f64 = 1e-10;

/// Lowest altitude in degrees at which Saemundsson's formula is used
///
/// Just below this the tangent argument passes 90° on its way to the pole
/// at -5.11°.
pub const SAEMUNDSSON_MIN_ALTITUDE: f64 = -5.0;

/// Refraction in degrees by Saemundsson's formula
///
/// `altitude` in degrees, `pressure` in millibars and `temperature` in
/// Celsius. Below [`SAEMUNDSSON_MIN_ALTITUDE`] no correction is applied
/// and `0.0` is returned.
pub fn saemundsson(altitude: f64, pressure: f64, temperature: f64) -> f64 {
    if altitude < SAEMUNDSSON_MIN_ALTITUDE {
        debug!("saemundsson: altitude {} below formula range, no correction", altitude);
        return 0.0;
    }
    let pt = (pressure / 1010.0) * (283.0 / (273.0 + temperature));
    // The formula gives arcminutes
    pt * (1.02 / ((altitude + 10.3 / (altitude + 5.11)) * DEG2RAD).tan() + 0.0019279) / 60.0
}

/// Refraction in degrees from the integrated atmosphere model
///
/// `frequency` in Hz, `latitude` in degrees and `height` above sea level
/// in metres.
pub fn pal(
    altitude: f64,
    atmosphere: &Atmosphere,
    frequency: f64,
    latitude: f64,
    height: f64,
) -> f64 {
    let conditions = PalConditions {
        height,
        temperature: celsius_to_kelvin(atmosphere.temperature),
        pressure: atmosphere.pressure,
        relative_humidity: atmosphere.humidity / 100.0,
        wavelength: C / frequency * 1e6,
        latitude: latitude * DEG2RAD,
        lapse_rate: atmosphere.lapse_rate / 1000.0,
    };

    let z = 90.0 - altitude;
    let constants = conditions.refco(INTEGRATION_EPS);
    z - constants.refz(z * DEG2RAD) * RAD2DEG
}

/// Choice of refraction correction for an observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefractionModel {
    Saemundsson,
    #[default]
    Pal,
    /// No correction
    #[serde(rename = "none")]
    Disabled,
}

impl RefractionModel {
    /// Correction in degrees to add to `true_altitude`
    pub fn correction(
        &self,
        true_altitude: f64,
        atmosphere: &Atmosphere,
        frequency: f64,
        latitude: f64,
        height: f64,
    ) -> f64 {
        match self {
            RefractionModel::Saemundsson => {
                saemundsson(true_altitude, atmosphere.pressure, atmosphere.temperature)
            }
            RefractionModel::Pal => pal(true_altitude, atmosphere, frequency, latitude, height),
            RefractionModel::Disabled => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HYDROGEN_LINE_HZ;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    fn dry_freezing() -> Atmosphere {
        Atmosphere {
            pressure: 1013.25,
            temperature: 0.0,
            humidity: 0.0,
            lapse_rate: 6.5,
        }
    }

    #[test]
    fn test_zenith_is_zero() {
        assert_eq!(pal(90.0, &Atmosphere::default(), HYDROGEN_LINE_HZ, 52.0, 0.0), 0.0);
        assert!(saemundsson(90.0, 1013.25, 10.0).abs() < 1e-8);
    }

    #[test]
    fn test_saemundsson_reference() {
        assert_abs_diff_eq!(
            saemundsson(10.0, 1013.25, 0.0),
            0.093_763_460_826_525_85,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            saemundsson(0.0, 1013.25, 0.0),
            0.502_370_269_034_454_5,
            epsilon = 1e-12
        );
    }

    #[rstest]
    #[case(-5.11)]
    #[case(-5.1)]
    #[case(-6.0)]
    #[case(-90.0)]
    fn test_saemundsson_below_formula_range(#[case] altitude: f64) {
        assert_eq!(saemundsson(altitude, 1013.25, 10.0), 0.0);
    }

    #[test]
    fn test_saemundsson_at_lower_limit() {
        let r = saemundsson(SAEMUNDSSON_MIN_ALTITUDE, 1013.25, 10.0);
        assert!(r.is_finite());
        assert_abs_diff_eq!(r, 4.382e-4, epsilon = 1e-6);
    }

    #[test]
    fn test_optical_pal_agrees_with_saemundsson() {
        // Dry air at 0 °C seen at 500 nm
        let p = pal(10.0, &dry_freezing(), 6e14, 0.0, 0.0);
        assert_abs_diff_eq!(p, 0.091_485_635_258_123_92, epsilon = 1e-9);
        let s = saemundsson(10.0, 1013.25, 0.0);
        assert!(((p - s) / s).abs() < 0.05);
    }

    #[rstest]
    #[case(10.0, 0.100_939_933_130_291_59)]
    #[case(30.0, 0.031_987_160_533_390_124)]
    #[case(-5.0, 1.679_424_529_703_808_8)]
    fn test_radio_pal_standard_atmosphere(#[case] altitude: f64, #[case] expected: f64) {
        let r = pal(altitude, &Atmosphere::default(), HYDROGEN_LINE_HZ, 0.0, 0.0);
        assert_abs_diff_eq!(r, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_humidity_raises_radio_refraction() {
        let dry = pal(10.0, &dry_freezing(), HYDROGEN_LINE_HZ, 0.0, 0.0);
        let humid = Atmosphere {
            humidity: 80.0,
            ..dry_freezing()
        };
        let wet = pal(10.0, &humid, HYDROGEN_LINE_HZ, 0.0, 0.0);
        assert!(wet > dry);
    }

    #[test]
    fn test_model_dispatch() {
        let atm = Atmosphere::default();
        assert_eq!(
            RefractionModel::Disabled.correction(5.0, &atm, HYDROGEN_LINE_HZ, 0.0, 0.0),
            0.0
        );
        assert_eq!(
            RefractionModel::Saemundsson.correction(5.0, &atm, HYDROGEN_LINE_HZ, 0.0, 0.0),
            saemundsson(5.0, atm.pressure, atm.temperature)
        );
        assert_eq!(
            RefractionModel::Pal.correction(5.0, &atm, HYDROGEN_LINE_HZ, 0.0, 0.0),
            pal(5.0, &atm, HYDROGEN_LINE_HZ, 0.0, 0.0)
        );
    }

    #[test]
    fn test_model_names() {
        assert_eq!(serde_json::to_string(&RefractionModel::Disabled).unwrap(), "\"none\"");
        assert_eq!(serde_json::to_string(&RefractionModel::Pal).unwrap(), "\"pal\"");
        let m: RefractionModel = serde_json::from_str("\"saemundsson\"").unwrap();
        assert_eq!(m, RefractionModel::Saemundsson);
    }
}
