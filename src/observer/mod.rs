//! Observer location, local atmosphere and configuration loading
//!
//! An [`Observer`] gathers everything the position and refraction routines
//! need to know about where the telescope is. It can be built in code or
//! read from JSON:
//!
//! ```json
//! {
//!   "position": { "latitude": 51.5, "longitude": -0.12, "height": 35.0 },
//!   "atmosphere": { "pressure": 1005.0, "temperature": 12.0 },
//!   "refraction": "pal",
//!   "frequency_hz": 1420405751.768
//! }
//! ```
//!
//! Missing fields take their defaults: sea level at 0°N 0°E, the standard
//! atmosphere, the integrated refraction model at the hydrogen line.

use crate::constants::HYDROGEN_LINE_HZ;
use crate::refraction::RefractionModel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for observer configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error when the configuration file cannot be read
    #[error("File I/O error on {path:?}: {source}")]
    FileError {
        /// The path of the file that caused the error
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Error when the JSON does not describe an observer
    #[error("Invalid observer JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Error when a field is outside its physical range
    #[error("Invalid observer configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Observer location on the Earth
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeographicPosition {
    /// Geodetic latitude in degrees, North positive
    pub latitude: f64,
    /// Longitude in degrees, East positive
    pub longitude: f64,
    /// Height above sea level in metres
    pub height: f64,
}

impl GeographicPosition {
    pub fn new(latitude: f64, longitude: f64, height: f64) -> Self {
        GeographicPosition {
            latitude,
            longitude,
            height,
        }
    }
}

/// Atmospheric conditions at the observer, used by the refraction models
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Atmosphere {
    /// Pressure in millibars
    pub pressure: f64,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity in percent, 0-100
    pub humidity: f64,
    /// Temperature lapse rate in the troposphere, K/km
    pub lapse_rate: f64,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Atmosphere {
            pressure: 1013.25,
            temperature: 10.0,
            humidity: 80.0,
            lapse_rate: 6.5,
        }
    }
}

/// Complete observer description
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Observer {
    pub position: GeographicPosition,
    pub atmosphere: Atmosphere,
    /// Refraction model applied by [`Observer::apparent_altitude`]
    pub refraction: RefractionModel,
    /// Observing frequency in Hz
    pub frequency_hz: f64,
}

impl Default for Observer {
    fn default() -> Self {
        Observer {
            position: GeographicPosition::default(),
            atmosphere: Atmosphere::default(),
            refraction: RefractionModel::Pal,
            frequency_hz: HYDROGEN_LINE_HZ,
        }
    }
}

impl Observer {
    /// Observer at a position with default atmosphere and refraction
    pub fn at(position: GeographicPosition) -> Self {
        Observer {
            position,
            ..Self::default()
        }
    }

    /// Parse and validate an observer from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let observer: Observer = serde_json::from_str(json)?;
        observer.validate()?;
        Ok(observer)
    }

    /// Read, parse and validate an observer from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::FileError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Serialise to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field lies in its physical range
    pub fn validate(&self) -> Result<()> {
        let p = &self.position;
        if !(-90.0..=90.0).contains(&p.latitude) {
            return Err(ConfigError::Invalid(format!(
                "latitude {} outside [-90, 90]",
                p.latitude
            )));
        }
        if !(-180.0..=360.0).contains(&p.longitude) {
            return Err(ConfigError::Invalid(format!(
                "longitude {} outside [-180, 360]",
                p.longitude
            )));
        }
        if !(0.0..=100.0).contains(&self.atmosphere.humidity) {
            return Err(ConfigError::Invalid(format!(
                "humidity {}% outside [0, 100]",
                self.atmosphere.humidity
            )));
        }
        if self.atmosphere.pressure < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "negative pressure {} mb",
                self.atmosphere.pressure
            )));
        }
        if self.frequency_hz <= 0.0 || !self.frequency_hz.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "frequency {} Hz must be positive",
                self.frequency_hz
            )));
        }
        Ok(())
    }

    /// Refraction correction in degrees for a true (geometric) altitude
    pub fn refraction_correction(&self, true_altitude: f64) -> f64 {
        self.refraction.correction(
            true_altitude,
            &self.atmosphere,
            self.frequency_hz,
            self.position.latitude,
            self.position.height,
        )
    }

    /// Apparent altitude in degrees for a true (geometric) altitude
    pub fn apparent_altitude(&self, true_altitude: f64) -> f64 {
        true_altitude + self.refraction_correction(true_altitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let observer =
            Observer::from_json_str(r#"{ "position": { "latitude": 52.2, "longitude": 0.1 } }"#)
                .unwrap();
        assert_eq!(observer.position.latitude, 52.2);
        assert_eq!(observer.position.height, 0.0);
        assert_eq!(observer.atmosphere, Atmosphere::default());
        assert_eq!(observer.refraction, RefractionModel::Pal);
        assert_eq!(observer.frequency_hz, HYDROGEN_LINE_HZ);
    }

    #[test]
    fn test_refraction_model_names() {
        let observer = Observer::from_json_str(r#"{ "refraction": "saemundsson" }"#).unwrap();
        assert_eq!(observer.refraction, RefractionModel::Saemundsson);

        let observer = Observer::from_json_str(r#"{ "refraction": "none" }"#).unwrap();
        assert_eq!(observer.apparent_altitude(12.5), 12.5);
    }

    #[test]
    fn test_json_roundtrip() {
        let observer = Observer::at(GeographicPosition::new(-33.9, 18.4, 120.0));
        let json = observer.to_json_string().unwrap();
        assert_eq!(Observer::from_json_str(&json).unwrap(), observer);
    }

    #[test]
    fn test_invalid_latitude_rejected() {
        let err = Observer::from_json_str(r#"{ "position": { "latitude": 91.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = Observer::from_json_str("{ position: 3 ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "position": {{ "latitude": 40.0, "longitude": -105.0, "height": 1600.0 }} }}"#
        )
        .unwrap();

        let observer = Observer::from_json_file(file.path()).unwrap();
        assert_eq!(observer.position.height, 1600.0);

        let missing = Observer::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(missing, ConfigError::FileError { .. }));
    }

    #[test]
    fn test_refraction_raises_altitude() {
        let observer = Observer::default();
        assert!(observer.apparent_altitude(10.0) > 10.0);
    }

    #[test]
    fn test_saemundsson_observer_below_horizon() {
        let observer = Observer {
            refraction: RefractionModel::Saemundsson,
            ..Observer::default()
        };
        for altitude in [-5.11, -5.05, -30.0] {
            assert_eq!(observer.apparent_altitude(altitude), altitude);
        }
        assert!(observer.apparent_altitude(-5.0).is_finite());
    }
}
