//! Sun and Moon position models
//!
//! Both models return the horizontal position for an observer together
//! with the equatorial coordinates of date that produced it.

pub mod moon;
pub mod sun;

pub use moon::{moon_days, moon_position};
pub use sun::sun_position;

use crate::coordinates::{AzAlt, RaDec};
use chrono::{DateTime, TimeZone};

/// Solar system bodies with a built-in position model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
}

impl Body {
    /// Get the body's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
        }
    }

    /// Horizontal and equatorial (Jnow) position seen from an observer
    pub fn position<Tz: TimeZone>(
        &self,
        latitude: f64,
        longitude: f64,
        dt: &DateTime<Tz>,
    ) -> (AzAlt, RaDec) {
        match self {
            Body::Sun => sun_position(latitude, longitude, dt),
            Body::Moon => moon_position(latitude, longitude, dt),
        }
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::utc_datetime;

    #[test]
    fn test_body_dispatch() {
        let dt = utc_datetime(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(Body::Sun.position(10.0, 20.0, &dt), sun_position(10.0, 20.0, &dt));
        assert_eq!(Body::Moon.position(10.0, 20.0, &dt), moon_position(10.0, 20.0, &dt));
        assert_eq!(Body::Moon.to_string(), "Moon");
    }
}
