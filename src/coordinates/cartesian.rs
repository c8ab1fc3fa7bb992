//! # Cartesian Coordinate System Module
//!
//! A 3D Cartesian vector used by the ephemeris and the velocity
//! corrections, and as the intermediate form for frame rotations.
//!
//! ## Coordinate System Convention
//!
//! - **X-axis**: Points toward the vernal equinox (RA = 0h, Dec = 0°)
//! - **Y-axis**: Points toward RA = 6h, Dec = 0°
//! - **Z-axis**: Points toward the north celestial pole (Dec = +90°)
//!
//! The same type carries positions (AU), velocities (AU/day or km/s) and
//! dimensionless direction cosines. The interpretation depends on context.
//!
//! ```rust
//! use radiosky::coordinates::cartesian::Cartesian3;
//!
//! let vernal_equinox = Cartesian3::new(1.0, 0.0, 0.0);
//! let north_pole = Cartesian3::new(0.0, 0.0, 1.0);
//! assert_eq!(vernal_equinox.dot(&north_pole), 0.0);
//! ```

use nalgebra::{Matrix3, Vector3};

/// Three-dimensional Cartesian vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cartesian3 {
    /// X-component (toward vernal equinox)
    pub x: f64,
    /// Y-component (toward RA = 6h)
    pub y: f64,
    /// Z-component (toward north celestial pole)
    pub z: f64,
}

impl Cartesian3 {
    /// Creates a new Cartesian vector
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Cartesian3 { x, y, z }
    }

    /// Creates a vector from spherical coordinates
    ///
    /// # Arguments
    ///
    /// * `lon` - Longitude-like angle (e.g. right ascension) in radians
    /// * `lat` - Latitude-like angle (e.g. declination) in radians
    /// * `distance` - Distance from origin (1.0 for unit vectors)
    ///
    /// # Mathematical Conversion
    ///
    /// - `x = distance * cos(lat) * cos(lon)`
    /// - `y = distance * cos(lat) * sin(lon)`
    /// - `z = distance * sin(lat)`
    pub fn from_spherical(lon: f64, lat: f64, distance: f64) -> Self {
        let cos_lat = lat.cos();
        Cartesian3 {
            x: distance * cos_lat * lon.cos(),
            y: distance * cos_lat * lon.sin(),
            z: distance * lat.sin(),
        }
    }

    /// Converts to spherical coordinates `(lon, lat, distance)`
    ///
    /// Longitude is in radians `[0, 2π)` and resolved with `atan2`, latitude
    /// in radians `[-π/2, π/2]`. The zero vector maps to `(0, 0, 0)` and a
    /// vector on the polar axis has longitude 0.
    pub fn to_spherical(&self) -> (f64, f64, f64) {
        let distance = self.magnitude();

        if distance == 0.0 {
            return (0.0, 0.0, 0.0);
        }

        let r_xy = (self.x * self.x + self.y * self.y).sqrt();
        let lat = self.z.atan2(r_xy);
        let lon = if self.x == 0.0 && self.y == 0.0 {
            0.0
        } else {
            self.y.atan2(self.x).rem_euclid(std::f64::consts::TAU)
        };

        (lon, lat, distance)
    }

    /// Euclidean length
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Dot product
    ///
    /// With a unit `other` this is the component of `self` along `other`,
    /// which is how the line-of-sight velocity corrections are formed.
    pub fn dot(&self, other: &Cartesian3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Apply a rotation (or any linear map) to this vector
    pub fn rotate(&self, matrix: &Matrix3<f64>) -> Cartesian3 {
        Cartesian3::from_vector3(matrix * self.to_vector3())
    }

    /// Converts to nalgebra Vector3
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from nalgebra Vector3
    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Cartesian3::new(vec.x, vec.y, vec.z)
    }
}

impl std::ops::Add for Cartesian3 {
    type Output = Cartesian3;

    fn add(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Sub for Cartesian3 {
    type Output = Cartesian3;

    fn sub(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Mul<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn mul(self, scalar: f64) -> Cartesian3 {
        Cartesian3::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_from_spherical_poles_and_equinox() {
        let north_pole = Cartesian3::from_spherical(0.0, PI / 2.0, 1.0);
        assert_relative_eq!(north_pole.z, 1.0, epsilon = 1e-15);
        assert!(north_pole.x.abs() < 1e-15);

        let equinox = Cartesian3::from_spherical(0.0, 0.0, 2.0);
        assert_eq!(equinox, Cartesian3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_spherical_roundtrip_all_quadrants() {
        for &lon_deg in &[10.0_f64, 100.0, 190.0, 280.0] {
            for &lat_deg in &[-60.0_f64, 0.0, 45.0] {
                let v = Cartesian3::from_spherical(lon_deg.to_radians(), lat_deg.to_radians(), 3.0);
                let (lon, lat, r) = v.to_spherical();
                assert_relative_eq!(lon.to_degrees(), lon_deg, epsilon = 1e-9);
                assert_relative_eq!(lat.to_degrees(), lat_deg, epsilon = 1e-9);
                assert_relative_eq!(r, 3.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_zero_vector_to_spherical() {
        assert_eq!(Cartesian3::default().to_spherical(), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_vector_ops() {
        let a = Cartesian3::new(1.0, 2.0, 3.0);
        let b = Cartesian3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Cartesian3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Cartesian3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Cartesian3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(&b), 32.0);
        assert_relative_eq!(Cartesian3::new(3.0, 4.0, 0.0).magnitude(), 5.0);
    }

    #[test]
    fn test_rotate_about_z() {
        let quarter_turn = Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        let v = Cartesian3::new(1.0, 0.0, 0.0).rotate(&quarter_turn);
        assert_relative_eq!(v.y, 1.0);
        assert_relative_eq!(v.x, 0.0);
    }

    #[test]
    fn test_vector3_roundtrip() {
        let c = Cartesian3::new(1.5, -2.5, 3.5);
        assert_eq!(Cartesian3::from_vector3(c.to_vector3()), c);
    }
}
