//! Poisson series evaluation for the Earth ephemeris
//!
//! Each coordinate is a sum over `T^n * a * cos(b + c*T)` for n = 0, 1, 2.
//! Position and its analytic derivative with respect to T are accumulated
//! together, term by term.

/// One periodic term of the series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesTerm {
    /// Amplitude in AU
    pub amplitude: f64,
    /// Phase at J2000 in radians
    pub phase: f64,
    /// Angular frequency in radians per Julian year
    pub frequency: f64,
}

impl SeriesTerm {
    pub const fn new(amplitude: f64, phase: f64, frequency: f64) -> Self {
        SeriesTerm {
            amplitude,
            phase,
            frequency,
        }
    }

    /// Value and T-derivative of `t^power * a * cos(b + c*t)`
    ///
    /// Only powers 0, 1 and 2 occur in the tables. The derivative is per
    /// Julian year.
    pub fn evaluate(&self, t: f64, power: usize) -> (f64, f64) {
        let a = self.amplitude;
        let c = self.frequency;
        let (st, ct) = (self.phase + c * t).sin_cos();

        match power {
            0 => (a * ct, -a * c * st),
            1 => (a * t * ct, a * (ct - c * t * st)),
            _ => (a * t * t * ct, a * t * (2.0 * ct - c * t * st)),
        }
    }
}

/// Table groups indexed `[power][axis]`
pub type SeriesTables = [[&'static [SeriesTerm]; 3]; 3];

/// Sum one axis of a table set at `t` Julian years from J2000
///
/// Returns `(value, derivative)` with the derivative per Julian year.
/// The smallest terms sit at the end of each table and are summed first.
pub fn sum_axis(tables: &SeriesTables, axis: usize, t: f64) -> (f64, f64) {
    let mut value = 0.0;
    let mut rate = 0.0;
    for (power, group) in tables.iter().enumerate() {
        for term in group[axis].iter().rev() {
            let (v, r) = term.evaluate(t, power);
            value += v;
            rate += r;
        }
    }
    (value, rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    static CONSTANT: [SeriesTerm; 1] = [SeriesTerm::new(2.0, 0.0, 0.0)];
    static LINEAR: [SeriesTerm; 1] = [SeriesTerm::new(0.5, 0.0, 0.0)];
    static WAVE: [SeriesTerm; 1] = [SeriesTerm::new(1.0, 0.3, 6.0)];
    static EMPTY: [SeriesTerm; 0] = [];

    static TABLES: SeriesTables = [
        [&CONSTANT, &WAVE, &EMPTY],
        [&LINEAR, &EMPTY, &EMPTY],
        [&EMPTY, &EMPTY, &EMPTY],
    ];

    #[test]
    fn test_polynomial_terms() {
        // 2 + 0.5 t
        let (v, r) = sum_axis(&TABLES, 0, 3.0);
        assert_relative_eq!(v, 3.5);
        assert_relative_eq!(r, 0.5);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let terms = [
            SeriesTerm::new(0.3, 1.1, 6.283),
            SeriesTerm::new(1e-3, 0.2, 0.5),
            SeriesTerm::new(4e-6, 2.9, 12.56),
        ];
        let h = 1e-6;
        for power in 0..3 {
            for term in &terms {
                let t = 0.37;
                let (_, r) = term.evaluate(t, power);
                let (vp, _) = term.evaluate(t + h, power);
                let (vm, _) = term.evaluate(t - h, power);
                assert_relative_eq!(r, (vp - vm) / (2.0 * h), epsilon = 1e-8);
            }
        }
    }

    #[test]
    fn test_empty_axis_is_zero() {
        assert_eq!(sum_axis(&TABLES, 2, 10.0), (0.0, 0.0));
        let (v, _) = sum_axis(&TABLES, 1, 0.0);
        assert_relative_eq!(v, 0.3_f64.cos());
    }
}
