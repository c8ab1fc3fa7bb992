//! Integrated atmospheric refraction for optical and radio wavelengths
//!
//! The refraction integral is evaluated through a model atmosphere with a
//! polytropic troposphere up to 11 km and an isothermal stratosphere above
//! it to 80 km (Hohenkerk & Sinclair, NAO Technical Note 63, 1985), as in
//! the Starlink Positional Astronomy Library. Exact integration is used to
//! fit the two constants of a `tan z`/`tan^3 z` model, which is then
//! applied to the requested zenith distance.
//!
//! Wavelengths of 100 µm and longer take the radio refractivity formula.

use crate::constants::{DEG2RAD, RAD2DEG};
use crate::coordinates::angle::wrap_pi;
use log::debug;

/// 93 degrees in radians
const D93: f64 = 1.623156204;
/// Universal gas constant
const GCR: f64 = 8314.32;
/// Molecular weight of dry air
const DMD: f64 = 28.9644;
/// Molecular weight of water vapour
const DMW: f64 = 18.0152;
/// Mean Earth radius in metres
const EARTH_RADIUS_M: f64 = 6_378_120.0;
/// Exponent of the temperature dependence of water vapour pressure
const DELTA: f64 = 18.36;
/// Height of the tropopause in metres
const TROPOPAUSE_M: f64 = 11_000.0;
/// Upper limit for refractive effects in metres
const STRATOSPHERE_LIMIT_M: f64 = 80_000.0;
/// Simpson's rule strip count, start and cap
const INITIAL_STRIPS: usize = 8;
const MAX_STRIPS: usize = 16_384;
/// Newton iterations per radius solve
const MAX_RADIUS_STEPS: usize = 4;
/// Wavelength in µm at which the radio formula takes over
const RADIO_WAVELENGTH_UM: f64 = 100.0;

/// Sample zenith distances used to fit the model constants: atan(1), atan(4)
const ATN1: f64 = 0.785_398_163_397_448_3;
const ATN4: f64 = 1.325_817_663_668_033;

/// The refraction integrand
fn refi(dn: f64, rdndr: f64) -> f64 {
    rdndr / (dn + rdndr)
}

/// Refractive index `n` and `r dn/dr` at distance `r` from the Earth's centre
trait Layer {
    fn refractive_index(&self, r: f64) -> (f64, f64);
}

/// Polytropic troposphere
#[derive(Debug, Clone, Copy)]
struct Troposphere {
    r0: f64,
    t0: f64,
    alpha: f64,
    gamm2: f64,
    delm2: f64,
    c: [f64; 6],
}

impl Troposphere {
    /// Temperature at `r`, limited to 100-320 K
    fn temperature(&self, r: f64) -> f64 {
        (self.t0 - self.alpha * (r - self.r0)).clamp(100.0, 320.0)
    }
}

impl Layer for Troposphere {
    fn refractive_index(&self, r: f64) -> (f64, f64) {
        let [c1, c2, c3, c4, c5, c6] = self.c;
        let t = self.temperature(r);
        let tt0 = t / self.t0;
        let tt0gm2 = tt0.powf(self.gamm2);
        let tt0dm2 = tt0.powf(self.delm2);
        let dn = 1.0 + (c1 * tt0gm2 - (c2 - c5 / t) * tt0dm2) * tt0;
        let rdndr = r * (-c3 * tt0gm2 + (c4 - c6 / tt0) * tt0dm2);
        (dn, rdndr)
    }
}

/// Isothermal stratosphere above the tropopause at `rt`
#[derive(Debug, Clone, Copy)]
struct Stratosphere {
    rt: f64,
    tt: f64,
    dnt: f64,
    gamal: f64,
}

impl Layer for Stratosphere {
    fn refractive_index(&self, r: f64) -> (f64, f64) {
        let b = self.gamal / self.tt;
        let w = (self.dnt - 1.0) * (-b * (r - self.rt)).exp();
        (1.0 + w, -r * b * w)
    }
}

/// Zenith distance of the ray at radius `r` where its index is `dn`
fn ray_zenith_distance(sk0: f64, r: f64, dn: f64) -> f64 {
    let sine = sk0 / (r * dn);
    sine.atan2((1.0 - sine * sine).max(0.0).sqrt())
}

/// One integration segment: zenith distance range with its end integrands
struct Segment {
    z0: f64,
    z_end: f64,
    f_start: f64,
    f_end: f64,
    r_start: f64,
}

/// Simpson's rule over one layer, doubling the strips until two passes
/// agree to `tol` or the strip cap is reached
fn integrate_layer<L: Layer>(layer: &L, segment: &Segment, sk0: f64, tol: f64) -> f64 {
    let z_range = segment.z_end - segment.z0;

    // Guarantees at least two passes
    let mut previous = 1.0;
    let mut strips = INITIAL_STRIPS;
    let mut odd_sum = 0.0;
    let mut even_sum = 0.0;
    let mut step = 1;

    loop {
        let h = z_range / strips as f64;
        let mut r = segment.r_start;

        let mut i = 1;
        while i < strips {
            let sz = (segment.z0 + h * i as f64).sin();

            // Radius along the ray at this zenith distance, to the nearest metre
            if sz > 1e-20 {
                let w = sk0 / sz;
                let mut rg = r;
                let mut dr: f64 = 1.0e6;
                let mut iterations = 0;
                while dr.abs() > 1.0 && iterations < MAX_RADIUS_STEPS {
                    iterations += 1;
                    let (dn, rdndr) = layer.refractive_index(rg);
                    dr = (rg * dn - w) / (dn + rdndr);
                    rg -= dr;
                }
                r = rg;
            }

            let (dn, rdndr) = layer.refractive_index(r);
            let f = refi(dn, rdndr);

            // Even ordinates only need computing on the first pass
            if step == 1 && i % 2 == 0 {
                even_sum += f;
            } else {
                odd_sum += f;
            }
            i += step;
        }

        let estimate = h * (segment.f_start + 4.0 * odd_sum + 2.0 * even_sum + segment.f_end) / 3.0;

        if (estimate - previous).abs() > tol {
            if strips < MAX_STRIPS {
                previous = estimate;
                strips *= 2;
                even_sum += odd_sum;
                odd_sum = 0.0;
                step = 2;
                continue;
            }
            debug!(
                "Refraction integral not converged after {} strips (change {:e} > {:e})",
                strips,
                (estimate - previous).abs(),
                tol
            );
        }
        return estimate;
    }
}

/// Observer conditions for the integrated model, in the units it works in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PalConditions {
    /// Height of the observer above sea level, metres
    pub height: f64,
    /// Ambient temperature at the observer, Kelvin
    pub temperature: f64,
    /// Pressure at the observer, millibars
    pub pressure: f64,
    /// Relative humidity, 0-1
    pub relative_humidity: f64,
    /// Effective wavelength, micrometres
    pub wavelength: f64,
    /// Latitude of the observer, radians
    pub latitude: f64,
    /// Tropospheric lapse rate, K/m
    pub lapse_rate: f64,
}

impl PalConditions {
    /// Refraction in radians for observed zenith distance `zobs` (radians)
    ///
    /// `eps` is the precision required at the end of the integration.
    /// Inputs are limited to safe ranges before use and zenith distances
    /// beyond 93 degrees are treated as 93.
    pub fn refro(&self, zobs: f64, eps: f64) -> f64 {
        let zobs1 = wrap_pi(zobs);
        let zobs2 = zobs1.abs().min(D93);

        let hm = self.height.clamp(-1e3, STRATOSPHERE_LIMIT_M);
        let tdk = self.temperature.clamp(100.0, 500.0);
        let pmb = self.pressure.clamp(0.0, 10_000.0);
        let rh = self.relative_humidity.clamp(0.0, 1.0);
        let wl = self.wavelength.max(0.1);
        let alpha = self.lapse_rate.abs().clamp(0.001, 0.01);

        let tol = eps.abs().clamp(1e-12, 0.1) / 2.0;

        let optic = wl < RADIO_WAVELENGTH_UM;

        let wlsq = wl * wl;
        let gb = 9.784 * (1.0 - 0.0026 * (2.0 * self.latitude).cos() - 0.000_000_28 * hm);
        let a = if optic {
            (287.6155 + (1.62887 + 0.01360 / wlsq) / wlsq) * 273.15e-6 / 1013.25
        } else {
            77.6890e-6
        };
        let gamal = (gb * DMD) / GCR;
        let gamma = gamal / alpha;
        let gamm2 = gamma - 2.0;
        let delm2 = DELTA - 2.0;
        let tdc = tdk - 273.15;
        let psat = 10f64.powf((0.7859 + 0.03477 * tdc) / (1.0 + 0.00412 * tdc))
            * (1.0 + pmb * (4.5e-6 + 6.0e-10 * tdc * tdc));
        let pwo = if pmb > 0.0 {
            rh * psat / (1.0 - (1.0 - rh) * psat / pmb)
        } else {
            0.0
        };
        let w = pwo * (1.0 - DMW / DMD) * gamma / (DELTA - gamma);
        let c1 = a * (pmb + w) / tdk;
        let c2 = if optic {
            (a * w + 11.2684e-6 * pwo) / tdk
        } else {
            (a * w + 6.3938e-6 * pwo) / tdk
        };
        let c3 = (gamma - 1.0) * alpha * c1 / tdk;
        let c4 = (DELTA - 1.0) * alpha * c2 / tdk;
        let (c5, c6) = if optic {
            (0.0, 0.0)
        } else {
            let c5 = 375_463e-6 * pwo / tdk;
            (c5, c5 * delm2 * alpha / (tdk * tdk))
        };

        let r0 = EARTH_RADIUS_M + hm;
        let troposphere = Troposphere {
            r0,
            t0: tdk,
            alpha,
            gamm2,
            delm2,
            c: [c1, c2, c3, c4, c5, c6],
        };

        // At the observer
        let (dn0, rdndr0) = troposphere.refractive_index(r0);
        let sk0 = dn0 * r0 * zobs2.sin();
        let f0 = refi(dn0, rdndr0);

        // Top of the troposphere
        let rt = EARTH_RADIUS_M + TROPOPAUSE_M.max(hm);
        let tt = troposphere.temperature(rt);
        let (dnt, rdndrt) = troposphere.refractive_index(rt);
        let zt = ray_zenith_distance(sk0, rt, dnt);
        let ft = refi(dnt, rdndrt);

        // Bottom of the stratosphere
        let stratosphere = Stratosphere { rt, tt, dnt, gamal };
        let (dnts, rdndrp) = stratosphere.refractive_index(rt);
        let zts = ray_zenith_distance(sk0, rt, dnts);
        let fts = refi(dnts, rdndrp);

        // Top of the stratosphere
        let rs = EARTH_RADIUS_M + STRATOSPHERE_LIMIT_M;
        let (dns, rdndrs) = stratosphere.refractive_index(rs);
        let zs = ray_zenith_distance(sk0, rs, dns);
        let fs = refi(dns, rdndrs);

        let tropospheric = integrate_layer(
            &troposphere,
            &Segment {
                z0: zobs2,
                z_end: zt,
                f_start: f0,
                f_end: ft,
                r_start: r0,
            },
            sk0,
            tol,
        );
        let stratospheric = integrate_layer(
            &stratosphere,
            &Segment {
                z0: zts,
                z_end: zs,
                f_start: fts,
                f_end: fs,
                r_start: rt,
            },
            sk0,
            tol,
        );

        let refraction = tropospheric + stratospheric;
        if zobs1 < 0.0 {
            -refraction
        } else {
            refraction
        }
    }

    /// Fit the `tan z`/`tan^3 z` model to the integrated refraction
    pub fn refco(&self, eps: f64) -> RefractionConstants {
        let r1 = self.refro(ATN1, eps);
        let r2 = self.refro(ATN4, eps);
        RefractionConstants {
            a: (64.0 * r1 - r2) / 60.0,
            b: (r2 - 4.0 * r1) / 60.0,
        }
    }
}

/// Constants `A`, `B` of the model `dZ = A tan Z + B tan^3 Z` (radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefractionConstants {
    pub a: f64,
    pub b: f64,
}

impl RefractionConstants {
    /// Refracted (observed) zenith distance for unrefracted `zu`, radians
    ///
    /// Beyond 83 degrees an empirical high-zenith-distance model takes
    /// over, scaled to agree at 83; beyond 93 degrees the correction stops
    /// growing.
    pub fn refz(&self, zu: f64) -> f64 {
        const Z83: f64 = 83.0 * DEG2RAD;
        const C1: f64 = 0.55445;
        const C2: f64 = -0.01133;
        const C3: f64 = 0.00202;
        const C4: f64 = 0.28385;
        const C5: f64 = 0.02390;
        // High-ZD model prediction in degrees at 83
        const REF83: f64 = (C1 + C2 * 7.0 + C3 * 49.0) / (1.0 + C4 * 7.0 + C5 * 49.0);

        let (refa, refb) = (self.a, self.b);
        let zu1 = zu.min(Z83);

        let newton = |zl: f64| {
            let (s, c) = zl.sin_cos();
            let t = s / c;
            let tsq = t * t;
            let tcu = t * tsq;
            (refa * t + refb * tcu, 1.0 + (refa + 3.0 * refb * tsq) / (c * c))
        };

        let (num, den) = newton(zu1);
        let zl = zu1 - num / den;

        let (num, den) = newton(zl);
        let mut refraction = zu1 - zl + (zl - zu1 + num) / den;

        if zu > zu1 {
            let e = 90.0 - (zu * RAD2DEG).min(93.0);
            let e2 = e * e;
            refraction = (refraction / REF83) * (C1 + C2 * e + C3 * e2) / (1.0 + C4 * e + C5 * e2);
        }

        zu - refraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn mountain(wavelength: f64) -> PalConditions {
        PalConditions {
            height: 3456.7,
            temperature: 280.0,
            pressure: 678.9,
            relative_humidity: 0.9,
            wavelength,
            latitude: -0.3,
            lapse_rate: 0.006,
        }
    }

    #[test]
    fn test_refro_optical() {
        let r = mountain(0.55).refro(1.4, 1e-9);
        assert_abs_diff_eq!(r, 0.001_067_157_630_185_682_3, epsilon = 1e-12);
    }

    #[test]
    fn test_refro_radio() {
        let r = mountain(1000.0).refro(1.4, 1e-9);
        assert_abs_diff_eq!(r, 0.001_296_416_185_295_38, epsilon = 1e-12);
    }

    #[test]
    fn test_refro_is_odd_in_zenith_distance() {
        let c = mountain(0.55);
        assert_abs_diff_eq!(c.refro(-1.0, 1e-9), -c.refro(1.0, 1e-9), epsilon = 1e-15);
    }

    #[test]
    fn test_refro_survives_extreme_inputs() {
        let c = PalConditions {
            height: -5000.0,
            temperature: 10.0,
            pressure: -3.0,
            relative_humidity: 2.0,
            wavelength: 0.0,
            latitude: 0.0,
            lapse_rate: 0.0,
        };
        assert!(c.refro(1.0, 1e-10).is_finite());
        // Past the horizon is treated as 93 degrees
        let m = mountain(0.55);
        assert_eq!(m.refro(2.0, 1e-9), m.refro(D93, 1e-9));
    }

    #[test]
    fn test_strip_limit_returns_best_estimate() {
        // A zero tolerance cannot be met, so every layer stops at MAX_STRIPS
        for wavelength in [0.55, 1000.0] {
            let c = mountain(wavelength);
            let capped = c.refro(D93, 0.0);
            assert!(capped.is_finite());
            assert!(capped > 0.0);
            assert_abs_diff_eq!(capped, c.refro(D93, 1e-9), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_refz_zenith_and_cap() {
        let k = RefractionConstants {
            a: 0.00031241751928712497,
            b: -3.071223738438112e-07,
        };
        assert_eq!(k.refz(0.0), 0.0);
        // Below 83 the result is always smaller than the unrefracted value
        let z = 60.0 * DEG2RAD;
        assert!(k.refz(z) < z);
        // The correction is frozen at 93 degrees
        let at93 = 93.0 * DEG2RAD - k.refz(93.0 * DEG2RAD);
        let at100 = 100.0 * DEG2RAD - k.refz(100.0 * DEG2RAD);
        assert_abs_diff_eq!(at93, at100, epsilon = 1e-12);
    }
}
