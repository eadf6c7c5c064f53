//! Overflow-guarded complex hyperbolic functions.
//!
//! Laplace-space trilinear solutions evaluate `tanh` and `sinh` of
//! square-rooted Laplace arguments. At early dimensionless times the real
//! part of those arguments grows far past the point where `e^x` overflows,
//! while the functions themselves are already saturated (tanh) or dominated
//! by a single exponential (sinh). The tanh guard is total; the sinh guard
//! extends the usable range to the f64 exponential limit, past which
//! callers dividing by it must treat the quotient as fully decayed.

use num_complex::Complex64;

/// Real part beyond which `tanh` is indistinguishable from ±1 in f64.
const SATURATION_THRESHOLD: f64 = 20.0;

/// Complex hyperbolic tangent, saturated to ±1 for large real parts.
pub fn tanh_stable(z: Complex64) -> Complex64 {
    if z.re > SATURATION_THRESHOLD {
        return Complex64::new(1.0, 0.0);
    }
    if z.re < -SATURATION_THRESHOLD {
        return Complex64::new(-1.0, 0.0);
    }
    z.tanh()
}

/// Complex hyperbolic sine, reduced to `e^z / 2` for large real parts.
///
/// Still overflows to infinity once `e^z` does, near `Re(z) ≈ 710`;
/// callers dividing by the result clamp their quotient to zero beyond
/// that point.
pub fn sinh_stable(z: Complex64) -> Complex64 {
    if z.re > SATURATION_THRESHOLD {
        return 0.5 * z.exp();
    }
    z.sinh()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    use super::*;

    #[test]
    fn matches_tanh_for_moderate_arguments() {
        let z = Complex64::new(1.3, 0.4);
        let expected = z.tanh();
        let actual = tanh_stable(z);
        assert_relative_eq!(actual.re, expected.re, max_relative = 1e-14);
        assert_relative_eq!(actual.im, expected.im, max_relative = 1e-14);
    }

    #[test]
    fn saturates_past_threshold() {
        assert_eq!(
            tanh_stable(Complex64::new(500.0, 3.0)),
            Complex64::new(1.0, 0.0)
        );
        assert_eq!(
            tanh_stable(Complex64::new(-500.0, 3.0)),
            Complex64::new(-1.0, 0.0)
        );
    }

    #[test]
    fn sinh_stays_finite_for_large_arguments() {
        let z = Complex64::new(400.0, 0.0);
        let v = sinh_stable(z);
        assert!(v.re.is_finite());
        assert!(v.im.is_finite());
    }

    #[test]
    fn sinh_matches_for_moderate_arguments() {
        let z = Complex64::new(0.7, -0.2);
        let expected = z.sinh();
        let actual = sinh_stable(z);
        assert_relative_eq!(actual.re, expected.re, max_relative = 1e-14);
        assert_relative_eq!(actual.im, expected.im, max_relative = 1e-14);
    }
}
