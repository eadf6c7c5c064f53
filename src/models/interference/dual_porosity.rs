//! Warren–Root dual-porosity transfer function.

use num_complex::Complex64;

use crate::support::hyperbolic::tanh_stable;

/// Tolerance below which λ is treated as zero.
const LAMBDA_TOLERANCE: f64 = 1e-12;

/// Tolerance below which 1 − ω is treated as zero.
const OMEGA_TOLERANCE: f64 = 1e-6;

/// Floor on |s| before taking complex square roots.
const S_FLOOR: f64 = 1e-20;

/// Evaluates the slab-geometry transfer function
///
/// ```text
/// f(s) = ω + sqrt(λ(1−ω)/3s) · tanh(sqrt(3(1−ω)s/λ))
/// ```
///
/// coupling matrix storage to the natural-fracture system. Degenerates to
/// exactly 1 (single porosity) when λ vanishes or ω reaches 1 within fixed
/// tolerances. Total for every complex `s` with non-negative real part:
/// the hyperbolic tangent saturates instead of overflowing and |s| is
/// floored before the square roots.
pub(super) fn transfer(s: Complex64, omega: f64, lambda: f64) -> Complex64 {
    if lambda.abs() < LAMBDA_TOLERANCE || (1.0 - omega).abs() < OMEGA_TOLERANCE {
        return Complex64::new(1.0, 0.0);
    }

    let s = if s.norm() > S_FLOOR {
        s
    } else {
        Complex64::new(S_FLOOR, 0.0)
    };

    let storage = (lambda * (1.0 - omega) / 3.0).sqrt();
    let exchange = (3.0 * (1.0 - omega) / lambda).sqrt();
    omega + storage / s.sqrt() * tanh_stable(exchange * s.sqrt())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    use super::*;

    #[test]
    fn single_porosity_degenerates_to_one() {
        let samples = [
            Complex64::new(1e-6, 0.0),
            Complex64::new(1.0, 2.0),
            Complex64::new(1e8, -3.0),
            Complex64::new(0.0, 5.0),
        ];
        for s in samples {
            assert_eq!(transfer(s, 1.0, 0.5), Complex64::new(1.0, 0.0));
            assert_eq!(transfer(s, 0.1, 0.0), Complex64::new(1.0, 0.0));
        }
    }

    #[test]
    fn approaches_one_at_small_s() {
        // tanh(x) → x for small x, so f(s) → ω + (1 − ω) = 1.
        let f = transfer(Complex64::new(1e-12, 0.0), 0.1, 1e-4);
        assert_relative_eq!(f.re, 1.0, max_relative = 1e-3);
        assert_relative_eq!(f.im, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn approaches_omega_at_large_s() {
        // The matrix stops feeding the fractures at high frequency.
        let omega = 0.2;
        let f = transfer(Complex64::new(1e12, 0.0), omega, 1e-4);
        assert_relative_eq!(f.re, omega, max_relative = 1e-3);
    }

    #[test]
    fn total_on_the_closed_right_half_plane() {
        for &re in &[0.0, 1e-18, 1e-3, 1.0, 1e6, 1e18] {
            for &im in &[-1e9, -1.0, 0.0, 1.0, 1e9] {
                let f = transfer(Complex64::new(re, im), 0.05, 1e-7);
                assert!(f.re.is_finite() && f.im.is_finite(), "f({re}, {im}) = {f}");
            }
        }
    }

    #[test]
    fn lies_between_omega_and_one_for_real_s() {
        let omega = 0.3;
        for &s in &[1e-6, 1e-3, 1.0, 1e3, 1e6] {
            let f = transfer(Complex64::new(s, 0.0), omega, 1e-5);
            assert!(f.re >= omega - 1e-9 && f.re <= 1.0 + 1e-9, "f({s}) = {f}");
            assert_relative_eq!(f.im, 0.0, epsilon = 1e-12);
        }
    }
}
