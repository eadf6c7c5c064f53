//! Laplace-space assembly and solve of the coupled multiwell system.
//!
//! For `n` wells the system carries `2n` complex unknowns: the first `n`
//! are dimensionless well pressures, the last `n` are average pressures of
//! each well's stimulated volume. Per well, the fracture couples to its own
//! stimulated volume, and the stimulated volume couples back to the well
//! and, through the outer reservoir, to the stimulated volumes of the
//! adjacent laterals. Interference therefore never appears as ad hoc index
//! arithmetic: it is read off an explicit [`InterferenceMap`] built from
//! the pad ordering, and a well with no neighbours gets no interference
//! entries at all.
//!
//! A solve either converges or degrades to an explicit zero-vector
//! fallback tagged with the [`NumericalError`] that caused it. The caller
//! decides what to do with degraded contributions; nothing is silently
//! dropped.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;
use thiserror::Error;

use super::{
    dimensionless::{EPSILON, WellScales},
    dual_porosity,
};
use crate::support::hyperbolic::{sinh_stable, tanh_stable};

/// A numerical failure local to one `(time, node)` solve.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum NumericalError {
    /// LU factorization found the system singular.
    #[error("Laplace system is singular at s = {s}")]
    SingularSystem {
        /// The Laplace variable at which the solve failed.
        s: Complex64,
    },

    /// The solve produced non-finite entries.
    #[error("Laplace solution is non-finite at s = {s}")]
    NonFiniteSolution {
        /// The Laplace variable at which the solve failed.
        s: Complex64,
    },
}

/// One Laplace-domain source: a unit-step rate applied to one well.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceTerm {
    /// Index of the sourced well in pad order.
    pub well: usize,

    /// Step amplitude in dimensionless rate units.
    pub strength: f64,

    /// Start delay in dimensionless time; enters the right-hand side as
    /// `e^(−s·delay) / s`.
    pub delay: f64,
}

impl SourceTerm {
    /// A unit-strength step at `well` with no delay.
    pub fn unit(well: usize) -> Self {
        Self {
            well,
            strength: 1.0,
            delay: 0.0,
        }
    }
}

/// Outcome of one Laplace-space solve.
///
/// Both variants carry the `n` dimensionless well pressures; the degraded
/// variant's vector is all zeros and names the failure that forced the
/// fallback.
#[derive(Debug, Clone, PartialEq)]
pub enum SystemSolution {
    /// The solve converged.
    Converged(DVector<Complex64>),

    /// The solve failed and a zero response was substituted.
    Degraded {
        /// Zero well-pressure vector standing in for the failed solve.
        vector: DVector<Complex64>,
        /// What went wrong.
        reason: NumericalError,
    },
}

impl SystemSolution {
    /// The dimensionless well-pressure vector, zero if degraded.
    pub fn well_pressures(&self) -> &DVector<Complex64> {
        match self {
            SystemSolution::Converged(vector) => vector,
            SystemSolution::Degraded { vector, .. } => vector,
        }
    }

    /// Whether this solve fell back to the zero vector.
    pub fn is_degraded(&self) -> bool {
        matches!(self, SystemSolution::Degraded { .. })
    }
}

/// Nearest-neighbour gaps of the pad, in dimensionless distance.
///
/// Wells are an ordered row; entry `i` is the gap between wells `i` and
/// `i + 1`, taken as the mean of their drainage widths. Boundary wells have
/// a single neighbour, a lone well has none.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct InterferenceMap {
    gaps: Vec<f64>,
}

impl InterferenceMap {
    pub(super) fn new(wells: &[WellScales]) -> Self {
        let gaps = wells
            .windows(2)
            .map(|pair| 0.5 * (pair[0].spacing + pair[1].spacing))
            .collect();
        Self { gaps }
    }

    /// Neighbour indices of well `i` with their gaps.
    fn neighbours(&self, i: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let left = i
            .checked_sub(1)
            .and_then(|j| self.gaps.get(j).map(|&gap| (j, gap)));
        let right = self.gaps.get(i).map(|&gap| (i + 1, gap));
        left.into_iter().chain(right)
    }
}

/// Assembled complex system for one Laplace variable.
///
/// Valid only for the `s` and well configuration it was built from;
/// discarded after solving.
#[derive(Debug, Clone)]
pub(super) struct LaplaceSystem {
    matrix: DMatrix<Complex64>,
    rhs: DVector<Complex64>,
    wells: usize,
    s: Complex64,
}

/// Real argument past which the 1/sinh coupling is clamped to zero.
///
/// `e^z` overflows to infinity near `z ≈ 710` and dividing by it turns the
/// coupling into NaN instead of the vanishing value it represents.
const DECOUPLING_THRESHOLD: f64 = 700.0;

/// Outer-reservoir transmissibility between two stimulated volumes a
/// dimensionless gap apart.
///
/// The 1/sinh form decays monotonically with the gap; once the exponent
/// passes the f64 overflow limit the coupling is an exact zero, so distant
/// laterals and very early times decouple cleanly instead of poisoning the
/// matrix.
fn neighbour_transmissibility(u: Complex64, gap: f64) -> Complex64 {
    let root = u.sqrt();
    let argument = 2.0 * root * gap;
    if argument.re > DECOUPLING_THRESHOLD {
        return Complex64::new(0.0, 0.0);
    }
    root / (2.0 * sinh_stable(argument) + EPSILON)
}

/// Builds the `2n × 2n` system for the given wells and sources.
pub(super) fn assemble(
    s: Complex64,
    wells: &[WellScales],
    map: &InterferenceMap,
    sources: &[SourceTerm],
) -> LaplaceSystem {
    let n = wells.len();
    let mut matrix = DMatrix::<Complex64>::zeros(2 * n, 2 * n);
    let mut rhs = DVector::<Complex64>::zeros(2 * n);

    // Local Laplace variables u_I = s_I · f(s_I) per well.
    let u: Vec<Complex64> = wells
        .iter()
        .map(|well| {
            let s_local = s / (well.diffusivity_ratio + EPSILON);
            let f = dual_porosity::transfer(
                s_local,
                well.storativity_ratio,
                well.interporosity_coefficient,
            );
            s_local * f
        })
        .collect();

    let mut resistance = vec![Complex64::default(); n];

    for (i, well) in wells.iter().enumerate() {
        let couplings: Vec<(usize, Complex64)> = map
            .neighbours(i)
            .map(|(j, gap)| (j, neighbour_transmissibility(0.5 * (u[i] + u[j]), gap)))
            .collect();

        // Outer-reservoir sink, augmented by neighbour transmissibility.
        let alpha_outer = u[i]
            + couplings
                .iter()
                .map(|&(_, gamma)| gamma)
                .sum::<Complex64>();
        let root_outer = alpha_outer.sqrt();

        let beta = root_outer * tanh_stable(root_outer);
        let gamma_fracture =
            2.0 * beta / (well.conductivity * well.spacing * well.half_length + EPSILON);
        let alpha_fracture = gamma_fracture + s;

        let srv_coupling = gamma_fracture / (alpha_fracture * alpha_outer + EPSILON);
        let feedback = tanh_stable(root_outer) / (root_outer + EPSILON);

        // Well-pressure row.
        matrix[(i, i)] = Complex64::new(1.0, 0.0);
        matrix[(i, n + i)] = -srv_coupling;
        for &(j, gamma) in &couplings {
            matrix[(i, n + j)] = -srv_coupling * gamma;
        }

        // Stimulated-volume average row.
        matrix[(n + i, n + i)] = Complex64::new(1.0, 0.0);
        matrix[(n + i, i)] = -feedback;
        for &(j, gamma) in &couplings {
            matrix[(n + i, n + j)] = -gamma;
        }

        let root_fracture = alpha_fracture.sqrt();
        resistance[i] = std::f64::consts::PI
            / (well.num_fractures
                * well.conductivity
                * well.half_length
                * root_fracture
                * tanh_stable(root_fracture * well.half_length)
                + EPSILON)
            + well.choking_skin;
    }

    for source in sources {
        let step = (-s * source.delay).exp() / s;
        rhs[source.well] += resistance[source.well] * source.strength * step;
    }

    LaplaceSystem {
        matrix,
        rhs,
        wells: n,
        s,
    }
}

impl LaplaceSystem {
    /// Solves the system, returning the `n` well-pressure unknowns.
    ///
    /// A singular or non-finite solve degrades to a tagged zero vector
    /// instead of failing the run.
    pub(super) fn solve(self) -> SystemSolution {
        let n = self.wells;
        let s = self.s;
        let lu = self.matrix.lu();
        match lu.solve(&self.rhs) {
            Some(solution) => {
                let finite = solution
                    .iter()
                    .all(|value| value.re.is_finite() && value.im.is_finite());
                if finite {
                    SystemSolution::Converged(solution.rows(0, n).into_owned())
                } else {
                    SystemSolution::Degraded {
                        vector: DVector::zeros(n),
                        reason: NumericalError::NonFiniteSolution { s },
                    }
                }
            }
            None => SystemSolution::Degraded {
                vector: DVector::zeros(n),
                reason: NumericalError::SingularSystem { s },
            },
        }
    }

    #[cfg(test)]
    pub(super) fn matrix(&self) -> &DMatrix<Complex64> {
        &self.matrix
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;
    use num_complex::Complex64;

    use super::*;
    use crate::models::interference::WellId;

    fn scales(spacing: f64) -> WellScales {
        WellScales {
            well_id: WellId(1),
            conductivity: 100.0,
            diffusivity_ratio: 1.0,
            half_length: 1.0,
            spacing,
            thickness: 0.5,
            wellbore_radius: 0.0015,
            num_fractures: 25.0,
            choking_skin: 0.01,
            storativity_ratio: 1.0,
            interporosity_coefficient: 0.0,
            wellbore_storage: 0.0,
        }
    }

    #[test]
    fn single_well_has_no_interference_entries() {
        let wells = vec![scales(3.0)];
        let map = InterferenceMap::new(&wells);
        let s = Complex64::new(5.0, 0.0);
        let system = assemble(s, &wells, &map, &[SourceTerm::unit(0)]);

        let a = system.matrix();
        assert_eq!(a.nrows(), 2);
        // Diagonal and the two fracture/SRV couplings only.
        assert_eq!(a[(0, 0)], Complex64::new(1.0, 0.0));
        assert_eq!(a[(1, 1)], Complex64::new(1.0, 0.0));
        assert!(a[(0, 1)].norm() > 0.0);
        assert!(a[(1, 0)].norm() > 0.0);
    }

    #[test]
    fn single_well_matches_direct_elimination() {
        // With one well the 2×2 system eliminates by hand:
        //   p_w = r/s / (1 − c·ε)
        let wells = vec![scales(3.0)];
        let map = InterferenceMap::new(&wells);
        let s = Complex64::new(8.0, 0.0);

        let solution = assemble(s, &wells, &map, &[SourceTerm::unit(0)]).solve();
        let SystemSolution::Converged(p) = solution else {
            panic!("single-well solve should converge");
        };

        let system = assemble(s, &wells, &map, &[SourceTerm::unit(0)]);
        let a = system.matrix();
        let c = -a[(0, 1)];
        let eps = -a[(1, 0)];
        let r = system.rhs[0];
        let expected = r / (Complex64::new(1.0, 0.0) - c * eps);

        assert_relative_eq!(p[0].re, expected.re, max_relative = 1e-9);
        assert_relative_eq!(p[0].im, expected.im, epsilon = 1e-12);
    }

    #[test]
    fn single_well_response_is_positive_for_real_s() {
        let wells = vec![scales(3.0)];
        let map = InterferenceMap::new(&wells);
        for &s in &[0.5, 5.0, 50.0, 500.0] {
            let solution =
                assemble(Complex64::new(s, 0.0), &wells, &map, &[SourceTerm::unit(0)]).solve();
            let p = solution.well_pressures();
            assert!(p[0].re > 0.0, "p_wD({s}) = {}", p[0].re);
        }
    }

    #[test]
    fn neighbour_transmissibility_decays_with_gap() {
        let u = Complex64::new(0.05, 0.0);
        let close = neighbour_transmissibility(u, 1.0).norm();
        let mid = neighbour_transmissibility(u, 3.0).norm();
        let far = neighbour_transmissibility(u, 10.0).norm();
        assert!(close > mid && mid > far);

        // Distant laterals decouple to an exact zero.
        let detached = neighbour_transmissibility(Complex64::new(4.0, 0.0), 1e4).norm();
        assert_eq!(detached, 0.0);
    }

    #[test]
    fn early_time_multiwell_pad_decouples_cleanly() {
        // Large s pushes the coupling exponent past the overflow limit;
        // the pad must fall apart into independent wells, not NaN.
        let wells = vec![scales(3.0), scales(3.0)];
        let map = InterferenceMap::new(&wells);
        let s = Complex64::new(1e6, 0.0);

        let solution = assemble(s, &wells, &map, &[SourceTerm::unit(0)]).solve();
        assert!(!solution.is_degraded());

        let p = solution.well_pressures();
        assert!(p[0].re.is_finite() && p[0].re > 0.0);
        assert_eq!(p[1], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn observer_well_sees_interference() {
        let wells = vec![scales(2.0), scales(2.0)];
        let map = InterferenceMap::new(&wells);
        let s = Complex64::new(0.05, 0.0);
        let solution = assemble(s, &wells, &map, &[SourceTerm::unit(0)]).solve();
        let p = solution.well_pressures();
        assert!(p[0].re > 0.0);
        assert!(p[1].re > 0.0, "observer should see drawdown, got {}", p[1].re);
        assert!(p[1].re < p[0].re);
    }

    #[test]
    fn source_delay_shifts_the_step() {
        let wells = vec![scales(3.0)];
        let map = InterferenceMap::new(&wells);
        let s = Complex64::new(2.0, 0.0);
        let delay = 0.7;

        let prompt = assemble(s, &wells, &map, &[SourceTerm::unit(0)]).solve();
        let delayed = assemble(
            s,
            &wells,
            &map,
            &[SourceTerm {
                well: 0,
                strength: 1.0,
                delay,
            }],
        )
        .solve();

        let shift = (-s * delay).exp();
        assert_relative_eq!(
            delayed.well_pressures()[0].re,
            (prompt.well_pressures()[0] * shift).re,
            max_relative = 1e-9
        );
    }

    #[test]
    fn singular_system_degrades_with_reason() {
        let s = Complex64::new(1.0, 0.0);
        let system = LaplaceSystem {
            matrix: DMatrix::zeros(2, 2),
            rhs: nalgebra::DVector::from_element(2, Complex64::new(1.0, 0.0)),
            wells: 1,
            s,
        };
        let solution = system.solve();
        assert!(solution.is_degraded());
        assert_eq!(solution.well_pressures()[0], Complex64::default());
        let SystemSolution::Degraded { reason, .. } = solution else {
            unreachable!()
        };
        assert!(matches!(reason, NumericalError::SingularSystem { .. }));
    }
}
