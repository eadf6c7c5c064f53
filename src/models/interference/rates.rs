//! Rate reconstruction for wells produced against a constant bottomhole
//! pressure.
//!
//! The pressure run treats rates as known; this module inverts the
//! relationship. In Laplace space the pad is linear, so by Duhamel's
//! principle the pressure transform at each constrained well is
//! `s · R(s) · q̂`, where the columns of the influence matrix `R(s)` are
//! unit-step responses. Solving that system against the constant-drawdown
//! transform per Stehfest node and inverting yields each well's rate
//! history under its pressure target, interference included.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;

use super::{
    dimensionless::{ReservoirScales, WellScales},
    laplace::{self, InterferenceMap, SourceTerm},
    results::Diagnostics,
};
use crate::support::stehfest::Stehfest;

/// One constant-pressure constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct RateTarget {
    /// Pad index of the constrained well.
    pub well: usize,
    /// Drawdown held at the sand face, psi.
    pub drawdown_psi: f64,
    /// Time the constraint engages, days.
    pub start_days: f64,
}

pub(super) struct RateEngine<'a> {
    scales: &'a ReservoirScales,
    wells: &'a [WellScales],
    map: InterferenceMap,
    inverter: &'a Stehfest,
    targets: Vec<RateTarget>,
}

impl<'a> RateEngine<'a> {
    pub(super) fn new(
        scales: &'a ReservoirScales,
        wells: &'a [WellScales],
        inverter: &'a Stehfest,
        targets: Vec<RateTarget>,
    ) -> Self {
        Self {
            scales,
            wells,
            map: InterferenceMap::new(wells),
            inverter,
            targets,
        }
    }

    /// Rate history in STB/D for each target over the grid.
    ///
    /// Rates are clamped at zero: a producer held below reservoir pressure
    /// does not backflow.
    pub(super) fn rates(&self, grid_days: &[f64]) -> (Vec<Vec<f64>>, Diagnostics) {
        let m = self.targets.len();
        let mut series = vec![vec![0.0; grid_days.len()]; m];
        let mut diagnostics = Diagnostics::default();
        if m == 0 {
            return (series, diagnostics);
        }

        let drawdowns: Vec<f64> = self
            .targets
            .iter()
            .map(|target| self.scales.drawdown_to_dimensionless(target.drawdown_psi))
            .collect();

        for (t_index, &t_days) in grid_days.iter().enumerate() {
            let t_dimensionless = self.scales.time_to_dimensionless(t_days);
            let mut accumulated = vec![0.0; m];

            for node in self.inverter.nodes(t_dimensionless) {
                let s = Complex64::new(node.s, 0.0);
                match self.node_rates(s, &drawdowns) {
                    Some(rates) => {
                        diagnostics.record(false);
                        for (slot, rate) in accumulated.iter_mut().zip(&rates) {
                            *slot += node.weight * rate.re;
                        }
                    }
                    None => diagnostics.record(true),
                }
            }

            let ln2_over_t = std::f64::consts::LN_2 / t_dimensionless;
            for (target_index, slot) in accumulated.iter().enumerate() {
                series[target_index][t_index] = (ln2_over_t * slot).max(0.0);
            }
        }

        (series, diagnostics)
    }

    /// Solves `s·R(s)·q̂ = Δp̂` for one Laplace node.
    ///
    /// Column `j` of the influence matrix is the pad's unit-step response
    /// to a source at target `j`, restricted to the constrained wells; the
    /// step already carries a `1/s`, so the constant-drawdown transform
    /// `Δp/s` lands on the right-hand side as `Δp/s²`. Returns `None` when
    /// any unit solve or the final solve fails.
    fn node_rates(&self, s: Complex64, drawdowns: &[f64]) -> Option<DVector<Complex64>> {
        let m = self.targets.len();
        let mut influence = DMatrix::<Complex64>::zeros(m, m);

        for (column, target) in self.targets.iter().enumerate() {
            let solution = laplace::assemble(
                s,
                self.wells,
                &self.map,
                &[SourceTerm::unit(target.well)],
            )
            .solve();
            if solution.is_degraded() {
                return None;
            }
            let pressures = solution.well_pressures();
            for (row, observer) in self.targets.iter().enumerate() {
                influence[(row, column)] = pressures[observer.well];
            }
        }

        let rhs = DVector::from_iterator(
            m,
            self.targets.iter().zip(drawdowns).map(|(target, &drawdown)| {
                let delay = self.scales.time_to_dimensionless(target.start_days);
                drawdown * (-s * delay).exp() / (s * s)
            }),
        );

        let solution = influence.lu().solve(&rhs)?;
        let finite = solution
            .iter()
            .all(|value| value.re.is_finite() && value.im.is_finite());
        finite.then_some(solution)
    }
}
