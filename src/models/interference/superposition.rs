//! Time superposition of piecewise-constant rate schedules.
//!
//! Each rate breakpoint contributes a step change Δq evaluated at the time
//! elapsed since the breakpoint; the pad response at any time is the sum
//! of all active step responses, at every well. One Laplace solve per
//! (breakpoint, Stehfest node) yields the response of all wells at once,
//! so interference at non-producing observers falls out of the same solves
//! that price the producers.

use num_complex::Complex64;

use super::{
    dimensionless::{ReservoirScales, WellScales},
    laplace::{self, InterferenceMap, SourceTerm},
    results::Diagnostics,
};
use crate::support::stehfest::Stehfest;

/// Superposition state for one run: scales, assembled well parameters, and
/// per-well rate breakpoints in pad order.
pub(super) struct SuperpositionEngine<'a> {
    scales: &'a ReservoirScales,
    wells: &'a [WellScales],
    map: InterferenceMap,
    inverter: &'a Stehfest,
    /// Per-well `(time_days, rate_stb_per_day)` breakpoints.
    rate_steps: Vec<Vec<(f64, f64)>>,
}

impl<'a> SuperpositionEngine<'a> {
    pub(super) fn new(
        scales: &'a ReservoirScales,
        wells: &'a [WellScales],
        inverter: &'a Stehfest,
        rate_steps: Vec<Vec<(f64, f64)>>,
    ) -> Self {
        Self {
            scales,
            wells,
            map: InterferenceMap::new(wells),
            inverter,
            rate_steps,
        }
    }

    /// Pressure drop below initial pressure, psi, per well over the grid.
    ///
    /// Returns one series per well in pad order, plus the run diagnostics.
    /// Wells without rate breakpoints still accumulate interference from
    /// their producing neighbours.
    pub(super) fn pressure_drops(&self, grid_days: &[f64]) -> (Vec<Vec<f64>>, Diagnostics) {
        let n = self.wells.len();
        let mut series = vec![vec![0.0; grid_days.len()]; n];
        let mut diagnostics = Diagnostics::default();

        for (t_index, &t_days) in grid_days.iter().enumerate() {
            for (source, steps) in self.rate_steps.iter().enumerate() {
                let mut previous_rate = 0.0;
                for &(step_days, rate) in steps {
                    let delta_rate = rate - previous_rate;
                    previous_rate = rate;
                    if step_days >= t_days || delta_rate == 0.0 {
                        continue;
                    }

                    let elapsed = self.scales.time_to_dimensionless(t_days - step_days);
                    let unit = self.unit_response(source, elapsed, &mut diagnostics);
                    let scale = self.scales.pressure_per_unit_response(delta_rate);
                    for (well, value) in unit.iter().enumerate() {
                        series[well][t_index] += scale * value;
                    }
                }
            }
        }

        (series, diagnostics)
    }

    /// Inverted unit-rate step response of every well to a source at
    /// `source`, at dimensionless elapsed time `t_dimensionless`.
    fn unit_response(
        &self,
        source: usize,
        t_dimensionless: f64,
        diagnostics: &mut Diagnostics,
    ) -> Vec<f64> {
        let n = self.wells.len();
        let mut accumulated = vec![0.0; n];
        let storage = self.wells[source].wellbore_storage;

        for node in self.inverter.nodes(t_dimensionless) {
            let s = Complex64::new(node.s, 0.0);
            let solution =
                laplace::assemble(s, self.wells, &self.map, &[SourceTerm::unit(source)]).solve();
            diagnostics.record(solution.is_degraded());

            let pressures = solution.well_pressures();
            let mut source_pressure = pressures[source];
            if storage > 0.0 {
                // Wellbore storage damps the sand-face response of the
                // sourced well; the interference signal is unaffected.
                source_pressure /= 1.0 + storage * s * s * source_pressure;
            }

            for (well, slot) in accumulated.iter_mut().enumerate() {
                let value = if well == source {
                    source_pressure
                } else {
                    pressures[well]
                };
                *slot += node.weight * value.re;
            }
        }

        let ln2_over_t = std::f64::consts::LN_2 / t_dimensionless;
        accumulated.iter().map(|&sum| ln2_over_t * sum).collect()
    }
}

/// Bourdet derivative d(Δp)/d(ln t) on a possibly nonuniform grid.
///
/// Central differences weighted for unequal spacing in ln t, one-sided at
/// the ends. Fewer than three points cannot support the stencil and yield
/// zeros.
pub(super) fn bourdet_derivative(time_days: &[f64], pressure_drop: &[f64]) -> Vec<f64> {
    let n = time_days.len();
    if n < 3 {
        return vec![0.0; n];
    }

    let x: Vec<f64> = time_days.iter().map(|&t| t.ln()).collect();
    let mut derivative = vec![0.0; n];

    derivative[0] = (pressure_drop[1] - pressure_drop[0]) / (x[1] - x[0]);
    derivative[n - 1] = (pressure_drop[n - 1] - pressure_drop[n - 2]) / (x[n - 1] - x[n - 2]);

    for i in 1..n - 1 {
        let h_left = x[i] - x[i - 1];
        let h_right = x[i + 1] - x[i];
        derivative[i] = (pressure_drop[i + 1] * h_left * h_left
            + (h_right * h_right - h_left * h_left) * pressure_drop[i]
            - pressure_drop[i - 1] * h_right * h_right)
            / (h_left * h_right * (h_left + h_right));
    }

    derivative
}
