use super::input::WellId;

/// Numerical health counters for one completed run.
///
/// Individual Laplace solves may degrade to a zero response without
/// aborting the run; these counters make that visible to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Diagnostics {
    /// Solves that fell back to the zero vector.
    pub degraded_solves: usize,
    /// Total Laplace solves performed.
    pub total_solves: usize,
}

impl Diagnostics {
    /// Whether any solve degraded during the run.
    pub fn is_degraded(&self) -> bool {
        self.degraded_solves > 0
    }

    pub(super) fn record(&mut self, degraded: bool) {
        self.total_solves += 1;
        if degraded {
            self.degraded_solves += 1;
        }
    }
}

/// Pressure response of one well over the run's time grid.
#[derive(Debug, Clone, PartialEq)]
pub struct WellSeries {
    /// The well this series describes.
    pub well_id: WellId,
    /// Pressure drop below initial reservoir pressure, psi.
    pub pressure_drop_psi: Vec<f64>,
    /// Bourdet derivative d(Δp)/d(ln t), psi.
    pub bourdet_derivative_psi: Vec<f64>,
    /// Flowing bottomhole pressure, psi.
    pub bottomhole_pressure_psi: Vec<f64>,
}

/// Full pressure-transient output of a run.
///
/// All series share the one time axis. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesResult {
    /// Shared time axis, days.
    pub time_days: Vec<f64>,
    /// One series per well, in pad order.
    pub wells: Vec<WellSeries>,
    /// Numerical health of the run.
    pub diagnostics: Diagnostics,
}

/// Rate history of one pressure-controlled well.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSeries {
    /// The well this series describes.
    pub well_id: WellId,
    /// Surface rate, STB/D. Clamped at zero; a producer does not backflow.
    pub rate_stb_per_day: Vec<f64>,
}

/// Rate-mode output for constant-pressure wells.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSeriesResult {
    /// Shared time axis, days.
    pub time_days: Vec<f64>,
    /// One series per pressure-controlled well.
    pub wells: Vec<RateSeries>,
    /// Numerical health of the run.
    pub diagnostics: Diagnostics,
}
