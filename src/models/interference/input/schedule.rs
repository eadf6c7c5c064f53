use super::WellId;

/// Boundary condition held over one schedule interval.
///
/// A well is controlled either by surface rate or by bottomhole pressure
/// over any given interval, never both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WellControl {
    /// Constant surface rate, STB/D. Zero is a shut-in.
    Rate(f64),

    /// Constant flowing bottomhole pressure, psi.
    BottomholePressure(f64),
}

/// One breakpoint of a piecewise-constant schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleStep {
    /// Time at which this control takes effect, days.
    pub time: f64,

    /// Control held from this breakpoint until the next one.
    pub control: WellControl,
}

/// Ordered rate/pressure breakpoints for one well.
///
/// Invariants, enforced when a simulation is validated: breakpoint times
/// are strictly increasing, and the first breakpoint's time equals the
/// well's start time.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionSchedule {
    /// The well this schedule drives.
    pub well_id: WellId,

    /// Breakpoints in ascending time order.
    pub steps: Vec<ScheduleStep>,
}

impl ProductionSchedule {
    /// The rate breakpoints as `(time_days, rate_stb_per_day)` pairs.
    ///
    /// Pressure-controlled intervals carry no rate step and contribute
    /// nothing to rate superposition.
    pub(crate) fn rate_steps(&self) -> Vec<(f64, f64)> {
        self.steps
            .iter()
            .filter_map(|step| match step.control {
                WellControl::Rate(rate) => Some((step.time, rate)),
                WellControl::BottomholePressure(_) => None,
            })
            .collect()
    }

    /// The first pressure-controlled breakpoint, if any.
    pub(crate) fn first_pressure_step(&self) -> Option<(f64, f64)> {
        self.steps.iter().find_map(|step| match step.control {
            WellControl::BottomholePressure(pwf) => Some((step.time, pwf)),
            WellControl::Rate(_) => None,
        })
    }
}
