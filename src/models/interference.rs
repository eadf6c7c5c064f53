//! Pressure-transient interference for a pad of fractured horizontal wells.
//!
//! The pad shares one dual-porosity reservoir; each well drains a slab of
//! it through a planar hydraulic fracture, and adjacent slabs exchange
//! fluid so production at one well draws down its neighbours. The model is
//! the trilinear idealization: linear flow in the fracture, the stimulated
//! volume, and the outer reservoir, coupled in Laplace space and inverted
//! numerically.
//!
//! [`PadSimulator`] is the entry point. Configure a project, wells, and
//! per-well production schedules, then run either mode:
//!
//! - [`PadSimulator::run`] takes rate-controlled schedules and produces
//!   pressure drops with Bourdet derivatives at every well;
//! - [`PadSimulator::run_rates`] takes constant-pressure constraints and
//!   reconstructs the rate history each well can sustain.
//!
//! ```
//! use padflow::models::interference::{
//!     PadSimulator, ProductionSchedule, ReservoirProject, RunConfig, ScheduleStep,
//!     SrvOverrides, Well, WellControl, WellId,
//! };
//!
//! let project = ReservoirProject {
//!     porosity: 0.06,
//!     total_compressibility: 3e-5,
//!     viscosity: 0.9,
//!     reference_permeability: 15.0,
//!     thickness: 120.0,
//!     formation_volume_factor: 1.1,
//!     storativity_ratio: 1.0,
//!     interporosity_coefficient: 0.0,
//!     initial_pressure: 5200.0,
//! };
//! let well = Well {
//!     id: WellId(1),
//!     fracture_half_length: 250.0,
//!     fracture_conductivity: 400.0,
//!     num_fractures: 30,
//!     spacing: 660.0,
//!     start_time: 0.0,
//!     wellbore_radius: 0.3,
//!     wellbore_storage: 0.0,
//!     srv: SrvOverrides::default(),
//! };
//! let schedule = ProductionSchedule {
//!     well_id: WellId(1),
//!     steps: vec![ScheduleStep {
//!         time: 0.0,
//!         control: WellControl::Rate(400.0),
//!     }],
//! };
//!
//! let simulator = PadSimulator::new(project, vec![well], vec![schedule]);
//! let result = simulator.run(&RunConfig::default())?;
//! assert_eq!(result.wells.len(), 1);
//! # Ok::<(), padflow::models::interference::ConfigurationError>(())
//! ```

mod dimensionless;
mod dual_porosity;
mod error;
mod input;
mod laplace;
mod rates;
mod results;
mod superposition;

pub use dimensionless::{ReservoirScales, WellScales};
pub use error::ConfigurationError;
pub use input::{
    GridSpacing, ProductionSchedule, ReservoirProject, RunConfig, ScheduleStep, SrvOverrides,
    Well, WellControl, WellId,
};
pub use results::{Diagnostics, RateSeries, RateSeriesResult, TimeSeriesResult, WellSeries};

use tracing::{debug, warn};

use crate::support::{
    constraint::{NonNegative, UnitIntervalLowerOpen},
    stehfest::Stehfest,
};
use input::resolve;
use rates::{RateEngine, RateTarget};
use superposition::SuperpositionEngine;

/// A configured pad ready to simulate.
///
/// Wells are an ordered row; index order fixes which laterals are
/// neighbours. The first well is the reference well whose fracture
/// half-length sets the dimensionless length scale.
#[derive(Debug, Clone, PartialEq)]
pub struct PadSimulator {
    project: ReservoirProject,
    wells: Vec<Well>,
    schedules: Vec<ProductionSchedule>,
}

impl PadSimulator {
    /// Assembles a simulator from caller-owned input records.
    ///
    /// Inputs are taken as-is; all validation happens when a run starts,
    /// so an invalid configuration fails fast without partial output.
    pub fn new(
        project: ReservoirProject,
        wells: Vec<Well>,
        schedules: Vec<ProductionSchedule>,
    ) -> Self {
        Self {
            project,
            wells,
            schedules,
        }
    }

    /// Runs the pressure mode: rate schedules in, pressure transients out.
    ///
    /// Every well gets a series, whether it produces or merely observes
    /// interference from its neighbours. Wells whose schedules hold only
    /// pressure controls contribute no rate source here; their rates come
    /// from [`Self::run_rates`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if any input record or the run
    /// configuration is invalid. Numerical trouble during the run never
    /// errors; it degrades individual solves and is reported through
    /// [`Diagnostics`].
    pub fn run(&self, config: &RunConfig) -> Result<TimeSeriesResult, ConfigurationError> {
        let (inverter, scales, well_scales) = self.validate(config)?;
        let grid = config.time_grid();
        debug!(
            wells = self.wells.len(),
            grid_points = grid.len(),
            stehfest_order = inverter.order(),
            "starting pressure run"
        );

        let rate_steps: Vec<Vec<(f64, f64)>> = self
            .wells
            .iter()
            .map(|well| {
                self.schedule_for(well.id)
                    .map(ProductionSchedule::rate_steps)
                    .unwrap_or_default()
            })
            .collect();

        let engine = SuperpositionEngine::new(&scales, &well_scales, &inverter, rate_steps);
        let (series, diagnostics) = engine.pressure_drops(&grid);
        if diagnostics.is_degraded() {
            warn!(
                degraded = diagnostics.degraded_solves,
                total = diagnostics.total_solves,
                "pressure run completed with degraded solves"
            );
        }

        let initial = scales.initial_pressure_psi();
        let wells = series
            .into_iter()
            .zip(&self.wells)
            .map(|(pressure_drop, well)| {
                let bourdet = superposition::bourdet_derivative(&grid, &pressure_drop);
                let bottomhole = pressure_drop.iter().map(|dp| initial - dp).collect();
                WellSeries {
                    well_id: well.id,
                    pressure_drop_psi: pressure_drop,
                    bourdet_derivative_psi: bourdet,
                    bottomhole_pressure_psi: bottomhole,
                }
            })
            .collect();

        Ok(TimeSeriesResult {
            time_days: grid,
            wells,
            diagnostics,
        })
    }

    /// Runs the rate mode: constant bottomhole pressures in, rate
    /// histories out.
    ///
    /// Only wells whose schedule carries a pressure control appear in the
    /// output; their first pressure breakpoint sets the target and its
    /// engagement time.
    ///
    /// # Errors
    ///
    /// Same validation as [`Self::run`].
    pub fn run_rates(&self, config: &RunConfig) -> Result<RateSeriesResult, ConfigurationError> {
        let (inverter, scales, well_scales) = self.validate(config)?;
        let grid = config.time_grid();

        let initial = scales.initial_pressure_psi();
        let mut targets = Vec::new();
        let mut target_ids = Vec::new();
        for (index, well) in self.wells.iter().enumerate() {
            let Some(schedule) = self.schedule_for(well.id) else {
                continue;
            };
            if let Some((start_days, pwf_psi)) = schedule.first_pressure_step() {
                targets.push(RateTarget {
                    well: index,
                    drawdown_psi: initial - pwf_psi,
                    start_days,
                });
                target_ids.push(well.id);
            }
        }
        debug!(
            targets = targets.len(),
            grid_points = grid.len(),
            "starting rate run"
        );

        let engine = RateEngine::new(&scales, &well_scales, &inverter, targets);
        let (series, diagnostics) = engine.rates(&grid);
        if diagnostics.is_degraded() {
            warn!(
                degraded = diagnostics.degraded_solves,
                total = diagnostics.total_solves,
                "rate run completed with degraded solves"
            );
        }

        let wells = target_ids
            .into_iter()
            .zip(series)
            .map(|(well_id, rate_stb_per_day)| RateSeries {
                well_id,
                rate_stb_per_day,
            })
            .collect();

        Ok(RateSeriesResult {
            time_days: grid,
            wells,
            diagnostics,
        })
    }

    fn schedule_for(&self, well_id: WellId) -> Option<&ProductionSchedule> {
        self.schedules
            .iter()
            .find(|schedule| schedule.well_id == well_id)
    }

    /// Validates every input record against the run configuration and
    /// derives the per-run scales.
    fn validate(
        &self,
        config: &RunConfig,
    ) -> Result<(Stehfest, ReservoirScales, Vec<WellScales>), ConfigurationError> {
        let Some(reference_well) = self.wells.first() else {
            return Err(ConfigurationError::EmptyWellSet);
        };

        let inverter = Stehfest::new(config.stehfest_order)?;

        if config.t_min <= 0.0 || config.t_max <= config.t_min {
            return Err(ConfigurationError::InvalidTimeRange {
                t_min: config.t_min,
                t_max: config.t_max,
            });
        }
        if config.n_steps < 2 {
            return Err(ConfigurationError::TooFewTimeSteps {
                n_steps: config.n_steps,
            });
        }

        let scales = ReservoirScales::new(
            &self.project,
            config.permeability_unit,
            reference_well.fracture_half_length,
        )?;

        for well in &self.wells {
            if well.spacing <= 0.0 {
                return Err(ConfigurationError::NonPositiveSpacing {
                    well_id: well.id,
                    value: well.spacing,
                });
            }

            let omega = resolve(well.srv.storativity_ratio, self.project.storativity_ratio);
            UnitIntervalLowerOpen::new(omega).map_err(|source| {
                ConfigurationError::DualPorosityBounds {
                    name: "omega",
                    value: omega,
                    source,
                }
            })?;

            let lambda = resolve(
                well.srv.interporosity_coefficient,
                self.project.interporosity_coefficient,
            );
            NonNegative::new(lambda).map_err(|source| {
                ConfigurationError::DualPorosityBounds {
                    name: "lambda",
                    value: lambda,
                    source,
                }
            })?;
        }

        let mut scheduled = Vec::with_capacity(self.schedules.len());
        for schedule in &self.schedules {
            let Some(well) = self.wells.iter().find(|well| well.id == schedule.well_id) else {
                return Err(ConfigurationError::UnknownScheduleWell {
                    well_id: schedule.well_id,
                });
            };
            if scheduled.contains(&schedule.well_id) {
                return Err(ConfigurationError::DuplicateSchedule {
                    well_id: schedule.well_id,
                });
            }
            scheduled.push(schedule.well_id);

            let increasing = schedule
                .steps
                .windows(2)
                .all(|pair| pair[1].time > pair[0].time);
            if !increasing {
                return Err(ConfigurationError::NonIncreasingSchedule {
                    well_id: schedule.well_id,
                });
            }

            if let Some(first) = schedule.steps.first()
                && first.time != well.start_time
            {
                return Err(ConfigurationError::ScheduleStartMismatch {
                    well_id: schedule.well_id,
                    schedule_start: first.time,
                    well_start: well.start_time,
                });
            }
        }

        let well_scales = self
            .wells
            .iter()
            .map(|well| scales.well_scales(&self.project, well))
            .collect();

        Ok((inverter, scales, well_scales))
    }
}
