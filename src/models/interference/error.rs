use thiserror::Error;

use super::WellId;
use crate::support::{constraint::ConstraintError, stehfest::StehfestError};

/// Errors detected before any computation starts.
///
/// A run either fails with one of these up front or completes with a full
/// time series; there is no partial output.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// The pad has no wells.
    #[error("simulation requires at least one well")]
    EmptyWellSet,

    /// The Stehfest order is odd or zero.
    #[error(transparent)]
    StehfestOrder(#[from] StehfestError),

    /// Time bounds are non-positive or inverted.
    #[error("invalid time range: t_min={t_min} days, t_max={t_max} days")]
    InvalidTimeRange {
        /// Requested lower bound, days.
        t_min: f64,
        /// Requested upper bound, days.
        t_max: f64,
    },

    /// The time grid has fewer than two points.
    #[error("time grid needs at least 2 points, got {n_steps}")]
    TooFewTimeSteps {
        /// Requested point count.
        n_steps: usize,
    },

    /// The reference well's fracture half-length is not strictly positive.
    #[error("reference fracture half-length must be positive, got {value} ft")]
    NonPositiveReferenceLength {
        /// The rejected half-length, ft.
        value: f64,
    },

    /// A well's spacing is not strictly positive.
    #[error("well {well_id:?} has non-positive spacing {value} ft")]
    NonPositiveSpacing {
        /// The offending well.
        well_id: WellId,
        /// The rejected spacing, ft.
        value: f64,
    },

    /// A dual-porosity parameter violates its numeric bounds.
    #[error("invalid dual-porosity parameter {name} = {value}: {source}")]
    DualPorosityBounds {
        /// Parameter name, `omega` or `lambda`.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// The violated bound.
        source: ConstraintError,
    },

    /// A schedule references a well that is not on the pad.
    #[error("schedule references unknown well {well_id:?}")]
    UnknownScheduleWell {
        /// The dangling reference.
        well_id: WellId,
    },

    /// Two schedules reference the same well.
    #[error("well {well_id:?} has more than one schedule")]
    DuplicateSchedule {
        /// The well scheduled twice.
        well_id: WellId,
    },

    /// Schedule breakpoint times are not strictly increasing.
    #[error("schedule for well {well_id:?} has non-increasing breakpoint times")]
    NonIncreasingSchedule {
        /// The offending well.
        well_id: WellId,
    },

    /// The first schedule breakpoint does not fall at the well start time.
    #[error(
        "schedule for well {well_id:?} starts at {schedule_start} days \
         but the well starts at {well_start} days"
    )]
    ScheduleStartMismatch {
        /// The offending well.
        well_id: WellId,
        /// First breakpoint time, days.
        schedule_start: f64,
        /// Well start time, days.
        well_start: f64,
    },
}
