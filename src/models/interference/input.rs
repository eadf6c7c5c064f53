//! Input records for an interference simulation.
//!
//! These are plain in-memory structures owned by the caller; persistence
//! and request validation live outside this crate. Field units are oilfield
//! conventions, documented per field, and are converted to SI exactly once
//! when dimensionless scales are derived.

mod config;
mod project;
mod schedule;
mod well;

pub use config::{GridSpacing, RunConfig};
pub use project::ReservoirProject;
pub use schedule::{ProductionSchedule, ScheduleStep, WellControl};
pub use well::{SrvOverrides, Well, WellId};

/// Resolves an optional per-well override against a project-level value.
///
/// Single point of fallback for SRV properties; formulas never inspect the
/// option themselves.
pub(super) fn resolve<T: Copy>(well_value: Option<T>, project_value: T) -> T {
    well_value.unwrap_or(project_value)
}
