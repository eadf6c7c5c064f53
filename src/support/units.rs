//! Extensions to [`uom`] for reservoir field units.
//!
//! Reservoir engineering inputs arrive in oilfield units: pressures in psi,
//! viscosities in centipoise, lengths in feet, times in days, permeabilities
//! in millidarcies or nanodarcies, rates in stock-tank barrels per day.
//! [`uom`] covers the first four directly; this module adds quantity
//! aliases and conversion helpers for the rest.
//!
//! Permeability carries an explicit [`PermeabilityUnit`] chosen on the run
//! configuration. Conventional-rock data sets are usually quoted in
//! millidarcies while shale data sets use nanodarcies, and the two differ
//! by six orders of magnitude, so the interpretation is never implicit.

use uom::{
    si::{ISQ, Quantity, SI},
    typenum::{N1, P1, P2, Z0},
};

/// Rock permeability, m² in SI (dimensionally an area).
pub type Permeability = Quantity<ISQ<P2, Z0, Z0, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Total compressibility, 1/Pa in SI.
pub type Compressibility = Quantity<ISQ<P1, N1, P2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Hydraulic diffusivity, m²/s in SI.
pub type Diffusivity = Quantity<ISQ<P2, Z0, N1, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// One millidarcy in m².
pub const MILLIDARCY_TO_SQUARE_METER: f64 = 9.869_233e-16;

/// One nanodarcy in m².
pub const NANODARCY_TO_SQUARE_METER: f64 = 9.869_233e-22;

/// One stock-tank barrel in m³.
pub const STB_TO_CUBIC_METER: f64 = 0.158_987_294_928;

/// One day in seconds.
pub const DAY_TO_SECOND: f64 = 86_400.0;

/// The unit in which permeability inputs are expressed.
///
/// Applies to the project reference permeability and to any per-well SRV
/// permeability override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermeabilityUnit {
    /// Millidarcies; typical for conventional rock and frac-hit studies.
    #[default]
    MilliDarcy,
    /// Nanodarcies; typical for shale matrix.
    NanoDarcy,
}

impl PermeabilityUnit {
    /// Converts a permeability value in this unit to an SI quantity.
    pub fn to_si(self, value: f64) -> Permeability {
        let factor = match self {
            PermeabilityUnit::MilliDarcy => MILLIDARCY_TO_SQUARE_METER,
            PermeabilityUnit::NanoDarcy => NANODARCY_TO_SQUARE_METER,
        };
        uom::si::f64::Area::new::<uom::si::area::square_meter>(value * factor)
    }
}

/// Converts a surface rate in STB/D to an SI volume rate.
pub fn stb_per_day(value: f64) -> uom::si::f64::VolumeRate {
    uom::si::f64::VolumeRate::new::<uom::si::volume_rate::cubic_meter_per_second>(
        value * STB_TO_CUBIC_METER / DAY_TO_SECOND,
    )
}
