/// Identifier tying a well to its production schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WellId(pub u64);

/// Geometry and completion of one fractured lateral.
///
/// Wells on a pad form an ordered row; interference couples each well to
/// its immediate neighbours in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct Well {
    /// Identifier used to match schedules and label output series.
    pub id: WellId,

    /// Fracture half-length x_f, ft. The first well's half-length is the
    /// system-wide reference length scale.
    pub fracture_half_length: f64,

    /// Dimensionless fracture conductivity C_fD.
    pub fracture_conductivity: f64,

    /// Number of hydraulic fractures along the lateral.
    pub num_fractures: u32,

    /// Lateral spacing, ft: drainage width of this well and the gap to an
    /// adjacent lateral.
    pub spacing: f64,

    /// Production start time, days. Zero for a parent well, positive for an
    /// infill child.
    pub start_time: f64,

    /// Wellbore radius, ft.
    pub wellbore_radius: f64,

    /// Wellbore storage coefficient, bbl/psi. Zero disables the storage
    /// correction.
    pub wellbore_storage: f64,

    /// Optional SRV property overrides; project values apply when absent.
    pub srv: SrvOverrides,
}

/// Optional per-well stimulated-volume properties.
///
/// Each field that is `None` resolves to the corresponding project-level
/// value through a single fallback helper; formulas never branch on the
/// options directly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SrvOverrides {
    /// SRV permeability, same unit as the project reference permeability.
    pub permeability: Option<f64>,

    /// SRV porosity, fraction.
    pub porosity: Option<f64>,

    /// SRV storativity ratio ω.
    pub storativity_ratio: Option<f64>,

    /// SRV interporosity coefficient λ.
    pub interporosity_coefficient: Option<f64>,
}
