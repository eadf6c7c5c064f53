/// Global rock and fluid properties shared by every well on the pad.
///
/// Immutable for the duration of a simulation run. Per-well SRV overrides
/// on [`Well`](super::Well) fall back to these values when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservoirProject {
    /// Matrix porosity, fraction.
    pub porosity: f64,

    /// Total compressibility, 1/psi.
    pub total_compressibility: f64,

    /// Fluid viscosity, cp.
    pub viscosity: f64,

    /// Reference permeability, in the unit named by
    /// [`RunConfig::permeability_unit`](super::RunConfig::permeability_unit).
    pub reference_permeability: f64,

    /// Net pay thickness, ft.
    pub thickness: f64,

    /// Formation volume factor, reservoir volume per surface volume.
    pub formation_volume_factor: f64,

    /// Dual-porosity storativity ratio ω, in (0, 1]. A value of 1 collapses
    /// the reservoir to single porosity.
    pub storativity_ratio: f64,

    /// Dual-porosity interporosity flow coefficient λ, >= 0. A value of 0
    /// collapses the reservoir to single porosity.
    pub interporosity_coefficient: f64,

    /// Initial reservoir pressure, psi.
    pub initial_pressure: f64,
}
