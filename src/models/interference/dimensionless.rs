//! Field-unit to dimensionless parameter mapping.
//!
//! All physical inputs are converted to SI exactly once, here. Everything
//! downstream of this module works in the dimensionless groups of the
//! trilinear model: the Laplace variable, conductivities, diffusivity
//! ratios, and distances are all normalized against the reference well's
//! fracture half-length and the project-level reference diffusivity
//!
//! ```text
//! η_R = k_R / (φ · μ · c_t)
//! ```
//!
//! Both [`ReservoirScales`] and [`WellScales`] are pure functions of their
//! inputs: identical inputs yield bit-identical output, and nothing global
//! influences the mapping.

use uom::si::{
    dynamic_viscosity::centipoise,
    f64::{DynamicViscosity, Length, Pressure, Ratio},
    length::foot,
    pressure::pound_force_per_square_inch,
    ratio::ratio,
};

use super::{
    ConfigurationError,
    input::{ReservoirProject, Well, WellId, resolve},
};
use crate::support::{
    constraint::StrictlyPositive,
    units::{Compressibility, DAY_TO_SECOND, Diffusivity, Permeability, PermeabilityUnit, stb_per_day},
};

/// Additive guard against division by vanishing physical properties.
pub(super) const EPSILON: f64 = 1e-20;

/// Wellbore storage constant for bbl/psi, ft units (SPE convention).
const STORAGE_FIELD_CONSTANT: f64 = 0.8936;

/// Project-level reference scales in SI.
///
/// Derived once per run from the project record, the permeability unit on
/// the run configuration, and the reference well's fracture half-length.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservoirScales {
    /// Reference hydraulic diffusivity η_R.
    eta_ref: Diffusivity,
    k_ref: Permeability,
    mu: DynamicViscosity,
    ct: Compressibility,
    h: Length,
    l_ref: Length,
    porosity: f64,
    formation_volume_factor: f64,
    initial_pressure: Pressure,
    storativity_ratio: f64,
    interporosity_coefficient: f64,
    permeability_unit: PermeabilityUnit,
    /// Field-unit copies used for the wellbore-storage group.
    thickness_ft: f64,
    reference_length_ft: f64,
    total_compressibility_per_psi: f64,
}

/// Dimensionless parameters of one well.
///
/// Ephemeral and never mutated after creation; recomputed whenever the
/// reference length changes.
#[derive(Debug, Clone, PartialEq)]
pub struct WellScales {
    /// The well these scales describe.
    pub well_id: WellId,
    /// Dimensionless fracture conductivity C_fD.
    pub conductivity: f64,
    /// Local-to-reference diffusivity ratio η_D.
    pub diffusivity_ratio: f64,
    /// Fracture half-length over the reference length, x_fD.
    pub half_length: f64,
    /// Lateral spacing over the reference length, y_eD.
    pub spacing: f64,
    /// Thickness over the well's fracture half-length, h_D.
    pub thickness: f64,
    /// Wellbore radius over the well's fracture half-length, r_wD.
    pub wellbore_radius: f64,
    /// Fracture count as a scaling factor.
    pub num_fractures: f64,
    /// Flow-choking skin from flow convergence into the fractures.
    pub choking_skin: f64,
    /// Resolved storativity ratio ω.
    pub storativity_ratio: f64,
    /// Resolved interporosity coefficient λ.
    pub interporosity_coefficient: f64,
    /// Dimensionless wellbore storage coefficient C_D.
    pub wellbore_storage: f64,
}

impl ReservoirScales {
    /// Derives the project-level reference scales.
    ///
    /// `reference_half_length` is the fracture half-length of the reference
    /// well, in ft; it becomes the length scale of every dimensionless
    /// distance and time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NonPositiveReferenceLength`] if the
    /// reference length is zero or negative.
    pub fn new(
        project: &ReservoirProject,
        permeability_unit: PermeabilityUnit,
        reference_half_length: f64,
    ) -> Result<Self, ConfigurationError> {
        StrictlyPositive::new(reference_half_length).map_err(|_| {
            ConfigurationError::NonPositiveReferenceLength {
                value: reference_half_length,
            }
        })?;

        let k_ref = permeability_unit.to_si(project.reference_permeability);
        let mu = DynamicViscosity::new::<centipoise>(project.viscosity);
        let ct = Ratio::new::<ratio>(project.total_compressibility)
            / Pressure::new::<pound_force_per_square_inch>(1.0);
        let h = Length::new::<foot>(project.thickness);
        let l_ref = Length::new::<foot>(reference_half_length);
        let eta_ref = diffusivity(k_ref, project.porosity, mu, ct);

        Ok(Self {
            eta_ref,
            k_ref,
            mu,
            ct,
            h,
            l_ref,
            porosity: project.porosity,
            formation_volume_factor: project.formation_volume_factor,
            initial_pressure: Pressure::new::<pound_force_per_square_inch>(
                project.initial_pressure,
            ),
            storativity_ratio: project.storativity_ratio,
            interporosity_coefficient: project.interporosity_coefficient,
            permeability_unit,
            thickness_ft: project.thickness,
            reference_length_ft: reference_half_length,
            total_compressibility_per_psi: project.total_compressibility,
        })
    }

    /// Derives the dimensionless parameters of one well.
    ///
    /// SRV overrides resolve against project values; all divisions carry an
    /// additive epsilon so degenerate inputs stay finite.
    pub fn well_scales(&self, project: &ReservoirProject, well: &Well) -> WellScales {
        let k_srv = self.permeability_unit.to_si(resolve(
            well.srv.permeability,
            project.reference_permeability,
        ));
        let porosity_srv = resolve(well.srv.porosity, self.porosity);
        let omega = resolve(well.srv.storativity_ratio, self.storativity_ratio);
        let lambda = resolve(
            well.srv.interporosity_coefficient,
            self.interporosity_coefficient,
        );

        let eta_local = diffusivity(k_srv, porosity_srv, self.mu, self.ct);
        let diffusivity_ratio = eta_local.value / (self.eta_ref.value + EPSILON);

        let reference_ft = self.reference_length_ft;
        let half_length = well.fracture_half_length / (reference_ft + EPSILON);
        let spacing = well.spacing / (reference_ft + EPSILON);
        let thickness = self.thickness_ft / (well.fracture_half_length + EPSILON);
        let wellbore_radius = well.wellbore_radius / (well.fracture_half_length + EPSILON);

        let num_fractures = f64::from(well.num_fractures);
        let choking_skin = choking_skin(
            thickness,
            wellbore_radius,
            num_fractures,
            well.fracture_conductivity,
        );

        let wellbore_storage = STORAGE_FIELD_CONSTANT * well.wellbore_storage
            / ((porosity_srv + EPSILON)
                * self.total_compressibility_per_psi
                * self.thickness_ft
                * reference_ft
                * reference_ft
                + EPSILON);

        WellScales {
            well_id: well.id,
            conductivity: well.fracture_conductivity,
            diffusivity_ratio,
            half_length,
            spacing,
            thickness,
            wellbore_radius,
            num_fractures,
            choking_skin,
            storativity_ratio: omega,
            interporosity_coefficient: lambda,
            wellbore_storage,
        }
    }

    /// Maps an elapsed time in days to dimensionless time t_D = η_R·t/L².
    pub fn time_to_dimensionless(&self, elapsed_days: f64) -> f64 {
        let t_seconds = elapsed_days * DAY_TO_SECOND;
        self.eta_ref.value * t_seconds / (self.l_ref.value * self.l_ref.value + EPSILON)
    }

    /// Pressure drop in psi per unit dimensionless well pressure, for a
    /// given surface rate step.
    ///
    /// This is the SI form Δp = p_wD · q·μ·B / (2π·k_R·h) of the familiar
    /// field-unit 141.2 relation.
    pub fn pressure_per_unit_response(&self, rate_stb_per_day: f64) -> f64 {
        let q = stb_per_day(rate_stb_per_day);
        let scale = q * self.mu / (self.k_ref * self.h)
            * (self.formation_volume_factor / std::f64::consts::TAU);
        scale.get::<pound_force_per_square_inch>()
    }

    /// Dimensionless drawdown for a pressure step, the inverse of
    /// [`Self::pressure_per_unit_response`] at a 1 STB/D reference rate.
    pub fn drawdown_to_dimensionless(&self, drawdown_psi: f64) -> f64 {
        drawdown_psi / (self.pressure_per_unit_response(1.0) + EPSILON)
    }

    /// Initial reservoir pressure, psi.
    pub fn initial_pressure_psi(&self) -> f64 {
        self.initial_pressure.get::<pound_force_per_square_inch>()
    }
}

fn diffusivity(
    k: Permeability,
    porosity: f64,
    mu: DynamicViscosity,
    ct: Compressibility,
) -> Diffusivity {
    k / (mu * ct * (porosity + EPSILON))
}

/// Flow-choking skin s_c = h_D/(n_f·C_fD) · (ln(h_D/(2·r_wD)) − π/2).
///
/// An apparent resistance from flow converging radially into each fracture
/// at the wellbore, not from formation damage.
fn choking_skin(thickness: f64, wellbore_radius: f64, num_fractures: f64, conductivity: f64) -> f64 {
    let term = thickness / (num_fractures * conductivity + EPSILON);
    let factor =
        (thickness / (2.0 * wellbore_radius + EPSILON)).ln() - std::f64::consts::FRAC_PI_2;
    term * factor
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::models::interference::input::SrvOverrides;

    fn project() -> ReservoirProject {
        ReservoirProject {
            porosity: 0.05,
            total_compressibility: 3e-5,
            viscosity: 0.83,
            reference_permeability: 20.0,
            thickness: 100.0,
            formation_volume_factor: 1.0,
            storativity_ratio: 1.0,
            interporosity_coefficient: 0.0,
            initial_pressure: 4350.0,
        }
    }

    fn well() -> Well {
        Well {
            id: WellId(1),
            fracture_half_length: 200.0,
            fracture_conductivity: 500.0,
            num_fractures: 25,
            spacing: 660.0,
            start_time: 0.0,
            wellbore_radius: 0.3,
            wellbore_storage: 0.0,
            srv: SrvOverrides::default(),
        }
    }

    #[test]
    fn rejects_non_positive_reference_length() {
        let err = ReservoirScales::new(&project(), PermeabilityUnit::NanoDarcy, 0.0).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::NonPositiveReferenceLength { .. }
        ));
    }

    #[test]
    fn mapping_is_bit_identical_across_calls() {
        let project = project();
        let well = well();
        let scales = ReservoirScales::new(&project, PermeabilityUnit::NanoDarcy, 200.0).unwrap();
        let first = scales.well_scales(&project, &well);
        let second = scales.well_scales(&project, &well);
        assert_eq!(first, second);
    }

    #[test]
    fn srv_permeability_override_scales_diffusivity_ratio() {
        let project = project();
        let scales = ReservoirScales::new(&project, PermeabilityUnit::NanoDarcy, 200.0).unwrap();

        let baseline = scales.well_scales(&project, &well());
        assert_relative_eq!(baseline.diffusivity_ratio, 1.0, max_relative = 1e-9);

        let mut boosted = well();
        boosted.srv.permeability = Some(2.0 * project.reference_permeability);
        let scaled = scales.well_scales(&project, &boosted);
        assert_relative_eq!(scaled.diffusivity_ratio, 2.0, max_relative = 1e-9);
    }

    #[test]
    fn reference_diffusivity_matches_hand_calculation() {
        let project = project();
        let scales = ReservoirScales::new(&project, PermeabilityUnit::NanoDarcy, 200.0).unwrap();

        // k = 20 nd, μ = 0.83 cp, c_t = 3e-5 /psi, φ = 0.05
        let k = 20.0 * 9.869233e-22;
        let mu = 0.83e-3;
        let ct = 3e-5 / 6894.757293168361;
        let expected = k / (0.05 * mu * ct);
        assert_relative_eq!(scales.eta_ref.value, expected, max_relative = 1e-6);
    }

    #[test]
    fn dimensionless_time_is_linear_in_time() {
        let project = project();
        let scales = ReservoirScales::new(&project, PermeabilityUnit::NanoDarcy, 200.0).unwrap();
        let t1 = scales.time_to_dimensionless(1.0);
        let t10 = scales.time_to_dimensionless(10.0);
        assert!(t1 > 0.0);
        assert_relative_eq!(t10 / t1, 10.0, max_relative = 1e-12);
    }

    #[test]
    fn choking_skin_is_positive_for_typical_geometry() {
        let project = project();
        let scales = ReservoirScales::new(&project, PermeabilityUnit::NanoDarcy, 200.0).unwrap();
        let derived = scales.well_scales(&project, &well());
        assert!(derived.choking_skin > 0.0);
    }

    #[test]
    fn pressure_scale_and_drawdown_are_inverses() {
        let project = project();
        let scales = ReservoirScales::new(&project, PermeabilityUnit::NanoDarcy, 200.0).unwrap();
        let psi_per_unit = scales.pressure_per_unit_response(1.0);
        assert!(psi_per_unit > 0.0);
        assert_relative_eq!(
            scales.drawdown_to_dimensionless(psi_per_unit),
            1.0,
            max_relative = 1e-9
        );
    }
}
