use crate::support::units::PermeabilityUnit;

/// Distribution of the requested time grid between its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridSpacing {
    /// Logarithmically spaced points; the usual choice for transient
    /// diagnostics spanning several decades.
    #[default]
    Logarithmic,
    /// Linearly spaced points.
    Linear,
}

/// Run configuration for an interference simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    /// First grid time, days. Must be positive.
    pub t_min: f64,

    /// Last grid time, days. Must exceed `t_min`.
    pub t_max: f64,

    /// Number of grid points, at least 2. Fewer than 3 points leaves the
    /// Bourdet derivative as zeros.
    pub n_steps: usize,

    /// Grid distribution between `t_min` and `t_max`.
    pub spacing: GridSpacing,

    /// Stehfest inversion order. Must be even; 12 is the customary choice.
    pub stehfest_order: usize,

    /// Unit in which all permeability inputs are expressed.
    pub permeability_unit: PermeabilityUnit,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            t_min: 1e-3,
            t_max: 1000.0,
            n_steps: 50,
            spacing: GridSpacing::Logarithmic,
            stehfest_order: 12,
            permeability_unit: PermeabilityUnit::default(),
        }
    }
}

impl RunConfig {
    /// The requested time grid in days.
    pub(crate) fn time_grid(&self) -> Vec<f64> {
        let n = self.n_steps;
        if n == 1 {
            return vec![self.t_min];
        }
        (0..n)
            .map(|i| {
                let frac = i as f64 / (n - 1) as f64;
                match self.spacing {
                    GridSpacing::Logarithmic => {
                        let log_min = self.t_min.log10();
                        let log_max = self.t_max.log10();
                        10f64.powf(log_min + frac * (log_max - log_min))
                    }
                    GridSpacing::Linear => self.t_min + frac * (self.t_max - self.t_min),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn log_grid_hits_both_bounds() {
        let config = RunConfig {
            t_min: 1e-2,
            t_max: 100.0,
            n_steps: 5,
            ..RunConfig::default()
        };
        let grid = config.time_grid();
        assert_eq!(grid.len(), 5);
        assert_relative_eq!(grid[0], 1e-2, max_relative = 1e-12);
        assert_relative_eq!(grid[4], 100.0, max_relative = 1e-12);
        assert_relative_eq!(grid[2], 1.0, max_relative = 1e-12);
    }

    #[test]
    fn linear_grid_is_uniform() {
        let config = RunConfig {
            t_min: 1.0,
            t_max: 5.0,
            n_steps: 5,
            spacing: GridSpacing::Linear,
            ..RunConfig::default()
        };
        let grid = config.time_grid();
        assert_eq!(grid, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }
}
