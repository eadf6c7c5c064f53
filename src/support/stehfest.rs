//! Numerical Laplace inversion with the Stehfest algorithm.
//!
//! Stehfest inversion approximates `f(t)` from its Laplace transform
//! `F(s)` as a weighted sum of samples at real points along the s axis:
//!
//! ```text
//! f(t) ≈ (ln 2 / t) · Σ_k V_k · F(k · ln 2 / t)
//! ```
//!
//! The weights `V_k` depend only on the (even) order `N` and are
//! precomputed once. The transform is sampled at `N` real, positive values
//! of `s` per time point, and every sample is independent of the others:
//! [`Stehfest::nodes`] exposes the `(s_k, V_k)` pairs directly so callers
//! that invert expensive vector-valued transforms can distribute the
//! per-node work and fold the weighted results back together in any order.

use thiserror::Error;

/// Error constructing a [`Stehfest`] inverter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StehfestError {
    /// The algorithm requires an even, non-zero order.
    #[error("Stehfest order must be even and non-zero, got {order}")]
    InvalidOrder {
        /// The rejected order.
        order: usize,
    },
}

/// One quadrature sample of a Stehfest inversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StehfestNode {
    /// 1-based node index `k`.
    pub index: usize,
    /// Real Laplace sample point `k · ln 2 / t`.
    pub s: f64,
    /// Precomputed weight `V_k`.
    pub weight: f64,
}

/// Precomputed Stehfest weights for a fixed even order.
#[derive(Debug, Clone, PartialEq)]
pub struct Stehfest {
    weights: Vec<f64>,
}

impl Stehfest {
    /// Precomputes the weights `V_1..V_N` for an even order `N`.
    ///
    /// `N = 12` is the customary choice for pressure-transient work; higher
    /// orders trade roundoff against truncation and rarely pay off in f64.
    ///
    /// # Errors
    ///
    /// Returns [`StehfestError::InvalidOrder`] if `order` is odd or zero.
    pub fn new(order: usize) -> Result<Self, StehfestError> {
        if order == 0 || order % 2 != 0 {
            return Err(StehfestError::InvalidOrder { order });
        }

        let half = order / 2;
        let mut weights = Vec::with_capacity(order);
        for k in 1..=order {
            let mut sum = 0.0;
            let j_min = k.div_ceil(2);
            let j_max = k.min(half);
            for j in j_min..=j_max {
                let num = (j as f64).powi(half as i32) * factorial(2 * j);
                let den = factorial(half - j)
                    * factorial(j)
                    * factorial(j - 1)
                    * factorial(k - j)
                    * factorial(2 * j - k);
                sum += num / den;
            }
            let sign = if (k + half) % 2 == 0 { 1.0 } else { -1.0 };
            weights.push(sign * sum);
        }
        Ok(Self { weights })
    }

    /// The inversion order `N`.
    pub fn order(&self) -> usize {
        self.weights.len()
    }

    /// The precomputed weights `V_1..V_N`.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// The `(s_k, V_k)` sample pairs for inverting at time `t`.
    ///
    /// Each node is an independent unit of work; the weighted samples sum
    /// commutatively, so callers may evaluate them in parallel.
    pub fn nodes(&self, t: f64) -> impl Iterator<Item = StehfestNode> + '_ {
        let ln2_over_t = std::f64::consts::LN_2 / t;
        self.weights
            .iter()
            .enumerate()
            .map(move |(i, &weight)| StehfestNode {
                index: i + 1,
                s: (i + 1) as f64 * ln2_over_t,
                weight,
            })
    }

    /// Inverts a scalar Laplace transform at time `t > 0`.
    ///
    /// Only the real part of the transform is physically meaningful; the
    /// caller supplies a real-valued sampler evaluated at real `s`.
    pub fn invert(&self, t: f64, mut transform: impl FnMut(f64) -> f64) -> f64 {
        let sum: f64 = self
            .nodes(t)
            .map(|node| node.weight * transform(node.s))
            .sum();
        (std::f64::consts::LN_2 / t) * sum
    }
}

fn factorial(n: usize) -> f64 {
    (1..=n).fold(1.0, |acc, v| acc * v as f64)
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    #[test]
    fn rejects_odd_or_zero_order() {
        assert_eq!(
            Stehfest::new(7).unwrap_err(),
            StehfestError::InvalidOrder { order: 7 }
        );
        assert_eq!(
            Stehfest::new(0).unwrap_err(),
            StehfestError::InvalidOrder { order: 0 }
        );
    }

    #[test]
    fn weights_sum_to_zero() {
        // A classical identity: the V_k for any even order sum to zero.
        for order in [4, 8, 12] {
            let inverter = Stehfest::new(order).unwrap();
            let sum: f64 = inverter.weights().iter().sum();
            assert_abs_diff_eq!(sum, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn inverts_unit_step() {
        // F(s) = 1/s  <=>  f(t) = 1
        let inverter = Stehfest::new(12).unwrap();
        for t in [1e-3, 1.0, 50.0, 1e4] {
            let value = inverter.invert(t, |s| 1.0 / s);
            assert_relative_eq!(value, 1.0, max_relative = 1e-3);
        }
    }

    #[test]
    fn inverts_ramp() {
        // F(s) = 1/s²  <=>  f(t) = t
        let inverter = Stehfest::new(12).unwrap();
        for t in [0.5, 2.0, 100.0] {
            let value = inverter.invert(t, |s| 1.0 / (s * s));
            assert_relative_eq!(value, t, max_relative = 1e-3);
        }
    }

    #[test]
    fn inverts_exponential_decay() {
        // F(s) = 1/(s + 1)  <=>  f(t) = e^-t
        let inverter = Stehfest::new(12).unwrap();
        for t in [0.1, 1.0, 3.0] {
            let value = inverter.invert(t, |s| 1.0 / (s + 1.0));
            assert_relative_eq!(value, (-t).exp(), max_relative = 5e-3);
        }
    }

    #[test]
    fn nodes_are_evenly_spaced_in_s() {
        let inverter = Stehfest::new(12).unwrap();
        let nodes: Vec<_> = inverter.nodes(2.0).collect();
        assert_eq!(nodes.len(), 12);
        let ln2_over_t = std::f64::consts::LN_2 / 2.0;
        for node in &nodes {
            assert_relative_eq!(node.s, node.index as f64 * ln2_over_t);
        }
    }
}
