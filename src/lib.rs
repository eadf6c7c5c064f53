//! # Padflow
//!
//! Trilinear pressure-transient models for pads of interfering
//! hydraulically-fractured horizontal wells.
//!
//! The crate computes bottomhole pressure-drop (and rate) histories for an
//! ordered row of fractured wells producing from a shared dual-porosity
//! reservoir. The solution is assembled in Laplace space as a coupled
//! complex linear system over fracture and stimulated-volume unknowns,
//! inverted numerically with the Stehfest algorithm, and superposed in time
//! over piecewise-constant production schedules.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain models. [`models::interference`] is the multiwell
//!   interference simulator.
//! - [`support`]: Supporting utilities used by models: numeric constraints,
//!   unit extensions, stable complex hyperbolics, and Laplace inversion.
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.

pub mod models;
pub mod support;
