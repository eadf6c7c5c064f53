//! Domain-specific models.

pub mod interference;
