//! Type-level numeric constraints with zero runtime cost.
//!
//! Reservoir and run inputs carry invariants that formulas downstream rely
//! on without rechecking: a reference length is strictly positive, an
//! interporosity coefficient is non-negative, a storativity ratio lies in
//! the lower-open unit interval (0, 1]. This module expresses those
//! invariants at the type level: a [`Constrained<T, C>`] is constructed
//! once, checked once, and is thereafter known to satisfy its marker
//! constraint `C`.
//!
//! Provided markers:
//!
//! - [`StrictlyPositive`]: greater than zero
//! - [`NonNegative`]: zero or greater
//! - [`UnitIntervalLowerOpen`]: `0 < x <= 1`
//!
//! Each marker also provides an associated `new()` constructor, e.g.
//! `StrictlyPositive::new(5.0)`.

use std::{cmp::Ordering, marker::PhantomData};

use num_traits::{One, Zero};
use thiserror::Error;

/// A trait for enforcing numeric invariants at construction time.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the
    /// constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// A result type alias to use with [`Constraint`].
pub type ConstraintResult<T, E = ConstraintError> = Result<T, E>;

/// A wrapper enforcing a numeric constraint at construction time.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

/// Marker type enforcing that a value is strictly greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or `NaN`.
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Marker type enforcing that a value is zero or greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or `NaN`.
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Marker type enforcing membership in the lower-open unit interval
/// `0 < x <= 1`.
///
/// Storativity ratios live here: a ratio of 1 collapses to single
/// porosity, a ratio of 0 would leave the fracture system with no storage
/// at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitIntervalLowerOpen;

impl UnitIntervalLowerOpen {
    /// Constructs a [`Constrained<T, UnitIntervalLowerOpen>`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value is outside `(0, 1]` or `NaN`.
    pub fn new<T: PartialOrd + Zero + One>(
        value: T,
    ) -> Result<Constrained<T, UnitIntervalLowerOpen>, ConstraintError> {
        Constrained::new(value)
    }
}

impl<T: PartialOrd + Zero + One> Constraint<T> for UnitIntervalLowerOpen {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => {}
            Some(Ordering::Equal) => return Err(ConstraintError::Zero),
            Some(Ordering::Less) => return Err(ConstraintError::Negative),
            None => return Err(ConstraintError::NotANumber),
        }
        match value.partial_cmp(&T::one()) {
            Some(Ordering::Less | Ordering::Equal) => Ok(()),
            Some(Ordering::Greater) => Err(ConstraintError::AboveMaximum),
            None => Err(ConstraintError::NotANumber),
        }
    }
}
