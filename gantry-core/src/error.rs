use thiserror::Error;

use crate::unit::{Dimension, Unit};

/// Two quantities or units do not share the same dimensionality.
///
/// Raised when adding, subtracting or converting across dimensions, and when
/// a relation compares quantities of different kinds.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("incompatible dimensionality: `{lhs}` ({lhs_dimension}) vs `{rhs}` ({rhs_dimension})")]
pub struct DimensionalityError {
    pub lhs: String,
    pub lhs_dimension: Dimension,
    pub rhs: String,
    pub rhs_dimension: Dimension,
}

impl DimensionalityError {
    pub(crate) fn new(lhs: &Unit, rhs: &Unit) -> Self {
        Self {
            lhs: lhs.symbol().to_owned(),
            lhs_dimension: lhs.dimension(),
            rhs: rhs.symbol().to_owned(),
            rhs_dimension: rhs.dimension(),
        }
    }
}

/// A numeric vector does not match the shape of a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected a vector of {expected} values, got {actual}")]
pub struct ShapeError {
    pub expected: usize,
    pub actual: usize,
}

/// A unit symbol could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("unknown unit symbol `{0}`")]
    Unknown(String),

    #[error("malformed unit expression `{expression}`: {reason}")]
    Malformed {
        expression: String,
        reason: &'static str,
    },
}

/// Any error raised while building or evaluating quantities and relations.
///
/// Closures passed to relations and the bodies of declared relation methods
/// return this type, so `?` works on every fallible operation in the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Dimensionality(#[from] DimensionalityError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Unit(#[from] UnitError),
}
