//! Dimensioned quantities, relations and system declarations for Gantry.
//!
//! A system is a plain struct of [`Quantity`] and `f64` fields describing one
//! design point. Relations compare expressions over a system and evaluate to
//! signed residuals, and [`to_vector`]/[`from_vector`] move a system in and
//! out of the flat numeric form a solver works with.

mod error;
mod quantity;
mod relation;
mod render;
mod system;
mod unit;
mod value;
mod vector;

pub use error::{DimensionalityError, Error, ShapeError, UnitError};
pub use quantity::Quantity;
pub use relation::{Operand, PairFn, Relation, RelationKind};
pub use render::{render, write_system};
pub use system::System;
pub use unit::{Dimension, Unit};
pub use value::{Field, IntoValue, Magnitude, Value, magnitude};
pub use vector::{bounds, from_vector, to_vector};
