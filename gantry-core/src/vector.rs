//! Conversion between structured systems and flat numeric vectors.
//!
//! The vector layout is the field declaration order of the system type. Units,
//! bounds and constant-ness never enter the vector; they are re-attached from
//! a template state when converting back.

use crate::{error::ShapeError, system::System};

/// Extracts every field's magnitude in declaration order.
pub fn to_vector<S: System>(system: &S) -> Vec<f64> {
    system.magnitudes()
}

/// Rebuilds a state shaped like `template` from a flat vector.
///
/// Each quantity field takes its unit, bounds and constant flag from the
/// template; plain-number fields take the value unchanged.
///
/// # Errors
///
/// Returns a [`ShapeError`] if `values` does not hold exactly one entry per
/// field.
pub fn from_vector<S: System>(template: &S, values: &[f64]) -> Result<S, ShapeError> {
    let expected = S::FIELDS.len();
    if values.len() != expected {
        return Err(ShapeError {
            expected,
            actual: values.len(),
        });
    }
    Ok(template.rehydrate(&mut values.iter().copied()))
}

/// Returns the per-field box bounds in declaration order.
///
/// Missing bounds are reported as infinities; plain numbers are unbounded.
pub fn bounds<S: System>(system: &S) -> Vec<(f64, f64)> {
    system.bounds()
}
