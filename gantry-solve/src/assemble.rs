//! Constraint and bound assembly.
//!
//! Turns a system and a problem into the flat inputs an optimizer works on:
//! the relations to enforce, the free variables with their box bounds, and
//! the starting point.

use gantry_core::{Relation, System, bounds, to_vector};
use tracing::debug;

use crate::error::Error;

/// Collects every relation a solve must enforce.
///
/// Declared relations come first, in declaration order, followed by the
/// problem's explicit constraints in insertion order.
pub(crate) fn gather<'a, S>(
    declared: &'a [Relation<S>],
    explicit: &'a [Relation<S>],
) -> Vec<&'a Relation<S>> {
    declared.iter().chain(explicit).collect()
}

/// Maps between the full field vector and the optimizer's free variables.
///
/// Fields whose bounds pin them (lower == upper, as for constants) stay
/// fixed at that value and are left out of the optimizer vector.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Layout {
    full: Vec<f64>,
    free: Vec<usize>,
    bounds: Vec<(f64, f64)>,
}

impl Layout {
    /// Builds the layout, clamping the starting point into the box.
    pub(crate) fn new<S: System>(system: &S) -> Result<Self, Error> {
        let mut full = to_vector(system);
        let all_bounds = bounds(system);

        let mut free = Vec::new();
        let mut free_bounds = Vec::new();

        for (index, (value, &(lower, upper))) in full.iter_mut().zip(&all_bounds).enumerate() {
            let field = S::FIELDS[index];

            if lower > upper || lower.is_nan() || upper.is_nan() {
                return Err(Error::InvalidBounds {
                    field,
                    lower,
                    upper,
                });
            }

            #[allow(clippy::float_cmp)]
            if lower == upper {
                debug!(field, value = lower, "field pinned");
                *value = lower;
                continue;
            }

            let clamped = value.max(lower).min(upper);
            #[allow(clippy::float_cmp)]
            if clamped != *value {
                debug!(field, from = *value, to = clamped, "start clamped into bounds");
                *value = clamped;
            }

            free.push(index);
            free_bounds.push((lower, upper));
        }

        Ok(Self {
            full,
            free,
            bounds: free_bounds,
        })
    }

    /// Number of variables the optimizer sees.
    pub(crate) fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Starting point of the free variables.
    pub(crate) fn x0(&self) -> Vec<f64> {
        self.free.iter().map(|&i| self.full[i]).collect()
    }

    /// Box bounds of the free variables.
    pub(crate) fn bounds(&self) -> Vec<(f64, f64)> {
        self.bounds.clone()
    }

    /// Expands free variables back into a full field vector.
    pub(crate) fn expand(&self, x: &[f64]) -> Vec<f64> {
        let mut full = self.full.clone();
        for (&index, &value) in self.free.iter().zip(x) {
            full[index] = value;
        }
        full
    }
}
