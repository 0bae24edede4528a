use thiserror::Error;

use gantry_core::ShapeError;

/// Errors that abort a solve.
///
/// A solve that runs but fails to converge is not an error; it returns a
/// [`Report`](crate::Report) with `success == false`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown optimizer method `{0}`")]
    UnknownMethod(String),

    #[error("invalid optimizer config: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("field `{field}` has empty bounds [{lower}, {upper}]")]
    InvalidBounds {
        field: &'static str,
        lower: f64,
        upper: f64,
    },

    #[error("optimizer returned {actual} values for {expected} free variables")]
    OptimizerShape { expected: usize, actual: usize },

    #[error("failed to evaluate {context}")]
    Evaluation {
        context: String,
        #[source]
        source: gantry_core::Error,
    },

    #[error(transparent)]
    Shape(#[from] ShapeError),
}
