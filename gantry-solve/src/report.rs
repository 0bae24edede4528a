use std::fmt;

use crate::optimizer::Outcome;

/// Diagnostics of a solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    /// Whether the optimizer converged to a feasible point.
    pub success: bool,
    pub message: String,
    /// Objective evaluations performed.
    pub iterations: usize,
    /// Objective value at the returned state.
    pub objective: f64,
}

impl From<Outcome> for Report {
    fn from(outcome: Outcome) -> Self {
        Self {
            success: outcome.success,
            message: outcome.message,
            iterations: outcome.iterations,
            objective: outcome.objective,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "success: {}", self.success)?;
        writeln!(f, "message: {}", self.message)?;
        writeln!(f, "iterations: {}", self.iterations)?;
        write!(f, "objective: {}", self.objective)
    }
}
