use std::cell::Cell;

use ::cobyla::{Func, RhoBeg, StopTols, minimize};

use super::{Optimizer, Outcome, Run, Task, grade, one_sided};

/// Derivative-free constrained minimization by linear approximations.
///
/// Delegates to the `cobyla` crate. Equality constraints are passed as a
/// pair of opposing inequalities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cobyla {
    /// Budget of objective evaluations.
    pub max_evals: usize,
    /// Initial trust-region radius, in the variables' own units.
    pub rho_begin: f64,
    /// Relative tolerance on the variables.
    pub xtol_rel: f64,
    /// Absolute tolerance on each variable.
    pub xtol_abs: f64,
    /// Largest constraint violation still reported as a success.
    pub feasibility_tol: f64,
}

impl Default for Cobyla {
    fn default() -> Self {
        Self {
            max_evals: 1000,
            rho_begin: 0.5,
            xtol_rel: 1e-10,
            xtol_abs: 1e-12,
            feasibility_tol: 1e-6,
        }
    }
}

impl Optimizer for Cobyla {
    fn validate(&self) -> Result<(), &'static str> {
        if self.max_evals == 0 {
            return Err("max_evals must be positive");
        }
        if !self.rho_begin.is_finite() || self.rho_begin <= 0.0 {
            return Err("rho_begin must be finite and positive");
        }
        if !self.xtol_rel.is_finite() || self.xtol_rel < 0.0 {
            return Err("xtol_rel must be finite and non-negative");
        }
        if !self.xtol_abs.is_finite() || self.xtol_abs < 0.0 {
            return Err("xtol_abs must be finite and non-negative");
        }
        if !self.feasibility_tol.is_finite() || self.feasibility_tol < 0.0 {
            return Err("feasibility_tol must be finite and non-negative");
        }
        Ok(())
    }

    fn minimize(&self, task: Task<'_>) -> Outcome {
        let evals = Cell::new(0usize);
        let objective = |x: &[f64], _: &mut ()| {
            evals.set(evals.get() + 1);
            (task.objective)(x)
        };

        // COBYLA wants every constraint in the form c(x) >= 0.
        let sides = one_sided(&task.constraints);
        let inequalities: Vec<_> = sides
            .iter()
            .map(|&(c, side)| move |x: &[f64], _: &mut ()| side.slack((c.function)(x)))
            .collect();
        let cons: Vec<&dyn Func<()>> = inequalities.iter().map(|f| f as &dyn Func<()>).collect();

        let stop_tol = StopTols {
            ftol_rel: 0.0,
            ftol_abs: 0.0,
            xtol_rel: self.xtol_rel,
            xtol_abs: vec![self.xtol_abs; task.x0.len()],
        };

        let result = minimize(
            objective,
            &task.x0,
            &task.bounds,
            &cons,
            (),
            self.max_evals,
            RhoBeg::All(self.rho_begin),
            Some(stop_tol),
        );

        let (converged, status, x, objective) = match result {
            Ok((status, x, y)) => (true, format!("{status:?}"), x, y),
            Err((status, x, y)) => (false, format!("{status:?}"), x, y),
        };
        let run = Run {
            converged,
            status,
            x,
            objective,
            evaluations: evals.get(),
        };

        grade(run, &task.constraints, self.max_evals, self.feasibility_tol)
    }
}
