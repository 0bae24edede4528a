use std::cell::Cell;

use ::slsqp::{Func, StopTols, minimize};

use super::{Optimizer, Outcome, Run, Task, grade, one_sided};

/// Gradient-based constrained minimization by sequential quadratic programming.
///
/// Delegates to the `slsqp` crate. Gradients of the objective and of every
/// constraint are estimated by forward differences, stepping backwards at an
/// upper bound so every evaluation stays inside the box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slsqp {
    /// Budget of objective evaluations, excluding difference steps.
    pub max_evals: usize,
    /// Relative tolerance on the objective; zero disables it.
    pub ftol_rel: f64,
    /// Relative tolerance on the variables.
    pub xtol_rel: f64,
    /// Absolute tolerance on each variable.
    pub xtol_abs: f64,
    /// Relative step for finite-difference gradients.
    pub fd_step: f64,
    /// Largest constraint violation still reported as a success.
    pub feasibility_tol: f64,
}

impl Default for Slsqp {
    fn default() -> Self {
        Self {
            max_evals: 1000,
            ftol_rel: 0.0,
            xtol_rel: 1e-10,
            xtol_abs: 1e-12,
            fd_step: f64::EPSILON.sqrt(),
            feasibility_tol: 1e-6,
        }
    }
}

impl Optimizer for Slsqp {
    fn validate(&self) -> Result<(), &'static str> {
        if self.max_evals == 0 {
            return Err("max_evals must be positive");
        }
        if !self.ftol_rel.is_finite() || self.ftol_rel < 0.0 {
            return Err("ftol_rel must be finite and non-negative");
        }
        if !self.xtol_rel.is_finite() || self.xtol_rel < 0.0 {
            return Err("xtol_rel must be finite and non-negative");
        }
        if !self.xtol_abs.is_finite() || self.xtol_abs < 0.0 {
            return Err("xtol_abs must be finite and non-negative");
        }
        if !self.fd_step.is_finite() || self.fd_step <= 0.0 {
            return Err("fd_step must be finite and positive");
        }
        if !self.feasibility_tol.is_finite() || self.feasibility_tol < 0.0 {
            return Err("feasibility_tol must be finite and non-negative");
        }
        Ok(())
    }

    fn minimize(&self, task: Task<'_>) -> Outcome {
        let step = self.fd_step;
        let bounds = &task.bounds;

        let evals = Cell::new(0usize);
        let objective = |x: &[f64], grad: Option<&mut [f64]>, _: &mut ()| {
            evals.set(evals.get() + 1);
            let value = (task.objective)(x);
            if let Some(grad) = grad {
                difference(task.objective, x, value, bounds, step, grad);
            }
            value
        };

        // SLSQP wants every constraint in the form c(x) >= 0.
        let sides = one_sided(&task.constraints);
        let inequalities: Vec<_> = sides
            .iter()
            .map(|&(c, side)| {
                move |x: &[f64], grad: Option<&mut [f64]>, _: &mut ()| {
                    let value = (c.function)(x);
                    if let Some(grad) = grad {
                        difference(&*c.function, x, value, bounds, step, grad);
                        grad.iter_mut().for_each(|g| *g *= side.sign());
                    }
                    side.slack(value)
                }
            })
            .collect();
        let cons: Vec<&dyn Func<()>> = inequalities.iter().map(|f| f as &dyn Func<()>).collect();

        let stop_tol = StopTols {
            ftol_rel: self.ftol_rel,
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

/// Fills `grad` with forward differences of `f` around `x`, where `fx = f(x)`.
///
/// A variable whose forward step would cross its upper bound is differenced
/// backwards instead.
fn difference(
    f: &dyn Fn(&[f64]) -> f64,
    x: &[f64],
    fx: f64,
    bounds: &[(f64, f64)],
    rel_step: f64,
    grad: &mut [f64],
) {
    let mut shifted = x.to_vec();
    for (i, g) in grad.iter_mut().enumerate() {
        let h = rel_step * x[i].abs().max(1.0);
        let h = if x[i] + h > bounds[i].1 { -h } else { h };
        shifted[i] = x[i] + h;
        *g = (f(&shifted) - fx) / h;
        shifted[i] = x[i];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::optimizer::Constraint;

    #[test]
    fn minimizes_a_bounded_paraboloid() {
        let objective = |x: &[f64]| (x[0] - 3.0).powi(2) + (x[1] + 1.0).powi(2);
        let task = Task {
            objective: &objective,
            x0: vec![0.0, 0.0],
            bounds: vec![(f64::NEG_INFINITY, 2.0), (-5.0, 5.0)],
            constraints: Vec::new(),
        };

        let outcome = Slsqp::default().minimize(task);

        assert!(outcome.success, "{}", outcome.message);
        assert_relative_eq!(outcome.x[0], 2.0, epsilon = 1e-6);
        assert_relative_eq!(outcome.x[1], -1.0, epsilon = 1e-5);
        assert!(outcome.iterations > 0);
    }

    #[test]
    fn honours_equality_constraints() {
        // Minimize x^2 + y^2 subject to x + y = 2.
        let objective = |x: &[f64]| x[0] * x[0] + x[1] * x[1];
        let task = Task {
            objective: &objective,
            x0: vec![3.0, 0.0],
            bounds: vec![(f64::NEG_INFINITY, f64::INFINITY); 2],
            constraints: vec![Constraint {
                lower: 0.0,
                upper: 0.0,
                function: Box::new(|x| x[0] + x[1] - 2.0),
            }],
        };

        let outcome = Slsqp::default().minimize(task);

        assert!(outcome.success, "{}", outcome.message);
        assert_relative_eq!(outcome.x[0], 1.0, epsilon = 1e-5);
        assert_relative_eq!(outcome.x[1], 1.0, epsilon = 1e-5);
        assert_relative_eq!(outcome.objective, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn reports_infeasible_problems_without_failing() {
        // x >= 2 and x <= 1 cannot both hold.
        let objective = |_: &[f64]| 0.0;
        let task = Task {
            objective: &objective,
            x0: vec![1.5],
            bounds: vec![(f64::NEG_INFINITY, f64::INFINITY)],
            constraints: vec![
                Constraint {
                    lower: 0.0,
                    upper: f64::INFINITY,
                    function: Box::new(|x| x[0] - 2.0),
                },
                Constraint {
                    lower: f64::NEG_INFINITY,
                    upper: 0.0,
                    function: Box::new(|x| x[0] - 1.0),
                },
            ],
        };

        let outcome = Slsqp::default().minimize(task);

        assert!(!outcome.success);
        assert_eq!(outcome.x.len(), 1);
    }

    #[test]
    fn validates_settings() {
        assert!(Slsqp::default().validate().is_ok());

        let bad = Slsqp {
            fd_step: 0.0,
            ..Slsqp::default()
        };
        assert!(bad.validate().is_err());

        let bad = Slsqp {
            max_evals: 0,
            ..Slsqp::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn differences_approximate_the_gradient() {
        let f = |x: &[f64]| 3.0 * x[0] * x[0] + x[1];
        let x = [2.0, -1.0];
        let mut grad = [0.0; 2];

        let bounds = [(f64::NEG_INFINITY, f64::INFINITY); 2];
        difference(&f, &x, f(&x), &bounds, 1e-7, &mut grad);

        assert_relative_eq!(grad[0], 12.0, epsilon = 1e-4);
        assert_relative_eq!(grad[1], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn differences_step_backwards_at_an_upper_bound() {
        let f = |x: &[f64]| {
            assert!(x[0] <= 1.0, "stepped outside the box");
            x[0] * x[0]
        };
        let x = [1.0];
        let mut grad = [0.0];

        difference(&f, &x, f(&x), &[(0.0, 1.0)], 1e-7, &mut grad);

        assert_relative_eq!(grad[0], 2.0, epsilon = 1e-5);
    }
}
