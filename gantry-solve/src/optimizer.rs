mod cobyla;
mod slsqp;

use std::{fmt, str::FromStr};

pub use cobyla::Cobyla;
pub use slsqp::Slsqp;

use crate::error::Error;

/// A nonlinear constraint `lower <= function(x) <= upper`.
///
/// Infinite limits disable that side; equal limits make an equality.
pub struct Constraint<'a> {
    pub lower: f64,
    pub upper: f64,
    pub function: Box<dyn Fn(&[f64]) -> f64 + 'a>,
}

impl Constraint<'_> {
    /// Returns how far `function(x)` lies outside `[lower, upper]`.
    #[must_use]
    pub fn violation(&self, x: &[f64]) -> f64 {
        let value = (self.function)(x);
        (self.lower - value).max(value - self.upper).max(0.0)
    }
}

/// Everything an optimizer needs for one run.
pub struct Task<'a> {
    /// Scalar objective to minimize.
    pub objective: &'a dyn Fn(&[f64]) -> f64,
    /// Starting point, inside `bounds`.
    pub x0: Vec<f64>,
    /// Per-variable `(lower, upper)` box bounds; infinities mean unbounded.
    pub bounds: Vec<(f64, f64)>,
    pub constraints: Vec<Constraint<'a>>,
}

/// The result of an optimizer run.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Best point found, feasible or not.
    pub x: Vec<f64>,
    pub success: bool,
    pub message: String,
    /// Objective evaluations performed.
    pub iterations: usize,
    /// Objective value at `x`.
    pub objective: f64,
}

/// A constrained nonlinear minimizer.
///
/// Implementations run exactly once per call and never fail outright:
/// infeasibility or non-convergence is reported through
/// [`Outcome::success`].
pub trait Optimizer {
    /// Checks the optimizer's settings before a run.
    ///
    /// # Errors
    ///
    /// Returns a static reason if a setting is invalid.
    fn validate(&self) -> Result<(), &'static str> {
        Ok(())
    }

    /// Minimizes the task's objective subject to its bounds and constraints.
    fn minimize(&self, task: Task<'_>) -> Outcome;
}

/// The built-in optimizer methods.
///
/// The default is [`Method::SequentialQuadratic`] with default settings.
/// Methods also parse from their names, `"sequential-quadratic"` and
/// `"linear-approximation"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method {
    /// Sequential least-squares quadratic programming, see [`Slsqp`].
    SequentialQuadratic(Slsqp),
    /// Constrained optimization by linear approximations, see [`Cobyla`].
    LinearApproximation(Cobyla),
}

impl Method {
    /// The method's name, as accepted by [`FromStr`].
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Method::SequentialQuadratic(_) => "sequential-quadratic",
            Method::LinearApproximation(_) => "linear-approximation",
        }
    }
}

impl Default for Method {
    fn default() -> Self {
        Method::SequentialQuadratic(Slsqp::default())
    }
}

impl From<Slsqp> for Method {
    fn from(settings: Slsqp) -> Self {
        Method::SequentialQuadratic(settings)
    }
}

impl From<Cobyla> for Method {
    fn from(settings: Cobyla) -> Self {
        Method::LinearApproximation(settings)
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "sequential-quadratic" | "slsqp" => Ok(Slsqp::default().into()),
            "linear-approximation" | "cobyla" => Ok(Cobyla::default().into()),
            _ => Err(Error::UnknownMethod(name.to_owned())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Optimizer for Method {
    fn validate(&self) -> Result<(), &'static str> {
        match self {
            Method::SequentialQuadratic(slsqp) => slsqp.validate(),
            Method::LinearApproximation(cobyla) => cobyla.validate(),
        }
    }

    fn minimize(&self, task: Task<'_>) -> Outcome {
        match self {
            Method::SequentialQuadratic(slsqp) => slsqp.minimize(task),
            Method::LinearApproximation(cobyla) => cobyla.minimize(task),
        }
    }
}

/// Which limit of a two-sided constraint an inequality enforces.
#[derive(Debug, Clone, Copy)]
enum Side {
    Lower(f64),
    Upper(f64),
}

impl Side {
    /// The inequality value, non-negative when this side holds.
    fn slack(self, value: f64) -> f64 {
        match self {
            Side::Lower(lower) => value - lower,
            Side::Upper(upper) => upper - value,
        }
    }

    /// Derivative of [`Side::slack`] with respect to the constraint value.
    fn sign(self) -> f64 {
        match self {
            Side::Lower(_) => 1.0,
            Side::Upper(_) => -1.0,
        }
    }
}

/// Splits two-sided constraints into one-sided `c(x) >= 0` inequalities.
///
/// Infinite limits are dropped; an equality yields two opposing sides.
fn one_sided<'c, 'a>(constraints: &'c [Constraint<'a>]) -> Vec<(&'c Constraint<'a>, Side)> {
    constraints
        .iter()
        .flat_map(|c| {
            let lower = c.lower.is_finite().then_some((c, Side::Lower(c.lower)));
            let upper = c.upper.is_finite().then_some((c, Side::Upper(c.upper)));
            lower.into_iter().chain(upper)
        })
        .collect()
}

/// What a backend reports after its run, before grading.
struct Run {
    converged: bool,
    status: String,
    x: Vec<f64>,
    objective: f64,
    evaluations: usize,
}

/// Grades a finished run against the evaluation budget and feasibility.
fn grade(
    run: Run,
    constraints: &[Constraint<'_>],
    max_evals: usize,
    feasibility_tol: f64,
) -> Outcome {
    let violation = constraints
        .iter()
        .map(|c| c.violation(&run.x))
        .fold(0.0, f64::max);

    let (success, message) = if !run.converged {
        (false, format!("optimizer failed: {}", run.status))
    } else if run.evaluations >= max_evals {
        (false, format!("evaluation budget of {max_evals} exhausted"))
    } else if violation > feasibility_tol {
        (
            false,
            format!("{}, but constraints are violated by {violation:e}", run.status),
        )
    } else {
        (true, run.status)
    };

    Outcome {
        x: run.x,
        success,
        message,
        iterations: run.evaluations,
        objective: run.objective,
    }
}
