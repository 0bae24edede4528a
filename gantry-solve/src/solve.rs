use std::cell::RefCell;

use gantry_core::{Relation, ShapeError, System, from_vector};
use tracing::{info, warn};

use crate::{
    assemble::{Layout, gather},
    error::Error,
    optimizer::{Constraint, Optimizer, Task},
    problem::{Objective, Problem},
    report::Report,
};

/// Residual tolerance used when every field is pinned and no optimizer runs.
const PINNED_TOL: f64 = 1e-9;

/// Extension trait exposing [`solve`] as a method on every [`System`].
pub trait Solve: System {
    /// Solves `problem` for this system with the given optimizer.
    ///
    /// # Errors
    ///
    /// See [`solve`].
    fn solve<O>(&self, problem: &Problem<Self>, optimizer: &O) -> Result<(Self, Report), Error>
    where
        O: Optimizer + ?Sized,
    {
        solve(self, problem, optimizer)
    }
}

impl<S: System> Solve for S {}

/// Finds a state satisfying every relation, minimizing the problem's objective.
///
/// The objective is, in order of precedence: the problem's explicit
/// objective; the mean of the squared residual terms; or zero. Constraints
/// are the relations declared on `S` followed by the problem's explicit
/// constraints. Field bounds become box bounds.
///
/// The optimizer runs once. The returned state is always a fresh value built
/// from `system`; if the optimizer does not converge the best point found is
/// returned with `report.success == false`.
///
/// # Errors
///
/// Returns an error if the optimizer settings or field bounds are invalid,
/// or if evaluating the objective or a relation fails.
pub fn solve<S, O>(
    system: &S,
    problem: &Problem<S>,
    optimizer: &O,
) -> Result<(S, Report), Error>
where
    S: System,
    O: Optimizer + ?Sized,
{
    optimizer
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let layout = Layout::new(system)?;
    let declared = S::relations();
    let relations = gather(&declared, problem.constraints());
    let objective = problem.objective();

    info!(
        event = "solve_start",
        fields = S::FIELDS.len(),
        free = layout.free_count(),
        constraints = relations.len(),
        objective = objective.label(),
    );

    let eval = Evaluator::new(system, &layout);

    // Structural failures, such as mixed units, show up at the start point.
    let start = eval.state(&layout.x0())?;
    let (start_objective, violated) = check(&start, &objective, &relations)?;

    if layout.free_count() == 0 {
        return Ok((start, pinned_report(start_objective, violated)));
    }

    let objective_fn = |x: &[f64]| eval.objective(&objective, x);
    let constraints = relations
        .iter()
        .enumerate()
        .map(|(index, &relation)| {
            let (lower, upper) = relation.kind().interval();
            let eval = &eval;
            Constraint {
                lower,
                upper,
                function: Box::new(move |x: &[f64]| eval.residual(index, relation, x)),
            }
        })
        .collect();

    let outcome = optimizer.minimize(Task {
        objective: &objective_fn,
        x0: layout.x0(),
        bounds: layout.bounds(),
        constraints,
    });

    if let Some((context, source)) = eval.take_failure() {
        return Err(Error::Evaluation { context, source });
    }
    if outcome.x.len() != layout.free_count() {
        return Err(Error::OptimizerShape {
            expected: layout.free_count(),
            actual: outcome.x.len(),
        });
    }

    let solved = from_vector(system, &layout.expand(&outcome.x))?;
    let report = Report::from(outcome);

    info!(
        event = "solve_end",
        success = report.success,
        iterations = report.iterations,
        objective = report.objective,
    );
    if !report.success {
        warn!(reason = %report.message, "solve did not converge");
    }

    Ok((solved, report))
}

/// Evaluates the objective and counts relations violated at `state`.
fn check<S>(
    state: &S,
    objective: &Objective<'_, S>,
    relations: &[&Relation<S>],
) -> Result<(f64, usize), Error> {
    let value = objective
        .value(state)
        .map_err(|source| Error::Evaluation {
            context: "objective".to_owned(),
            source,
        })?;

    let mut violated = 0;
    for (index, relation) in relations.iter().enumerate() {
        let satisfied = relation
            .is_satisfied(state, PINNED_TOL)
            .map_err(|source| Error::Evaluation {
                context: relation_context(index, relation),
                source,
            })?;
        if !satisfied {
            violated += 1;
        }
    }

    Ok((value, violated))
}

/// Reports on a system with no free variables, where no optimizer runs.
fn pinned_report(objective: f64, violated: usize) -> Report {
    let report = Report {
        success: violated == 0,
        message: if violated == 0 {
            "all fields pinned".to_owned()
        } else {
            format!("all fields pinned, {violated} relation(s) violated")
        },
        iterations: 0,
        objective,
    };
    info!(event = "solve_end", success = report.success, iterations = 0);
    report
}

fn relation_context<S>(index: usize, relation: &Relation<S>) -> String {
    match relation.name() {
        Some(name) => format!("relation `{name}`"),
        None => format!("relation #{index}"),
    }
}

/// Rehydrates candidate vectors and evaluates the problem against them.
///
/// The optimizer cannot carry errors, so the first failure is stored and the
/// failing evaluation returns NaN; the solve reports the failure afterwards.
struct Evaluator<'a, S> {
    template: &'a S,
    layout: &'a Layout,
    failure: RefCell<Option<(String, gantry_core::Error)>>,
}

impl<'a, S: System> Evaluator<'a, S> {
    fn new(template: &'a S, layout: &'a Layout) -> Self {
        Self {
            template,
            layout,
            failure: RefCell::new(None),
        }
    }

    fn state(&self, x: &[f64]) -> Result<S, ShapeError> {
        from_vector(self.template, &self.layout.expand(x))
    }

    fn objective(&self, objective: &Objective<'_, S>, x: &[f64]) -> f64 {
        let result = self
            .state(x)
            .map_err(gantry_core::Error::from)
            .and_then(|state| objective.value(&state));
        self.settle(result, || "objective".to_owned())
    }

    fn residual(&self, index: usize, relation: &Relation<S>, x: &[f64]) -> f64 {
        let result = self
            .state(x)
            .map_err(gantry_core::Error::from)
            .and_then(|state| relation.residual(&state));
        self.settle(result, || relation_context(index, relation))
    }

    fn settle(
        &self,
        result: Result<f64, gantry_core::Error>,
        context: impl FnOnce() -> String,
    ) -> f64 {
        match result {
            Ok(value) => value,
            Err(error) => {
                let mut failure = self.failure.borrow_mut();
                if failure.is_none() {
                    *failure = Some((context(), error));
                }
                f64::NAN
            }
        }
    }

    fn take_failure(&self) -> Option<(String, gantry_core::Error)> {
        self.failure.borrow_mut().take()
    }
}
