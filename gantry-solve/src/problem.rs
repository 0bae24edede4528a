use gantry_core::{IntoValue, Magnitude, Relation, Value};
use tracing::warn;

/// A function of the system state producing a number or quantity.
pub type StateFn<S> = Box<dyn Fn(&S) -> Result<Value, gantry_core::Error>>;

fn boxed<S, F, R>(f: F) -> StateFn<S>
where
    F: Fn(&S) -> R + 'static,
    R: IntoValue,
{
    Box::new(move |state| f(state).into_value())
}

/// One argument of a problem: a relation or a bare residual function.
///
/// Relations become hard constraints. Bare functions are soft terms: when no
/// explicit objective is set, the solver minimizes the mean of their squares.
pub enum Term<S> {
    Relation(Relation<S>),
    Residual(StateFn<S>),
}

impl<S> Term<S> {
    /// Wraps a bare residual function.
    pub fn residual<F, R>(f: F) -> Self
    where
        F: Fn(&S) -> R + 'static,
        R: IntoValue,
    {
        Term::Residual(boxed(f))
    }
}

impl<S> From<Relation<S>> for Term<S> {
    fn from(relation: Relation<S>) -> Self {
        Term::Relation(relation)
    }
}

/// What a solve should achieve: an objective plus extra constraints.
///
/// Relations declared on the system type are always added by the solver and
/// need not be repeated here.
pub struct Problem<S> {
    objective: Option<StateFn<S>>,
    residuals: Vec<StateFn<S>>,
    constraints: Vec<Relation<S>>,
}

impl<S> Problem<S> {
    /// A pure feasibility search: the objective is constant zero.
    #[must_use]
    pub fn feasibility() -> Self {
        Self {
            objective: None,
            residuals: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Minimizes the magnitude of `objective`.
    pub fn minimize<F, R>(objective: F) -> Self
    where
        F: Fn(&S) -> R + 'static,
        R: IntoValue,
    {
        Self {
            objective: Some(boxed(objective)),
            ..Self::feasibility()
        }
    }

    /// Builds a problem from mixed terms.
    ///
    /// Relations are collected as constraints; bare functions as residuals.
    pub fn from_terms(terms: impl IntoIterator<Item = Term<S>>) -> Self {
        terms
            .into_iter()
            .fold(Self::feasibility(), |problem, term| problem.term(term))
    }

    /// Adds a term.
    #[must_use]
    pub fn term(self, term: Term<S>) -> Self {
        match term {
            Term::Relation(relation) => self.subject_to(relation),
            Term::Residual(f) => {
                let mut next = self;
                next.residuals.push(f);
                next
            }
        }
    }

    /// Adds a soft residual term.
    #[must_use]
    pub fn residual<F, R>(self, f: F) -> Self
    where
        F: Fn(&S) -> R + 'static,
        R: IntoValue,
    {
        self.term(Term::residual(f))
    }

    /// Adds a hard constraint.
    #[must_use]
    pub fn subject_to(mut self, relation: Relation<S>) -> Self {
        self.constraints.push(relation);
        self
    }

    /// Adds several hard constraints.
    #[must_use]
    pub fn subject_to_all(mut self, relations: impl IntoIterator<Item = Relation<S>>) -> Self {
        self.constraints.extend(relations);
        self
    }

    /// The explicit constraints, in insertion order.
    #[must_use]
    pub fn constraints(&self) -> &[Relation<S>] {
        &self.constraints
    }

    /// Resolves which objective the solver should minimize.
    pub(crate) fn objective(&self) -> Objective<'_, S> {
        match (&self.objective, self.residuals.as_slice()) {
            (Some(f), rest) => {
                if !rest.is_empty() {
                    warn!(
                        ignored = rest.len(),
                        "explicit objective set, ignoring residual terms"
                    );
                }
                Objective::Explicit(f)
            }
            (None, []) => Objective::Feasibility,
            (None, residuals) => Objective::LeastSquares(residuals),
        }
    }
}

impl<S> Default for Problem<S> {
    fn default() -> Self {
        Self::feasibility()
    }
}

/// The scalar objective a solve minimizes.
pub(crate) enum Objective<'a, S> {
    Explicit(&'a StateFn<S>),
    LeastSquares(&'a [StateFn<S>]),
    Feasibility,
}

impl<S> Objective<'_, S> {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Objective::Explicit(_) => "explicit",
            Objective::LeastSquares(_) => "least_squares",
            Objective::Feasibility => "feasibility",
        }
    }

    /// Evaluates the objective at a state.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn value(&self, state: &S) -> Result<f64, gantry_core::Error> {
        match self {
            Objective::Explicit(f) => Ok(f(state)?.magnitude()),
            Objective::LeastSquares(residuals) => {
                let mut sum = 0.0;
                for f in *residuals {
                    let r = f(state)?.magnitude();
                    sum += r * r;
                }
                Ok(sum / residuals.len() as f64)
            }
            Objective::Feasibility => Ok(0.0),
        }
    }
}
