use std::{borrow::Cow, fmt};

use crate::{
    error::{DimensionalityError, Error},
    value::{IntoValue, Magnitude, Value},
};

/// The comparison a relation asserts between its sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// `lhs == rhs`, satisfied at residual 0.
    Equation,
    /// `lhs <= rhs`, satisfied at residual <= 0.
    LessThan,
    /// `lhs >= rhs`, satisfied at residual >= 0.
    GreaterThan,
}

impl RelationKind {
    /// Returns the interval the residual must fall in.
    #[must_use]
    pub fn interval(self) -> (f64, f64) {
        match self {
            RelationKind::Equation => (0.0, 0.0),
            RelationKind::LessThan => (f64::NEG_INFINITY, 0.0),
            RelationKind::GreaterThan => (0.0, f64::INFINITY),
        }
    }

    /// Returns `true` if `residual` lies in the target interval, within `tol`.
    #[must_use]
    pub fn is_satisfied(self, residual: f64, tol: f64) -> bool {
        let (lower, upper) = self.interval();
        residual >= lower - tol && residual <= upper + tol
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RelationKind::Equation => "equation",
            RelationKind::LessThan => "less_than",
            RelationKind::GreaterThan => "greater_than",
        })
    }
}

type StateFn<S> = Box<dyn Fn(&S) -> Result<Value, Error>>;

/// The signature of a declared relation method: returns `(lhs, rhs)`.
pub type PairFn<S> = fn(&S) -> Result<(Value, Value), Error>;

/// One side of a relation: a fixed value or a function of the system state.
pub enum Operand<S> {
    Literal(Value),
    Function(StateFn<S>),
}

impl<S> Operand<S> {
    /// Wraps a function of the state.
    ///
    /// The function may return a number, a [`Quantity`](crate::Quantity), a
    /// [`Value`], or a `Result` of any of those.
    pub fn func<F, R>(f: F) -> Self
    where
        F: Fn(&S) -> R + 'static,
        R: IntoValue,
    {
        Operand::Function(Box::new(move |state| f(state).into_value()))
    }

    fn resolve(&self, state: &S) -> Result<Value, Error> {
        match self {
            Operand::Literal(value) => Ok(value.clone()),
            Operand::Function(f) => f(state),
        }
    }
}

impl<S> From<f64> for Operand<S> {
    fn from(value: f64) -> Self {
        Operand::Literal(Value::Number(value))
    }
}

impl<S> From<crate::Quantity> for Operand<S> {
    fn from(value: crate::Quantity) -> Self {
        Operand::Literal(Value::Quantity(value))
    }
}

impl<S> From<Value> for Operand<S> {
    fn from(value: Value) -> Self {
        Operand::Literal(value)
    }
}

impl<S> fmt::Debug for Operand<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Operand::Function(_) => f.write_str("Function(..)"),
        }
    }
}

enum Sides<S> {
    Operands { lhs: Operand<S>, rhs: Operand<S> },
    Declared(PairFn<S>),
}

/// An equality or inequality between two expressions over a system state.
///
/// Evaluating a relation yields the signed residual `lhs - rhs`, stripped of
/// units. When both sides are quantities the right side is first expressed in
/// the left side's unit, so `12 km` against `10000 m` gives a residual of 2.
///
/// ```
/// use gantry_core::{Quantity, Relation};
///
/// let a = Quantity::new(2.0, "m")?;
/// let b = Quantity::new(1.0, "s")?;
/// assert!(Relation::<()>::equal(a, b).is_err());
/// # Ok::<(), gantry_core::UnitError>(())
/// ```
pub struct Relation<S> {
    kind: RelationKind,
    name: Option<Cow<'static, str>>,
    sides: Sides<S>,
}

impl<S> Relation<S> {
    /// Creates a relation of the given kind.
    ///
    /// # Errors
    ///
    /// Returns a [`DimensionalityError`] if both operands are literal
    /// quantities of incompatible dimensionality.
    pub fn new(
        kind: RelationKind,
        lhs: impl Into<Operand<S>>,
        rhs: impl Into<Operand<S>>,
    ) -> Result<Self, DimensionalityError> {
        let (lhs, rhs) = (lhs.into(), rhs.into());

        if let (Operand::Literal(Value::Quantity(l)), Operand::Literal(Value::Quantity(r))) =
            (&lhs, &rhs)
        {
            if !l.is_compatible(r) {
                return Err(DimensionalityError::new(l.unit(), r.unit()));
            }
        }

        Ok(Self {
            kind,
            name: None,
            sides: Sides::Operands { lhs, rhs },
        })
    }

    /// Creates an equality relation, `lhs == rhs`.
    ///
    /// # Errors
    ///
    /// See [`Relation::new`].
    pub fn equal(
        lhs: impl Into<Operand<S>>,
        rhs: impl Into<Operand<S>>,
    ) -> Result<Self, DimensionalityError> {
        Self::new(RelationKind::Equation, lhs, rhs)
    }

    /// Creates an inequality relation, `lhs <= rhs`.
    ///
    /// # Errors
    ///
    /// See [`Relation::new`].
    pub fn less_than(
        lhs: impl Into<Operand<S>>,
        rhs: impl Into<Operand<S>>,
    ) -> Result<Self, DimensionalityError> {
        Self::new(RelationKind::LessThan, lhs, rhs)
    }

    /// Creates an inequality relation, `lhs >= rhs`.
    ///
    /// # Errors
    ///
    /// See [`Relation::new`].
    pub fn greater_than(
        lhs: impl Into<Operand<S>>,
        rhs: impl Into<Operand<S>>,
    ) -> Result<Self, DimensionalityError> {
        Self::new(RelationKind::GreaterThan, lhs, rhs)
    }

    /// Wraps a declared relation method that returns `(lhs, rhs)`.
    ///
    /// Used by [`system!`](crate::system) to register annotated methods.
    #[must_use]
    pub fn declared(kind: RelationKind, name: &'static str, method: PairFn<S>) -> Self {
        Self {
            kind,
            name: Some(Cow::Borrowed(name)),
            sides: Sides::Declared(method),
        }
    }

    /// Attaches a name, used in logs and error context.
    #[must_use]
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Evaluates `lhs - rhs` against a state.
    ///
    /// # Errors
    ///
    /// Returns an error if an operand function fails or if both sides
    /// resolve to quantities of incompatible dimensionality.
    pub fn residual(&self, state: &S) -> Result<f64, Error> {
        let (lhs, rhs) = match &self.sides {
            Sides::Operands { lhs, rhs } => (lhs.resolve(state)?, rhs.resolve(state)?),
            Sides::Declared(method) => method(state)?,
        };
        Ok(difference(&lhs, &rhs)?)
    }

    /// Returns `true` if the relation holds for `state`, within `tol`.
    ///
    /// # Errors
    ///
    /// See [`Relation::residual`].
    pub fn is_satisfied(&self, state: &S, tol: f64) -> Result<bool, Error> {
        Ok(self.kind.is_satisfied(self.residual(state)?, tol))
    }
}

impl<S> fmt::Debug for Relation<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Relation");
        out.field("kind", &self.kind).field("name", &self.name);
        match &self.sides {
            Sides::Operands { lhs, rhs } => out.field("lhs", lhs).field("rhs", rhs),
            Sides::Declared(_) => out.field("declared", &true),
        };
        out.finish()
    }
}

/// Unit-stripped `lhs - rhs`, converting `rhs` into `lhs` units when both
/// carry one.
fn difference(lhs: &Value, rhs: &Value) -> Result<f64, DimensionalityError> {
    match (lhs, rhs) {
        (Value::Quantity(l), Value::Quantity(r)) => Ok(l.magnitude() - r.magnitude_in(l.unit())?),
        _ => Ok(lhs.magnitude() - rhs.magnitude()),
    }
}
