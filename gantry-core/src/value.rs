use std::fmt;

use crate::{error::Error, quantity::Quantity};

/// A field or relation side: either a plain number or a quantity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Number(f64),
    Quantity(Quantity),
}

impl Value {
    /// Returns the quantity, if this value carries a unit.
    #[must_use]
    pub fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            Value::Number(_) => None,
            Value::Quantity(q) => Some(q),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<Quantity> for Value {
    fn from(value: Quantity) -> Self {
        Value::Quantity(value)
    }
}

impl From<&Quantity> for Value {
    fn from(value: &Quantity) -> Self {
        Value::Quantity(value.clone())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, f.precision()) {
            (Value::Number(n), Some(precision)) => write!(f, "{n:.precision$}"),
            (Value::Number(n), None) => write!(f, "{n}"),
            (Value::Quantity(q), _) => fmt::Display::fmt(q, f),
        }
    }
}

/// Anything with a unit-free numeric magnitude.
pub trait Magnitude {
    fn magnitude(&self) -> f64;
}

impl Magnitude for f64 {
    fn magnitude(&self) -> f64 {
        *self
    }
}

impl Magnitude for Quantity {
    fn magnitude(&self) -> f64 {
        Quantity::magnitude(self)
    }
}

impl Magnitude for Value {
    fn magnitude(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Quantity(q) => q.magnitude(),
        }
    }
}

/// Returns a number unchanged, or strips a quantity down to its magnitude.
pub fn magnitude<M: Magnitude + ?Sized>(value: &M) -> f64 {
    value.magnitude()
}

/// Conversion of closure results into a [`Value`].
///
/// Implemented for numbers, quantities, values, and any `Result` of those,
/// so relation and objective closures may use `?` on fallible arithmetic.
pub trait IntoValue {
    /// Converts into a value.
    ///
    /// # Errors
    ///
    /// Returns the error carried by a failed `Result`.
    fn into_value(self) -> Result<Value, Error>;
}

impl IntoValue for f64 {
    fn into_value(self) -> Result<Value, Error> {
        Ok(Value::Number(self))
    }
}

impl IntoValue for Quantity {
    fn into_value(self) -> Result<Value, Error> {
        Ok(Value::Quantity(self))
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Result<Value, Error> {
        Ok(self)
    }
}

impl<T, E> IntoValue for Result<T, E>
where
    T: IntoValue,
    E: Into<Error>,
{
    fn into_value(self) -> Result<Value, Error> {
        self.map_err(Into::into)?.into_value()
    }
}

/// A type usable as a field of a [`System`](crate::System).
///
/// Implemented for `f64` (plain numbers) and [`Quantity`].
pub trait Field: Magnitude + Clone {
    /// Returns the field as a [`Value`].
    fn to_value(&self) -> Value;

    /// Returns the box bound for this field.
    fn bound(&self) -> (f64, f64);

    /// Rebuilds the field around a new magnitude, keeping its unit and bounds.
    #[must_use]
    fn rehydrate(&self, magnitude: f64) -> Self;
}

impl Field for f64 {
    fn to_value(&self) -> Value {
        Value::Number(*self)
    }

    fn bound(&self) -> (f64, f64) {
        (f64::NEG_INFINITY, f64::INFINITY)
    }

    fn rehydrate(&self, magnitude: f64) -> Self {
        magnitude
    }
}

impl Field for Quantity {
    fn to_value(&self) -> Value {
        Value::Quantity(self.clone())
    }

    fn bound(&self) -> (f64, f64) {
        Quantity::bound(self)
    }

    fn rehydrate(&self, magnitude: f64) -> Self {
        self.with_magnitude(magnitude)
    }
}
