use std::{
    fmt,
    ops::{Div, Mul, Neg},
};

use crate::{
    error::{DimensionalityError, UnitError},
    unit::Unit,
};

/// A magnitude with a physical unit and optional box bounds.
///
/// Bounds are expressed in the quantity's own unit and are consumed by the
/// solver as per-variable limits. A constant quantity is pinned to its
/// magnitude: both bounds equal the magnitude, and any later attempt to
/// widen them is ignored.
///
/// ```
/// use gantry_core::Quantity;
///
/// let frame = Quantity::new(1.0, "kg")?.at_least(0.5);
/// assert_eq!(frame.bound(), (0.5, f64::INFINITY));
///
/// let payload = Quantity::new(1.0, "kg")?.constant();
/// assert_eq!(payload.bound(), (1.0, 1.0));
/// # Ok::<(), gantry_core::UnitError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "RawQuantity")
)]
pub struct Quantity {
    magnitude: f64,
    unit: Unit,
    lower: Option<f64>,
    upper: Option<f64>,
    constant: bool,
}

/// Deserialized fields of a [`Quantity`], before the constant flag pins the
/// bounds.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawQuantity {
    magnitude: f64,
    unit: Unit,
    #[serde(default)]
    lower: Option<f64>,
    #[serde(default)]
    upper: Option<f64>,
    #[serde(default)]
    constant: bool,
}

#[cfg(feature = "serde")]
impl From<RawQuantity> for Quantity {
    fn from(raw: RawQuantity) -> Self {
        let quantity = Self {
            magnitude: raw.magnitude,
            unit: raw.unit,
            lower: raw.lower,
            upper: raw.upper,
            constant: false,
        };
        if raw.constant {
            quantity.constant()
        } else {
            quantity
        }
    }
}

impl Quantity {
    /// Creates an unbounded quantity from a magnitude and a unit expression.
    ///
    /// # Errors
    ///
    /// Returns a [`UnitError`] if the unit expression cannot be parsed.
    pub fn new(magnitude: f64, unit: &str) -> Result<Self, UnitError> {
        Ok(Self::with_unit(magnitude, Unit::parse(unit)?))
    }

    /// Creates an unbounded quantity from an already parsed unit.
    #[must_use]
    pub fn with_unit(magnitude: f64, unit: Unit) -> Self {
        Self {
            magnitude,
            unit,
            lower: None,
            upper: None,
            constant: false,
        }
    }

    /// Creates a dimensionless quantity.
    #[must_use]
    pub fn dimensionless(magnitude: f64) -> Self {
        Self::with_unit(magnitude, Unit::dimensionless())
    }

    /// Sets the lower bound.
    #[must_use]
    pub fn at_least(mut self, lower: f64) -> Self {
        if !self.constant {
            self.lower = Some(lower);
        }
        self
    }

    /// Sets the upper bound.
    #[must_use]
    pub fn at_most(mut self, upper: f64) -> Self {
        if !self.constant {
            self.upper = Some(upper);
        }
        self
    }

    /// Sets both bounds.
    #[must_use]
    pub fn between(self, lower: f64, upper: f64) -> Self {
        self.at_least(lower).at_most(upper)
    }

    /// Pins the quantity to its current magnitude.
    #[must_use]
    pub fn constant(mut self) -> Self {
        self.constant = true;
        self.lower = Some(self.magnitude);
        self.upper = Some(self.magnitude);
        self
    }

    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    #[must_use]
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    #[must_use]
    pub fn lower(&self) -> Option<f64> {
        self.lower
    }

    #[must_use]
    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.constant
    }

    /// Returns `(lower, upper)`, substituting infinities for missing bounds.
    #[must_use]
    pub fn bound(&self) -> (f64, f64) {
        (
            self.lower.unwrap_or(f64::NEG_INFINITY),
            self.upper.unwrap_or(f64::INFINITY),
        )
    }

    /// Returns a copy carrying a new magnitude.
    ///
    /// Unit, bounds and constant-ness are kept. A constant quantity stays
    /// pinned, now to the new magnitude.
    #[must_use]
    pub fn with_magnitude(&self, magnitude: f64) -> Self {
        let mut next = self.clone();
        next.magnitude = magnitude;
        if next.constant {
            next.lower = Some(magnitude);
            next.upper = Some(magnitude);
        }
        next
    }

    /// Returns `true` if both quantities share a dimensionality.
    #[must_use]
    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    /// Returns the magnitude expressed in `unit`.
    ///
    /// # Errors
    ///
    /// Returns a [`DimensionalityError`] if `unit` is incompatible.
    pub fn magnitude_in(&self, unit: &Unit) -> Result<f64, DimensionalityError> {
        Ok(self.magnitude * self.unit.conversion_factor_to(unit)?)
    }

    /// Converts into an unbounded quantity expressed in `unit`.
    ///
    /// # Errors
    ///
    /// Returns a [`DimensionalityError`] if `unit` is incompatible.
    pub fn to(&self, unit: &Unit) -> Result<Quantity, DimensionalityError> {
        Ok(Self::with_unit(self.magnitude_in(unit)?, unit.clone()))
    }

    /// Adds `rhs`, expressed in this quantity's unit.
    ///
    /// # Errors
    ///
    /// Returns a [`DimensionalityError`] if the dimensions differ.
    pub fn try_add(&self, rhs: &Quantity) -> Result<Quantity, DimensionalityError> {
        let rhs = rhs.magnitude_in(&self.unit)?;
        Ok(Self::with_unit(self.magnitude + rhs, self.unit.clone()))
    }

    /// Subtracts `rhs`, expressed in this quantity's unit.
    ///
    /// # Errors
    ///
    /// Returns a [`DimensionalityError`] if the dimensions differ.
    pub fn try_sub(&self, rhs: &Quantity) -> Result<Quantity, DimensionalityError> {
        let rhs = rhs.magnitude_in(&self.unit)?;
        Ok(Self::with_unit(self.magnitude - rhs, self.unit.clone()))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(f, "{:.*}", precision, self.magnitude)?,
            None => write!(f, "{}", self.magnitude)?,
        }
        if !self.unit.symbol().is_empty() {
            write!(f, " {}", self.unit)?;
        }
        Ok(())
    }
}

impl Mul for &Quantity {
    type Output = Quantity;

    fn mul(self, rhs: &Quantity) -> Quantity {
        Quantity::with_unit(self.magnitude * rhs.magnitude, &self.unit * &rhs.unit)
    }
}

impl Div for &Quantity {
    type Output = Quantity;

    fn div(self, rhs: &Quantity) -> Quantity {
        Quantity::with_unit(self.magnitude / rhs.magnitude, &self.unit / &rhs.unit)
    }
}

impl Mul for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: Quantity) -> Quantity {
        &self * &rhs
    }
}

impl Div for Quantity {
    type Output = Quantity;

    fn div(self, rhs: Quantity) -> Quantity {
        &self / &rhs
    }
}

impl Mul<f64> for &Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        Quantity::with_unit(self.magnitude * rhs, self.unit.clone())
    }
}

impl Div<f64> for &Quantity {
    type Output = Quantity;

    fn div(self, rhs: f64) -> Quantity {
        Quantity::with_unit(self.magnitude / rhs, self.unit.clone())
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        &self * rhs
    }
}

impl Div<f64> for Quantity {
    type Output = Quantity;

    fn div(self, rhs: f64) -> Quantity {
        &self / rhs
    }
}

impl Mul<Quantity> for f64 {
    type Output = Quantity;

    fn mul(self, rhs: Quantity) -> Quantity {
        &rhs * self
    }
}

impl Div<Quantity> for f64 {
    type Output = Quantity;

    fn div(self, rhs: Quantity) -> Quantity {
        Quantity::with_unit(self / rhs.magnitude, &Unit::dimensionless() / &rhs.unit)
    }
}

impl Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        Quantity::with_unit(-self.magnitude, self.unit)
    }
}
