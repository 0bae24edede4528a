use std::{
    borrow::Cow,
    fmt,
    ops::{Div, Mul},
    str::FromStr,
    sync::Arc,
};

use uom::si::{
    amount_of_substance::mole,
    electric_current::ampere,
    energy::{joule, kilojoule, kilowatt_hour},
    f64::{
        AmountOfSubstance, ElectricCurrent, Energy, Force, Frequency, Length, LuminousIntensity,
        Mass, Power, Pressure, ThermodynamicTemperature, Time, Volume,
    },
    force::{kilonewton, newton},
    frequency::hertz,
    length::{centimeter, foot, inch, kilometer, meter, mile, millimeter},
    luminous_intensity::candela,
    mass::{gram, kilogram, megagram, pound},
    power::{kilowatt, watt},
    pressure::{bar, kilopascal, pascal},
    thermodynamic_temperature::kelvin,
    time::{day, hour, minute, second},
    volume::liter,
};

use crate::error::{DimensionalityError, UnitError};

const BASE_NAMES: [&str; 7] = [
    "length",
    "mass",
    "time",
    "current",
    "temperature",
    "substance",
    "luminosity",
];

/// Exponents of the seven SI base dimensions.
///
/// Order: length, mass, time, electric current, thermodynamic temperature,
/// amount of substance, luminous intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimension([i8; 7]);

impl Dimension {
    pub const NONE: Self = Self([0; 7]);
    pub const LENGTH: Self = Self([1, 0, 0, 0, 0, 0, 0]);
    pub const MASS: Self = Self([0, 1, 0, 0, 0, 0, 0]);
    pub const TIME: Self = Self([0, 0, 1, 0, 0, 0, 0]);
    pub const CURRENT: Self = Self([0, 0, 0, 1, 0, 0, 0]);
    pub const TEMPERATURE: Self = Self([0, 0, 0, 0, 1, 0, 0]);
    pub const SUBSTANCE: Self = Self([0, 0, 0, 0, 0, 1, 0]);
    pub const LUMINOSITY: Self = Self([0, 0, 0, 0, 0, 0, 1]);
    pub const FORCE: Self = Self([1, 1, -2, 0, 0, 0, 0]);
    pub const ENERGY: Self = Self([2, 1, -2, 0, 0, 0, 0]);
    pub const POWER: Self = Self([2, 1, -3, 0, 0, 0, 0]);
    pub const PRESSURE: Self = Self([-1, 1, -2, 0, 0, 0, 0]);
    pub const VOLUME: Self = Self([3, 0, 0, 0, 0, 0, 0]);
    pub const FREQUENCY: Self = Self([0, 0, -1, 0, 0, 0, 0]);

    /// Creates a dimension from raw base exponents.
    #[must_use]
    pub const fn new(exponents: [i8; 7]) -> Self {
        Self(exponents)
    }

    /// Returns the base exponents.
    #[must_use]
    pub const fn exponents(self) -> [i8; 7] {
        self.0
    }

    #[must_use]
    pub fn is_dimensionless(self) -> bool {
        self == Self::NONE
    }

    /// Raises the dimension to an integer power.
    ///
    /// Exponents saturate at the bounds of `i8`; see [`Dimension::checked_powi`].
    #[must_use]
    pub fn powi(self, n: i8) -> Self {
        Self(self.0.map(|e| e.saturating_mul(n)))
    }

    /// Raises the dimension to an integer power, or `None` if an exponent
    /// overflows.
    #[must_use]
    pub fn checked_powi(self, n: i8) -> Option<Self> {
        let mut out = [0; 7];
        for (slot, e) in out.iter_mut().zip(self.0) {
            *slot = e.checked_mul(n)?;
        }
        Some(Self(out))
    }

    /// Multiplies two dimensions, or `None` if an exponent overflows.
    #[must_use]
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        self.checked_zip(rhs, i8::checked_add)
    }

    /// Divides two dimensions, or `None` if an exponent overflows.
    #[must_use]
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        self.checked_zip(rhs, i8::checked_sub)
    }

    fn checked_zip(self, other: Self, op: impl Fn(i8, i8) -> Option<i8>) -> Option<Self> {
        let mut out = [0; 7];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = op(self.0[i], other.0[i])?;
        }
        Some(Self(out))
    }

    fn zip(self, other: Self, op: impl Fn(i8, i8) -> i8) -> Self {
        let mut out = [0; 7];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = op(self.0[i], other.0[i]);
        }
        Self(out)
    }
}

/// Exponents saturate at the bounds of `i8`; see [`Dimension::checked_mul`].
impl Mul for Dimension {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.zip(rhs, i8::saturating_add)
    }
}

/// Exponents saturate at the bounds of `i8`; see [`Dimension::checked_div`].
impl Div for Dimension {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        self.zip(rhs, i8::saturating_sub)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return f.write_str("dimensionless");
        }
        let mut first = true;
        for (name, &exp) in BASE_NAMES.iter().zip(self.0.iter()) {
            if exp == 0 {
                continue;
            }
            if !first {
                f.write_str("·")?;
            }
            first = false;
            f.write_str(name)?;
            if exp != 1 {
                write!(f, "^{exp}")?;
            }
        }
        Ok(())
    }
}

/// A physical unit known at runtime.
///
/// A unit pairs a compact display symbol with its dimension and the factor
/// that converts one of it into the coherent SI unit of that dimension
/// (`km` has factor 1000, `min` has factor 60).
///
/// Units are parsed from compact expressions such as `"kg"`, `"m/s"`,
/// `"kg*m/s^2"` or `"kg/(km/min)"`. Operators apply left to right, so
/// `"kg/m/s"` is kilograms per metre per second. The symbol of a derived unit
/// parses back to the same unit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct Unit {
    symbol: Arc<str>,
    dimension: Dimension,
    factor: f64,
}

impl Unit {
    /// Parses a unit expression.
    ///
    /// Factors are unit symbols, `1`, or parenthesised expressions, each
    /// optionally raised to an integer power with `^n`, `²` or `³`, and
    /// joined by `*`, `·` or `/`. Whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::Unknown`] for symbols outside the unit table and
    /// [`UnitError::Malformed`] for empty factors, invalid or out-of-range
    /// exponents, and unbalanced parentheses.
    pub fn parse(expression: &str) -> Result<Self, UnitError> {
        let compact: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() || compact == "1" {
            return Ok(Self::dimensionless());
        }

        let mut parser = Parser {
            rest: &compact,
            expression,
        };
        let (dimension, factor) = parser.expression()?;
        match parser.peek() {
            None => {}
            Some(')') => return Err(parser.malformed("unbalanced parenthesis")),
            Some(_) => return Err(parser.malformed("missing operator")),
        }

        Ok(Self {
            symbol: compact.as_str().into(),
            dimension,
            factor,
        })
    }

    /// The unit of plain numbers.
    #[must_use]
    pub fn dimensionless() -> Self {
        Self {
            symbol: "".into(),
            dimension: Dimension::NONE,
            factor: 1.0,
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Factor converting one of this unit into the coherent SI unit.
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    #[must_use]
    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// Returns `true` if both units measure the same kind of quantity.
    #[must_use]
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Returns the multiplier taking a magnitude in `self` to one in `target`.
    ///
    /// # Errors
    ///
    /// Returns a [`DimensionalityError`] if the units are incompatible.
    pub fn conversion_factor_to(&self, target: &Unit) -> Result<f64, DimensionalityError> {
        if self.is_compatible(target) {
            Ok(self.factor / target.factor)
        } else {
            Err(DimensionalityError::new(self, target))
        }
    }

    /// Raises the unit to an integer power.
    #[must_use]
    pub fn powi(&self, n: i8) -> Self {
        let symbol = match n {
            0 => return Self::dimensionless(),
            1 => self.symbol.to_string(),
            _ if self.symbol.is_empty() => String::new(),
            _ => format!("{}^{n}", group(&self.symbol)),
        };
        Self {
            symbol: symbol.into(),
            dimension: self.dimension.powi(n),
            factor: self.factor.powi(i32::from(n)),
        }
    }

    fn combine(&self, rhs: &Unit, divide: bool) -> Self {
        let symbol = match (self.symbol.is_empty(), rhs.symbol.is_empty(), divide) {
            (_, true, _) => self.symbol.to_string(),
            (true, false, false) => rhs.symbol.to_string(),
            (true, false, true) => format!("1/{}", group(&rhs.symbol)),
            (false, false, false) => format!("{}·{}", self.symbol, rhs.symbol),
            (false, false, true) => format!("{}/{}", self.symbol, group(&rhs.symbol)),
        };
        let (dimension, factor) = if divide {
            (self.dimension / rhs.dimension, self.factor / rhs.factor)
        } else {
            (self.dimension * rhs.dimension, self.factor * rhs.factor)
        };
        Self {
            symbol: symbol.into(),
            dimension,
            factor,
        }
    }
}

fn group(symbol: &str) -> Cow<'_, str> {
    if symbol.contains(['*', '·', '/', '^', '²', '³']) {
        Cow::Owned(format!("({symbol})"))
    } else {
        Cow::Borrowed(symbol)
    }
}

/// Characters that end a unit symbol.
const DELIMITERS: [char; 8] = ['*', '·', '/', '^', '²', '³', '(', ')'];

/// Recursive-descent parser over a whitespace-free unit expression.
///
/// ```text
/// expression = term (('*' | '·' | '/') term)*
/// term       = atom ('^' integer | '²' | '³')?
/// atom       = '(' expression ')' | '1' | symbol
/// ```
struct Parser<'a> {
    rest: &'a str,
    expression: &'a str,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn bump(&mut self, c: char) {
        self.rest = &self.rest[c.len_utf8()..];
    }

    fn malformed(&self, reason: &'static str) -> UnitError {
        UnitError::Malformed {
            expression: self.expression.to_owned(),
            reason,
        }
    }

    fn expression(&mut self) -> Result<(Dimension, f64), UnitError> {
        let (mut dimension, mut factor) = self.term()?;
        while let Some(op @ ('*' | '·' | '/')) = self.peek() {
            self.bump(op);
            let (dim, scale) = self.term()?;
            let combined = if op == '/' {
                factor /= scale;
                dimension.checked_div(dim)
            } else {
                factor *= scale;
                dimension.checked_mul(dim)
            };
            dimension = combined.ok_or_else(|| self.malformed("exponent out of range"))?;
        }
        Ok((dimension, factor))
    }

    fn term(&mut self) -> Result<(Dimension, f64), UnitError> {
        let (dimension, factor) = self.atom()?;
        let exponent = match self.peek() {
            Some(c @ '²') => {
                self.bump(c);
                2
            }
            Some(c @ '³') => {
                self.bump(c);
                3
            }
            Some('^') => {
                self.bump('^');
                self.exponent()?
            }
            _ => return Ok((dimension, factor)),
        };
        let dimension = dimension
            .checked_powi(exponent)
            .ok_or_else(|| self.malformed("exponent out of range"))?;
        Ok((dimension, factor.powi(i32::from(exponent))))
    }

    fn exponent(&mut self) -> Result<i8, UnitError> {
        let sign = usize::from(self.rest.starts_with(['-', '+']));
        let digits = self.rest[sign..]
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.rest.len() - sign);
        if digits == 0 {
            return Err(self.malformed("exponent must be an integer"));
        }
        let (literal, rest) = self.rest.split_at(sign + digits);
        let exponent = literal
            .parse::<i8>()
            .map_err(|_| self.malformed("exponent out of range"))?;
        self.rest = rest;
        Ok(exponent)
    }

    fn atom(&mut self) -> Result<(Dimension, f64), UnitError> {
        match self.peek() {
            Some('(') => {
                self.bump('(');
                let inner = self.expression()?;
                if self.peek() != Some(')') {
                    return Err(self.malformed("unbalanced parenthesis"));
                }
                self.bump(')');
                Ok(inner)
            }
            Some('^' | '²' | '³') => Err(self.malformed("exponent without a unit")),
            None | Some('*' | '·' | '/' | ')') => Err(self.malformed("empty factor")),
            Some(_) => {
                let end = self.rest.find(DELIMITERS).unwrap_or(self.rest.len());
                let (symbol, rest) = self.rest.split_at(end);
                self.rest = rest;
                if symbol == "1" {
                    return Ok((Dimension::NONE, 1.0));
                }
                lookup(symbol).ok_or_else(|| UnitError::Unknown(symbol.to_owned()))
            }
        }
    }
}

/// Looks up a single unit symbol, returning its dimension and SI factor.
///
/// Factors are the SI values of one unit as defined by `uom`.
fn lookup(symbol: &str) -> Option<(Dimension, f64)> {
    let entry = match symbol {
        "m" => (Dimension::LENGTH, Length::new::<meter>(1.0).value),
        "km" => (Dimension::LENGTH, Length::new::<kilometer>(1.0).value),
        "cm" => (Dimension::LENGTH, Length::new::<centimeter>(1.0).value),
        "mm" => (Dimension::LENGTH, Length::new::<millimeter>(1.0).value),
        "ft" => (Dimension::LENGTH, Length::new::<foot>(1.0).value),
        "in" => (Dimension::LENGTH, Length::new::<inch>(1.0).value),
        "mi" => (Dimension::LENGTH, Length::new::<mile>(1.0).value),

        "kg" => (Dimension::MASS, Mass::new::<kilogram>(1.0).value),
        "g" => (Dimension::MASS, Mass::new::<gram>(1.0).value),
        "t" => (Dimension::MASS, Mass::new::<megagram>(1.0).value),
        "lb" => (Dimension::MASS, Mass::new::<pound>(1.0).value),

        "s" => (Dimension::TIME, Time::new::<second>(1.0).value),
        "min" => (Dimension::TIME, Time::new::<minute>(1.0).value),
        "h" => (Dimension::TIME, Time::new::<hour>(1.0).value),
        "d" => (Dimension::TIME, Time::new::<day>(1.0).value),

        "A" => (
            Dimension::CURRENT,
            ElectricCurrent::new::<ampere>(1.0).value,
        ),
        "K" => (
            Dimension::TEMPERATURE,
            ThermodynamicTemperature::new::<kelvin>(1.0).value,
        ),
        "mol" => (
            Dimension::SUBSTANCE,
            AmountOfSubstance::new::<mole>(1.0).value,
        ),
        "cd" => (
            Dimension::LUMINOSITY,
            LuminousIntensity::new::<candela>(1.0).value,
        ),

        "N" => (Dimension::FORCE, Force::new::<newton>(1.0).value),
        "kN" => (Dimension::FORCE, Force::new::<kilonewton>(1.0).value),
        "J" => (Dimension::ENERGY, Energy::new::<joule>(1.0).value),
        "kJ" => (Dimension::ENERGY, Energy::new::<kilojoule>(1.0).value),
        "kWh" => (Dimension::ENERGY, Energy::new::<kilowatt_hour>(1.0).value),
        "W" => (Dimension::POWER, Power::new::<watt>(1.0).value),
        "kW" => (Dimension::POWER, Power::new::<kilowatt>(1.0).value),
        "Pa" => (Dimension::PRESSURE, Pressure::new::<pascal>(1.0).value),
        "kPa" => (Dimension::PRESSURE, Pressure::new::<kilopascal>(1.0).value),
        "bar" => (Dimension::PRESSURE, Pressure::new::<bar>(1.0).value),
        "L" => (Dimension::VOLUME, Volume::new::<liter>(1.0).value),
        "Hz" => (Dimension::FREQUENCY, Frequency::new::<hertz>(1.0).value),

        _ => return None,
    };
    Some(entry)
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Unit {
    type Error = UnitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.symbol.to_string()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

impl Mul for &Unit {
    type Output = Unit;

    fn mul(self, rhs: &Unit) -> Unit {
        self.combine(rhs, false)
    }
}

impl Div for &Unit {
    type Output = Unit;

    fn div(self, rhs: &Unit) -> Unit {
        self.combine(rhs, true)
    }
}

impl Mul for Unit {
    type Output = Unit;

    fn mul(self, rhs: Unit) -> Unit {
        self.combine(&rhs, false)
    }
}

impl Div for Unit {
    type Output = Unit;

    fn div(self, rhs: Unit) -> Unit {
        self.combine(&rhs, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn parses_base_and_prefixed_units() {
        let km = Unit::parse("km").unwrap();
        assert_eq!(km.dimension(), Dimension::LENGTH);
        assert_relative_eq!(km.factor(), 1000.0);

        let minutes: Unit = "min".parse().unwrap();
        assert_eq!(minutes.dimension(), Dimension::TIME);
        assert_relative_eq!(minutes.factor(), 60.0);
    }

    #[test]
    fn parses_compound_expressions() {
        let speed = Unit::parse("m/s").unwrap();
        assert_eq!(speed.dimension(), Dimension::LENGTH / Dimension::TIME);
        assert_eq!(speed.symbol(), "m/s");

        let force = Unit::parse("kg * m / s^2").unwrap();
        assert_eq!(force.dimension(), Dimension::FORCE);
        assert_eq!(force.symbol(), "kg*m/s^2");
        assert!(force.is_compatible(&Unit::parse("N").unwrap()));

        let area = Unit::parse("m²").unwrap();
        assert_eq!(area.dimension(), Dimension::LENGTH.powi(2));

        let rate = Unit::parse("s^-1").unwrap();
        assert_eq!(rate.dimension(), Dimension::FREQUENCY);
    }

    #[test]
    fn empty_and_one_are_dimensionless() {
        assert!(Unit::parse("").unwrap().is_dimensionless());
        assert!(Unit::parse("1").unwrap().is_dimensionless());
    }

    #[test]
    fn rejects_unknown_and_malformed_symbols() {
        assert_eq!(
            Unit::parse("furlong"),
            Err(UnitError::Unknown("furlong".to_owned()))
        );
        assert!(matches!(
            Unit::parse("m//s"),
            Err(UnitError::Malformed { .. })
        ));
        assert!(matches!(
            Unit::parse("m^x"),
            Err(UnitError::Malformed { .. })
        ));
        assert!(matches!(
            Unit::parse("^2"),
            Err(UnitError::Malformed { .. })
        ));
    }

    #[test]
    fn converts_between_compatible_units() {
        let km = Unit::parse("km").unwrap();
        let m = Unit::parse("m").unwrap();
        assert_relative_eq!(km.conversion_factor_to(&m).unwrap(), 1000.0);

        let km_per_min = Unit::parse("km/min").unwrap();
        let m_per_s = Unit::parse("m/s").unwrap();
        assert_relative_eq!(
            km_per_min.conversion_factor_to(&m_per_s).unwrap(),
            1000.0 / 60.0,
            epsilon = 1e-12
        );

        let kg = Unit::parse("kg").unwrap();
        let err = km.conversion_factor_to(&kg).unwrap_err();
        assert_eq!(err.lhs_dimension, Dimension::LENGTH);
        assert_eq!(err.rhs_dimension, Dimension::MASS);
    }

    #[test]
    fn derived_units_compose_symbols() {
        let km = Unit::parse("km").unwrap();
        let min = Unit::parse("min").unwrap();
        let kg = Unit::parse("kg").unwrap();

        let speed = &km / &min;
        assert_eq!(speed.symbol(), "km/min");
        assert_eq!(speed.dimension(), Dimension::LENGTH / Dimension::TIME);

        assert_eq!((&kg * &speed).symbol(), "kg·km/min");
        assert_eq!((&kg / &speed).symbol(), "kg/(km/min)");
        assert_eq!((&Unit::dimensionless() / &min).symbol(), "1/min");
        assert_eq!((&kg * &Unit::dimensionless()).symbol(), "kg");
        assert_eq!(speed.powi(2).symbol(), "(km/min)^2");
    }

    #[test]
    fn derived_symbols_parse_back_to_the_same_unit() {
        let km = Unit::parse("km").unwrap();
        let min = Unit::parse("min").unwrap();
        let kg = Unit::parse("kg").unwrap();
        let speed = &km / &min;

        let derived = [
            speed.clone(),
            &kg * &speed,
            &kg / &speed,
            &Unit::dimensionless() / &min,
            speed.powi(2),
            speed.powi(-1),
            Unit::parse("m²").unwrap().powi(3),
            &kg / &speed.powi(2),
            (&kg / &speed).powi(2) / min.clone(),
        ];

        for unit in derived {
            let parsed = Unit::parse(unit.symbol()).unwrap();
            assert_eq!(parsed.symbol(), unit.symbol());
            assert_eq!(parsed.dimension(), unit.dimension(), "{unit}");
            assert_relative_eq!(parsed.factor(), unit.factor(), max_relative = 1e-12);
        }
    }

    #[test]
    fn parses_groups_and_unit_numerators() {
        let per_min = Unit::parse("1/min").unwrap();
        assert_eq!(per_min.dimension(), Dimension::FREQUENCY);
        assert_relative_eq!(per_min.factor(), 1.0 / 60.0);

        let nested = Unit::parse("kg/((km/min)^2*s)").unwrap();
        assert_eq!(
            nested.dimension(),
            Dimension::MASS / Dimension::LENGTH.powi(2) * Dimension::TIME
        );
        assert_relative_eq!(nested.factor(), 60.0 * 60.0 / 1e6, max_relative = 1e-12);

        for bad in ["(km/min", "km)", "kg(m)", "()", "m^"] {
            assert!(
                matches!(Unit::parse(bad), Err(UnitError::Malformed { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn exponent_overflow_is_malformed() {
        for bad in ["m^127*m", "1/m^127/m^2", "(m^100)^2", "m^128"] {
            assert!(
                matches!(
                    Unit::parse(bad),
                    Err(UnitError::Malformed {
                        reason: "exponent out of range",
                        ..
                    })
                ),
                "{bad}"
            );
        }
        assert_eq!(Unit::parse("m^127").unwrap().dimension().exponents()[0], 127);
    }

    #[test]
    fn dimension_operators_saturate() {
        let big = Unit::parse("m^100").unwrap();
        assert_eq!(big.powi(2).dimension().exponents()[0], i8::MAX);
        assert_eq!((&big * &big).dimension().exponents()[0], i8::MAX);
        assert_eq!(
            (Dimension::NONE / Dimension::LENGTH.powi(-100).powi(2)).exponents()[0],
            i8::MAX
        );
        assert_eq!(
            Dimension::LENGTH.checked_powi(127),
            Some(Dimension::new([127, 0, 0, 0, 0, 0, 0]))
        );
        let hundred = Dimension::LENGTH.powi(100);
        assert_eq!(hundred.checked_mul(hundred), None);
    }

    #[test]
    fn dimension_display_lists_nonzero_exponents() {
        assert_eq!(Dimension::FORCE.to_string(), "length·mass·time^-2");
        assert_eq!(Dimension::NONE.to_string(), "dimensionless");
    }
}
