use crate::{relation::Relation, value::Value};

/// A named, ordered, fixed-shape set of fields describing one design point.
///
/// Fields are either plain numbers (`f64`) or [`Quantity`](crate::Quantity)
/// values. Implementations are usually generated by [`system!`](crate::system),
/// which derives every method from the struct declaration.
pub trait System: Sized {
    /// Field names in declaration order.
    const FIELDS: &'static [&'static str];

    /// Returns every field as a [`Value`], in declaration order.
    fn values(&self) -> Vec<Value>;

    /// Returns every field's magnitude, in declaration order.
    fn magnitudes(&self) -> Vec<f64>;

    /// Returns every field's box bound, in declaration order.
    fn bounds(&self) -> Vec<(f64, f64)>;

    /// Builds a new state from this one, taking one magnitude per field.
    ///
    /// Units, bounds and constant-ness come from `self`. The iterator must
    /// yield at least [`FIELDS.len()`](Self::FIELDS) values; use
    /// [`from_vector`](crate::from_vector) for a checked version.
    #[must_use]
    fn rehydrate(&self, magnitudes: &mut dyn Iterator<Item = f64>) -> Self;

    /// Relations declared on the type itself.
    fn relations() -> Vec<Relation<Self>> {
        Vec::new()
    }
}

/// Declares a system struct and implements [`System`] for it.
///
/// Fields must be `f64` or [`Quantity`](crate::Quantity). After the struct,
/// relation methods may be declared with one of the markers `equation`,
/// `less_than` or `greater_than`. Each method receives the state under the
/// given name and returns a `(lhs, rhs)` pair; `?` may be used in the body.
/// The methods become inherent methods on the struct and are registered, in
/// declaration order, in [`System::relations`].
///
/// A `Display` impl listing one field per line is generated as well.
///
/// ```
/// use gantry_core::{Quantity, System, system};
///
/// system! {
///     #[derive(Debug, Clone)]
///     pub struct Drone {
///         pub payload: Quantity,
///         pub frame_mass: Quantity,
///         pub mtow: Quantity,
///     }
///
///     equation mass_eq(s) {
///         (s.mtow.clone(), s.payload.try_add(&s.frame_mass)?)
///     }
///
///     greater_than mtow_min(s) {
///         (s.mtow.clone(), Quantity::new(0.0, "kg")?)
///     }
/// }
///
/// let drone = Drone {
///     payload: Quantity::new(1.0, "kg")?.constant(),
///     frame_mass: Quantity::new(1.0, "kg")?.at_least(0.5),
///     mtow: Quantity::new(4.0, "kg")?,
/// };
///
/// assert_eq!(Drone::FIELDS, ["payload", "frame_mass", "mtow"]);
/// assert_eq!(Drone::relations().len(), 2);
/// assert_eq!(drone.mass_eq()?.0.to_string(), "4 kg");
/// # Ok::<(), gantry_core::Error>(())
/// ```
#[macro_export]
macro_rules! system {
    (@kind equation) => {
        $crate::RelationKind::Equation
    };
    (@kind less_than) => {
        $crate::RelationKind::LessThan
    };
    (@kind greater_than) => {
        $crate::RelationKind::GreaterThan
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }

        $(
            $(#[$rel_meta:meta])*
            $kind:ident $rel:ident ( $state:ident ) $body:block
        )*
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $name {
            $(
                $(#[$rel_meta])*
                #[allow(clippy::missing_errors_doc)]
                pub fn $rel(
                    &self,
                ) -> ::core::result::Result<($crate::Value, $crate::Value), $crate::Error> {
                    let $state = self;
                    let (lhs, rhs) = $body;
                    ::core::result::Result::Ok((
                        $crate::IntoValue::into_value(lhs)?,
                        $crate::IntoValue::into_value(rhs)?,
                    ))
                }
            )*
        }

        impl $crate::System for $name {
            const FIELDS: &'static [&'static str] = &[$(stringify!($field)),*];

            fn values(&self) -> ::std::vec::Vec<$crate::Value> {
                ::std::vec![$($crate::Field::to_value(&self.$field)),*]
            }

            fn magnitudes(&self) -> ::std::vec::Vec<f64> {
                ::std::vec![$($crate::Magnitude::magnitude(&self.$field)),*]
            }

            fn bounds(&self) -> ::std::vec::Vec<(f64, f64)> {
                ::std::vec![$($crate::Field::bound(&self.$field)),*]
            }

            fn rehydrate(&self, magnitudes: &mut dyn ::core::iter::Iterator<Item = f64>) -> Self {
                Self {
                    $(
                        $field: $crate::Field::rehydrate(
                            &self.$field,
                            magnitudes.next().unwrap_or(f64::NAN),
                        ),
                    )*
                }
            }

            fn relations() -> ::std::vec::Vec<$crate::Relation<Self>> {
                ::std::vec![
                    $(
                        $crate::Relation::declared(
                            $crate::system!(@kind $kind),
                            stringify!($rel),
                            Self::$rel,
                        )
                    ),*
                ]
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                $crate::write_system(f, self)
            }
        }
    };
}
