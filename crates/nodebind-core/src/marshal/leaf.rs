use crate::{
    marshal::CoerceError,
    scalar::{Scalar, ScalarKind},
};
use num_traits::NumCast;

///
/// Leaf
///
/// A declared innermost element type: knows its natural scalar kind and
/// converts itself to and from host scalars. Numeric widening/narrowing is
/// part of the conversion; range clamping is not (that is descriptor
/// policy, applied on the scalar side).
///

pub trait Leaf: Sized {
    /// Scalar kind this leaf converts through.
    const KIND: ScalarKind;

    /// Enumerations marshal through the `Int` surrogate and resolve to a
    /// dedicated parameter identity instead of the kind search.
    const IS_ENUM: bool = false;

    /// Named values surfaced on host parameter handles; empty unless the
    /// leaf is an enumeration.
    const NAMED_VALUES: &'static [(&'static str, i64)] = &[];

    fn from_scalar(scalar: &Scalar) -> Result<Self, CoerceError>;

    fn to_scalar(&self) -> Scalar;

    /// Zero value used when pre-filling output slots.
    fn zero() -> Self;
}

///
/// EnumLeaf
///
/// Enumeration bridge: integer index per value plus the named-value table.
/// `#[derive(NodeEnum)]` implements this for unit-variant enums; flag-set
/// newtypes implement it by hand.
///

pub trait EnumLeaf: Copy + Sized {
    const NAMED_VALUES: &'static [(&'static str, i64)];

    fn to_index(self) -> i64;

    fn from_index(index: i64) -> Option<Self>;
}

macro_rules! int_leaf {
    ($($ty:ty),* $(,)?) => {$(
        impl Leaf for $ty {
            const KIND: ScalarKind = ScalarKind::Int;

            fn from_scalar(scalar: &Scalar) -> Result<Self, CoerceError> {
                match scalar {
                    Scalar::Int(i) => NumCast::from(*i).ok_or(CoerceError::Narrow),
                    Scalar::Float(f) => NumCast::from(*f).ok_or(CoerceError::Narrow),
                    other => Err(CoerceError::Kind {
                        expected: Self::KIND,
                        found: other.kind(),
                    }),
                }
            }

            fn to_scalar(&self) -> Scalar {
                Scalar::Int(*self as i64)
            }

            fn zero() -> Self {
                0
            }
        }
    )*};
}

macro_rules! float_leaf {
    ($($ty:ty),* $(,)?) => {$(
        impl Leaf for $ty {
            const KIND: ScalarKind = ScalarKind::Float;

            fn from_scalar(scalar: &Scalar) -> Result<Self, CoerceError> {
                match scalar {
                    Scalar::Int(i) => NumCast::from(*i).ok_or(CoerceError::Narrow),
                    Scalar::Float(f) => NumCast::from(*f).ok_or(CoerceError::Narrow),
                    other => Err(CoerceError::Kind {
                        expected: Self::KIND,
                        found: other.kind(),
                    }),
                }
            }

            fn to_scalar(&self) -> Scalar {
                Scalar::Float(<f64 as From<Self>>::from(*self))
            }

            fn zero() -> Self {
                0.0
            }
        }
    )*};
}

int_leaf!(i32, i64, u32);
float_leaf!(f32, f64);

impl Leaf for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn from_scalar(scalar: &Scalar) -> Result<Self, CoerceError> {
        match scalar {
            Scalar::Bool(b) => Ok(*b),
            // hosts routinely feed integers into boolean slots
            Scalar::Int(i) => Ok(*i != 0),
            other => Err(CoerceError::Kind {
                expected: Self::KIND,
                found: other.kind(),
            }),
        }
    }

    fn to_scalar(&self) -> Scalar {
        Scalar::Bool(*self)
    }

    fn zero() -> Self {
        false
    }
}

impl Leaf for String {
    const KIND: ScalarKind = ScalarKind::Text;

    fn from_scalar(scalar: &Scalar) -> Result<Self, CoerceError> {
        match scalar {
            Scalar::Text(t) => Ok(t.clone()),
            other => Err(CoerceError::Kind {
                expected: Self::KIND,
                found: other.kind(),
            }),
        }
    }

    fn to_scalar(&self) -> Scalar {
        Scalar::Text(self.clone())
    }

    fn zero() -> Self {
        Self::new()
    }
}
