use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Scalar
///
/// The host's plain leaf value. Closed set: the host has no other native
/// value families, and enumerations marshal through `Int` (the surrogate
/// representation applied at the leaf boundary).
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

// Single source of truth for scalar-kind metadata. Each entry is
// (variant, matching pattern, is_numeric).
macro_rules! scalar_kind_entries {
    ($macro:ident) => {
        $macro! {
            (Bool, Scalar::Bool(_), is_numeric = false),
            (Int, Scalar::Int(_), is_numeric = true),
            (Float, Scalar::Float(_), is_numeric = true),
            (Text, Scalar::Text(_), is_numeric = false),
        }
    };
}

macro_rules! define_scalar_kind {
    ($(($variant:ident, $pat:pat, is_numeric = $numeric:literal)),* $(,)?) => {
        ///
        /// ScalarKind
        ///
        /// Tag enum over [`Scalar`], used by descriptors and the kind
        /// registry without carrying a value.
        ///

        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
        pub enum ScalarKind {
            $($variant),*
        }

        impl ScalarKind {
            #[must_use]
            pub const fn is_numeric(self) -> bool {
                match self {
                    $(Self::$variant => $numeric),*
                }
            }
        }

        impl Scalar {
            #[must_use]
            pub const fn kind(&self) -> ScalarKind {
                match self {
                    $($pat => ScalarKind::$variant),*
                }
            }
        }
    };
}

scalar_kind_entries!(define_scalar_kind);

impl Scalar {
    /// Zero-valued scalar of the given kind, used to pre-fill output slots.
    #[must_use]
    pub const fn zero(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Bool => Self::Bool(false),
            ScalarKind::Int => Self::Int(0),
            ScalarKind::Float => Self::Float(0.0),
            ScalarKind::Text => Self::Text(String::new()),
        }
    }

    /// Widened numeric view; `None` for non-numeric kinds.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Bool(_) | Self::Text(_) => None,
        }
    }

    /// Replace the numeric payload, preserving the kind. Non-numeric
    /// scalars pass through unchanged.
    #[must_use]
    pub fn with_f64(&self, value: f64) -> Self {
        match self {
            Self::Int(_) => Self::Int(value as i64),
            Self::Float(_) => Self::Float(value),
            other => other.clone(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(t) => write!(f, "{t}"),
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
