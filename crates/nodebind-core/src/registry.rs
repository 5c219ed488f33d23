use crate::{
    descriptor::AngleUnit,
    scalar::{Scalar, ScalarKind},
};
use std::fmt;

///
/// ParamKind
///
/// Identity of a host parameter family. Resolution is total: every leaf
/// kind maps to *some* family, with `Universal` as the final fallback.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ParamKind {
    Boolean,
    Integer,
    Number,
    Text,
    Enumeration,
    Universal,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Text => "text",
            Self::Enumeration => "enumeration",
            Self::Universal => "universal",
        };
        write!(f, "{label}")
    }
}

/// Instantiates a blank host parameter handle for a family. Hosts may
/// register their own factories per entry.
pub type ParamFactory = fn(ParamKind) -> ParamHandle;

///
/// KindEntry
///
/// One searched row of the registry: the scalar kind the family wraps
/// exactly, plus the kinds it accepts by widening.
///

#[derive(Clone, Debug)]
pub struct KindEntry {
    pub kind: ParamKind,
    pub wraps: ScalarKind,
    pub accepts: &'static [ScalarKind],
    pub factory: ParamFactory,
}

// Single source of truth for the searched families, in search order.
// Enumerations and text resolve to dedicated identities before the search
// and never appear here.
macro_rules! kind_registry_entries {
    ($macro:ident) => {
        $macro! {
            (Boolean, ScalarKind::Bool, accepts = &[]),
            (Integer, ScalarKind::Int, accepts = &[ScalarKind::Bool]),
            (Number, ScalarKind::Float, accepts = &[ScalarKind::Int]),
        }
    };
}

macro_rules! build_standard_entries {
    ($(($kind:ident, $wraps:path, accepts = $accepts:expr)),* $(,)?) => {
        vec![
            $(KindEntry {
                kind: ParamKind::$kind,
                wraps: $wraps,
                accepts: $accepts,
                factory: ParamHandle::blank,
            }),*
        ]
    };
}

///
/// KindRegistry
///
/// Explicit, constructed-once registry mapping leaf kinds to parameter
/// families. Passed by reference into descriptor construction; never
/// global state.
///

#[derive(Clone, Debug)]
pub struct KindRegistry {
    entries: Vec<KindEntry>,
}

impl KindRegistry {
    /// The builtin family table.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            entries: kind_registry_entries!(build_standard_entries),
        }
    }

    /// Registry with a custom entry set, in search order.
    #[must_use]
    pub const fn with_entries(entries: Vec<KindEntry>) -> Self {
        Self { entries }
    }

    /// Total identity lookup: dedicated identities first, then an exact
    /// wrapped-kind match in entry order, then an accepts match, then the
    /// universal fallback. Never fails.
    #[must_use]
    pub fn match_kind(&self, kind: ScalarKind, is_enum: bool) -> ParamKind {
        if is_enum {
            return ParamKind::Enumeration;
        }
        if kind == ScalarKind::Text {
            return ParamKind::Text;
        }

        if let Some(entry) = self.entries.iter().find(|e| e.wraps == kind) {
            return entry.kind;
        }
        if let Some(entry) = self.entries.iter().find(|e| e.accepts.contains(&kind)) {
            return entry.kind;
        }

        ParamKind::Universal
    }

    /// Factory for a family; dedicated and fallback identities share the
    /// blank-handle factory.
    #[must_use]
    pub fn resolve(&self, kind: ParamKind) -> ParamFactory {
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .map_or(ParamHandle::blank as ParamFactory, |e| e.factory)
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

///
/// ParamHandle
///
/// An instantiated host parameter: the thing the canvas shows for one
/// slot. Descriptor metadata is copied on at creation and the host owns
/// the handle afterwards.
///

#[derive(Clone, Debug)]
pub struct ParamHandle {
    pub kind: ParamKind,
    pub name: &'static str,
    pub nick: &'static str,
    pub optional: bool,
    pub default: Option<Scalar>,
    pub angle: bool,
    pub hidden: bool,
    pub named_values: &'static [(&'static str, i64)],
    pub display_unit: AngleUnit,
}

impl ParamHandle {
    #[must_use]
    pub const fn blank(kind: ParamKind) -> Self {
        Self {
            kind,
            name: "",
            nick: "",
            optional: false,
            default: None,
            angle: false,
            hidden: false,
            named_values: &[],
            display_unit: AngleUnit::Radians,
        }
    }
}

///
/// TESTS
///
