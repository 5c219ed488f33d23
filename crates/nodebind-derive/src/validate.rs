use proc_macro2::{Span, TokenStream};
use quote::quote_spanned;
use std::fmt;

///
/// Code
///
/// Stable diagnostic codes for generation-time validation. These exist
/// only at compile time; nothing here reaches the runtime crate.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Code {
    /// angle flag on a non-floating leaf
    NB0001,
    /// range constraint on a non-numeric leaf
    NB0002,
    /// toggle-tagged parameter that is not `bool`
    NB0003,
    /// signature cannot be wired: receiver present or non-ident parameter
    NB0004,
    /// enumeration with non-unit variants
    NB0005,
    /// settings struct without named fields
    NB0006,
    /// duplicate output name on one function
    NB0007,
}

impl Code {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::NB0001 => "angle requires a floating-point leaf",
            Self::NB0002 => "range requires a numeric leaf",
            Self::NB0003 => "toggle requires bool",
            Self::NB0004 => "unsupported function signature",
            Self::NB0005 => "node enumerations are unit-variant",
            Self::NB0006 => "settings structs use named fields",
            Self::NB0007 => "output names must be unique",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

///
/// Diagnostic
///
/// One validation finding: code, title, message, and source location.
/// Non-fatal by policy — callers emit the finding and keep generating
/// whatever remains feasible.
///

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub code: Code,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(code: Code, span: Span, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            span,
        }
    }

    /// Render as a `compile_error!` carrying code, title, and detail.
    #[must_use]
    pub fn to_compile_error(&self) -> TokenStream {
        let text = format!("{}: {}: {}", self.code, self.code.title(), self.message);

        quote_spanned!(self.span => ::core::compile_error!(#text);)
    }
}

/// Render a batch of findings; empty batches produce no tokens.
#[must_use]
pub fn emit(diagnostics: &[Diagnostic]) -> TokenStream {
    diagnostics.iter().map(Diagnostic::to_compile_error).collect()
}
