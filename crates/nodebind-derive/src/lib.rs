//! Compile-time wiring synthesis for nodebind. One annotated declaration
//! in, one wiring unit out: a `NodeSpec` impl for functions, leaf impls
//! for enumerations, keyed accessors for settings structs. Identities are
//! hashed here, once, and embedded as literals.

use proc_macro::TokenStream;

mod emit;
mod helper;
mod node;
mod validate;

pub(crate) mod prelude {
    pub(crate) use crate::{
        helper::*,
        validate::{Code, Diagnostic},
    };
    pub(crate) use darling::FromMeta;
    pub(crate) use proc_macro2::TokenStream;
    pub(crate) use quote::{format_ident, quote};
    pub(crate) use syn::{Ident, spanned::Spanned};
}

/// Expose a free function as a host node.
///
/// ```ignore
/// #[node(namespace = "Demo.Math", category = "Maths", subcategory = "Operators")]
/// pub fn add(#[param(range(min = 0.0, max = 5.0))] a: i64, b: i64, c: &mut i64) -> i64 { .. }
/// ```
#[proc_macro_attribute]
pub fn node(args: TokenStream, input: TokenStream) -> TokenStream {
    emit::component::expand(args.into(), input.into()).into()
}

/// Marshal a unit-variant enumeration through the host's integer
/// surrogate, with a named-value table for dropdowns.
#[proc_macro_derive(NodeEnum)]
pub fn derive_node_enum(input: TokenStream) -> TokenStream {
    emit::enums::expand(input.into()).into()
}

/// Expose a plain struct's fields as persisted settings: keyed accessor,
/// setter, reset, and change hook per field.
#[proc_macro_attribute]
pub fn settings(args: TokenStream, input: TokenStream) -> TokenStream {
    emit::settings::expand(args.into(), input.into()).into()
}
