//! Public facade for nodebind.
//!
//! ## Crate layout
//! - `core`: runtime marshaling — scalars, trees, descriptors, dispatcher,
//!   host boundary traits.
//! - `nodebind-derive`: `#[node]`, `#[derive(NodeEnum)]`, `#[settings]` —
//!   compile-time wiring synthesis against `core`.
//! - `nodebind-utils`: identity hashing and casing shared by both.
//!
//! Generated code resolves everything through this facade, so downstream
//! crates only ever depend on `nodebind`.

pub use nodebind_core as core;
pub use nodebind_derive::{NodeEnum, node, settings};

// item-shape marshaling for generated enumeration code
pub use nodebind_core::impl_item_pin;

/// re-exports
///
/// generated code can use these, stops the user having to specify the
/// dependencies in their own Cargo.toml
pub mod __reexports {
    pub use serde_json;
}

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use nodebind_derive::{NodeEnum, node, settings};
}
