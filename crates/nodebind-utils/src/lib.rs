//! Shared helpers for nodebind codegen and runtime: stable identity hashing
//! and display-name casing. No runtime dependencies beyond case conversion.

pub mod case;
pub mod hash;

pub use hash::{fnv1a_64, node_id};
