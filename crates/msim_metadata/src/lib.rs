//! # msim-metadata
//!
//! The metadata builder: C4 of the compiler. Transforms a resolved
//! [`msim_symbols::SymbolTable`] into the relational row families
//! downstream tooling expects, with a stable content-digest discipline and
//! default workset construction.

pub mod builder;
pub mod digest;
pub mod holder;
pub mod rows;
pub mod workset;

pub use builder::{build, ModelInfo};
pub use digest::digest_hex;
pub use holder::MetaModelHolder;
pub use workset::{build_workset, Workset, WorksetParamEntry};
