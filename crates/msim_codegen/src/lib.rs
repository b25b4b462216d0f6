//! # msim-codegen
//!
//! The deterministic code emitter: C3 of the compiler. Maps a fully
//! resolved [`msim_symbols::SymbolTable`] to the five C++ translation units
//! the companion runtime library expects.

pub mod model;
pub mod random_streams;
pub mod writer;

pub use model::{generate, EmitOptions, GeneratedModel};
pub use random_streams::seed_hash;
pub use writer::Writer;
