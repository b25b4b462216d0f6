//! # msim-resolve
//!
//! The post-parse resolver: C2 of the compiler. Runs a fixed
//! sequence of six sweeps over a [`msim_symbols::SymbolTable`], each
//! declared to read fields any earlier pass wrote and write only the
//! fields assigned to it.

pub mod dependencies;
pub mod groups;
pub mod pass;
pub mod passes;
pub mod resolver;

pub use pass::Pass;
pub use resolver::Resolver;
