//! # msim-compiler
//!
//! The `msimc` command-line driver: wires the CLI to the
//! resolver/emitter/metadata pipeline (C1-C5).

pub mod cli;
pub mod config;
pub mod frontend;
pub mod run;

pub use cli::Cli;
pub use run::{run, run_with_table, Outcome};
