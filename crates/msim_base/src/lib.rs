#![cfg_attr(docsrs, feature(doc_cfg))]

//! # msim-base
//!
//! Pure structural atoms shared by every crate in the msim compiler.
//!
//! - [`Arena`] — bump allocation for stable, immutable references
//! - [`SlotArena`]/[`SlotId`] — index-stable storage for values that are
//!   mutated in place after creation (the symbol table's morph operation)
//! - [`Interner`]/[`Atom`] — string interning for O(1) equality
//! - [`Span`]/[`Location`] — source position tracking
//! - [`Diagnostics`]/[`Diagnostic`]/[`FatalError`] — the error/warning/fatal
//!   discipline the resolver's passes report through
//!
//! # Design Principles
//!
//! This crate has no knowledge of the DSL's grammar or of C++ code
//! generation. It provides only generic, reusable infrastructure that the
//! symbol table, resolver, emitter, metadata builder, and messaging layer
//! build upon.

pub mod arena;
pub mod error;
pub mod intern;
pub mod slot;
pub mod span;

pub use arena::Arena;
pub use error::{Diagnostic, Diagnostics, FatalError, Result, Severity};
pub use intern::{Atom, AtomEq, Interner};
pub use slot::{SlotArena, SlotId};
pub use span::{Location, Span};
