//! # msim-symbols
//!
//! The symbol table: C1 of the compiler.
//!
//! Every declared named thing in the DSL becomes a [`SymbolData`] addressed
//! by a stable [`SymbolId`]. Kinds are a closed tagged sum ([`SymbolKind`])
//! rather than an inheritance tree; a symbol's identity survives `morph`
//! because [`SymbolId`] is an index into a [`msim_base::SlotArena`], not a
//! pointer to a reallocatable object.

pub mod data;
pub mod entity;
pub mod enumeration;
pub mod group;
pub mod kind;
pub mod parameter;
pub mod table;
pub mod tables;
pub mod types;

pub use data::{LangEntry, LangMap, LanguageId, Payload, SymbolData};
pub use entity::{EntityData, EventData, MemberData};
pub use enumeration::{EnumerationData, EnumerationVariant, EnumeratorData, StorageWidth};
pub use group::{AnonGroupEffect, GroupData};
pub use kind::{AnonGroupKind, DataMemberKind, EnumerationKind, SymbolKind, TableKind};
pub use parameter::{ParameterData, ParameterSource, ValueNotes};
pub use table::{Collections, SymbolId, SymbolTable};
pub use tables::{Accumulator, Measure, TableData};
pub use types::{Constant, FundamentalType, TypeRef};
