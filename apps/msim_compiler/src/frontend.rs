//! The parser/front-end boundary: a DSL front-end's job is to fill the
//! symbol table before C2-C5 run, but the lexer/parser grammar itself is
//! out of scope here. [`Frontend`] is the interface point a real DSL
//! front-end would implement; this repository ships only the empty one,
//! sufficient to exercise the resolve → emit → metadata pipeline.

use msim_base::Diagnostics;
use msim_symbols::SymbolTable;

/// Populates a [`SymbolTable`] from DSL source and parameter data files.
/// A real implementation would lex/parse `.ompp`/`.mpp` modules and
/// `.dat`/`.csv`/`.tsv` parameter files — both out of this
/// compiler's scope.
pub trait Frontend {
    fn populate(&self, table: &mut SymbolTable, diags: &mut Diagnostics);
}

/// A front-end that declares no symbols. Useful for exercising the
/// pipeline against a table built directly by a caller (tests, or a
/// future real front-end wired in later).
#[derive(Debug, Default)]
pub struct EmptyFrontend;

impl Frontend for EmptyFrontend {
    fn populate(&self, _table: &mut SymbolTable, _diags: &mut Diagnostics) {
        log::debug!("EmptyFrontend: no source parsed, symbol table left as-is");
    }
}
