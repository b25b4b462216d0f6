//! Types and constants.
//!
//! Types form two tiers: a small fixed set of fundamental types, and
//! templated types (the three enumeration flavors plus user classifications)
//! which are represented elsewhere as [`crate::SymbolId`]s of kind
//! `Enumeration` rather than duplicated here. A [`Constant`] is either a
//! literal of a fundamental type or an enumerator reference; both carry the
//! source text they were parsed from so `format_for_storage` can round-trip
//! it without re-deriving a textual form.

use crate::table::SymbolTable;
use crate::SymbolId;

/// The closed set of fundamental (non-templated) types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FundamentalType {
    Bool,
    Char,
    SChar,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    LLong,
    ULLong,
    Float,
    Double,
    LDouble,
    Time,
}

impl FundamentalType {
    /// Size in bytes as emitted code would see it (used by storage-width
    /// decisions and by the metadata builder's digest of a parameter's type).
    pub fn size_bytes(self) -> usize {
        use FundamentalType::*;
        match self {
            Bool | Char | SChar | UChar => 1,
            Short | UShort => 2,
            Int | UInt | Float => 4,
            Long | ULong | LLong | ULLong | Double | Time => 8,
            LDouble => 16,
        }
    }

    pub fn is_integral(self) -> bool {
        !matches!(self, FundamentalType::Float | FundamentalType::Double | FundamentalType::LDouble)
    }
}

/// A reference to a type: either fundamental, or an enumeration symbol
/// (Range/Partition/Classification/BoolEnum all live as `Symbol`s of kind
/// `Enumeration`, so they are referenced rather than re-modeled here).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRef {
    Fundamental(FundamentalType),
    Enumeration(SymbolId),
}

/// A typed literal or enumerator reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    /// The source text the constant was parsed from, kept so
    /// `format_for_storage` can emit it without re-deriving a textual form.
    pub text: String,
    pub type_ref: TypeRef,
}

impl Constant {
    pub fn new(text: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            text: text.into(),
            type_ref,
        }
    }

    /// Parses `text` against a fundamental type, the moral equivalent of
    /// `Type::is_valid_constant` for literals with no enumerator involved.
    pub fn is_valid_constant(&self, table: &SymbolTable) -> bool {
        match self.type_ref {
            TypeRef::Fundamental(FundamentalType::Bool) => {
                matches!(self.text.as_str(), "true" | "false" | "0" | "1")
            }
            TypeRef::Fundamental(ft) if ft.is_integral() => self.text.parse::<i64>().is_ok(),
            TypeRef::Fundamental(_) => self.text.parse::<f64>().is_ok(),
            TypeRef::Enumeration(sym) => table.find_enumerator(sym, &self.text).is_some(),
        }
    }

    /// The zero-valued / first-enumerator default, as an emitted DSL would
    /// expect for an uninitialized cell.
    pub fn default_initial_value(type_ref: TypeRef, table: &SymbolTable) -> Constant {
        match type_ref {
            TypeRef::Fundamental(FundamentalType::Bool) => {
                Constant::new("false", type_ref)
            }
            TypeRef::Fundamental(ft) if ft.is_integral() => Constant::new("0", type_ref),
            TypeRef::Fundamental(_) => Constant::new("0.0", type_ref),
            TypeRef::Enumeration(sym) => {
                let name = table
                    .first_enumerator_name(sym)
                    .unwrap_or_default();
                Constant::new(name, type_ref)
            }
        }
    }

    /// The storage-ready textual form of this constant (currently identity:
    /// the parser-supplied text is already in canonical form for every
    /// fundamental type and for enumerator short names).
    pub fn format_for_storage(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fundamental_sizes() {
        assert_eq!(FundamentalType::Bool.size_bytes(), 1);
        assert_eq!(FundamentalType::Int.size_bytes(), 4);
        assert_eq!(FundamentalType::Double.size_bytes(), 8);
    }

    #[test]
    fn integral_classification() {
        assert!(FundamentalType::Int.is_integral());
        assert!(!FundamentalType::Double.is_integral());
    }

    #[test]
    fn valid_bool_constant() {
        let table = SymbolTable::new();
        let c = Constant::new("true", TypeRef::Fundamental(FundamentalType::Bool));
        assert!(c.is_valid_constant(&table));
    }

    #[test]
    fn invalid_int_constant() {
        let table = SymbolTable::new();
        let c = Constant::new("not-a-number", TypeRef::Fundamental(FundamentalType::Int));
        assert!(!c.is_valid_constant(&table));
    }
}
