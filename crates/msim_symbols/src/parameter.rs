//! Parameters.

use crate::types::{Constant, TypeRef};
use crate::SymbolId;
use rustc_hash::FxHashMap;

/// Where a parameter's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterSource {
    /// Not yet resolved; never observed after `eResolveDataTypes`.
    Missing,
    /// Burned in at compile time; value lives in the fixed-parameter
    /// translation unit.
    Fixed,
    /// Read from the runtime's parameter store at `ModelStartup`.
    Scenario,
    /// Computed by developer `PreSimulation_*` hooks.
    Derived,
}

/// Per-language free-text notes attached to a parameter's *value* (distinct
/// from the symbol-level label/note carried by every symbol).
pub type ValueNotes = FxHashMap<crate::LanguageId, String>;

/// A `Parameter` symbol's data.
#[derive(Debug, Clone)]
pub struct ParameterData {
    pub source: ParameterSource,
    pub datatype: TypeRef,
    /// Ordered list of dimension enumerations, outermost first.
    pub dimensions: Vec<SymbolId>,
    /// Cached cell count per dimension, in `dimensions` order; populated by
    /// the resolver once every dimension's enumerator count is known.
    pub dimension_sizes: Vec<usize>,
    /// Count of trailing dimensions forming a conditional distribution, if
    /// this parameter is annotated `cumrate`.
    pub cumrate_trailing_dims: Option<usize>,
    pub haz1rate: bool,
    pub hidden: bool,
    pub initializer: Vec<Constant>,
    pub sub_value_count: u32,
    pub value_notes: ValueNotes,
}

impl ParameterData {
    /// `size() = product(dimension_sizes)`. A rank-0
    /// (scalar) parameter has an empty dimension list and size 1.
    pub fn size(&self) -> usize {
        self.dimension_sizes.iter().product::<usize>().max(
            if self.dimension_sizes.is_empty() {
                1
            } else {
                0
            },
        )
    }

    /// Product of the trailing `cumrate` dimensions' sizes, or `None` if
    /// this parameter is not a cumrate parameter.
    pub fn distribution_size(&self) -> Option<usize> {
        let trailing = self.cumrate_trailing_dims?;
        let start = self.dimension_sizes.len().saturating_sub(trailing);
        Some(self.dimension_sizes[start..].iter().product())
    }

    /// Product of the leading (non-distribution) dimensions' sizes.
    pub fn conditioning_size(&self) -> Option<usize> {
        let trailing = self.cumrate_trailing_dims?;
        let start = self.dimension_sizes.len().saturating_sub(trailing);
        Some(self.dimension_sizes[..start].iter().product())
    }

    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }
}
