//! The fixed pass sequence.

use std::fmt;

/// The six resolver passes, in the fixed order they must run. Each
/// pass is a full sweep; a pass may read fields any earlier pass wrote but
/// may only write the fields it is declared to own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    CreateMissingSymbols,
    AssignMembers,
    AssignLabel,
    ResolveDataTypes,
    PopulateCollections,
    PopulateDependencies,
}

impl Pass {
    /// The canonical order every resolver run executes in.
    pub const ALL: [Pass; 6] = [
        Pass::CreateMissingSymbols,
        Pass::AssignMembers,
        Pass::AssignLabel,
        Pass::ResolveDataTypes,
        Pass::PopulateCollections,
        Pass::PopulateDependencies,
    ];
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Pass::CreateMissingSymbols => "eCreateMissingSymbols",
            Pass::AssignMembers => "eAssignMembers",
            Pass::AssignLabel => "eAssignLabel",
            Pass::ResolveDataTypes => "eResolveDataTypes",
            Pass::PopulateCollections => "ePopulateCollections",
            Pass::PopulateDependencies => "ePopulateDependencies",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_order_is_fixed() {
        assert_eq!(Pass::ALL[0], Pass::CreateMissingSymbols);
        assert_eq!(Pass::ALL[5], Pass::PopulateDependencies);
    }

    #[test]
    fn display_matches_original_pass_names() {
        assert_eq!(Pass::PopulateCollections.to_string(), "ePopulateCollections");
    }
}
