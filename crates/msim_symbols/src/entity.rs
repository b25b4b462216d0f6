//! Entities and their data members.

use crate::kind::DataMemberKind;
use crate::SymbolId;
use rustc_hash::FxHashSet;

/// An `Entity` symbol's data: an ordered collection of data-member ids.
/// Each member's own kind-specific payload lives on that member's own
/// [`MemberData`] (attached to its own slot via `Payload::EntityDataMember`).
#[derive(Debug, Clone, Default)]
pub struct EntityData {
    pub members: Vec<SymbolId>,
}

/// An `EntityDataMember` symbol's data.
///
/// `offset` is the invariant-checked "every attribute has a unique offset
/// within the entity" position. `reads` is the set of attributes
/// this member's own formula references, supplied alongside the rest of
/// the member's payload; `pp_dependent_attributes` is derived from it by
/// `ePopulateDependencies` and is the set actually consulted by
/// the emitter's notify dispatch.
#[derive(Debug, Clone)]
pub struct MemberData {
    pub kind: DataMemberKind,
    pub owner: SymbolId,
    pub offset: u32,
    pub reads: FxHashSet<SymbolId>,
    pub pp_dependent_attributes: FxHashSet<SymbolId>,
}

impl MemberData {
    pub fn new(kind: DataMemberKind, owner: SymbolId, offset: u32) -> Self {
        Self {
            kind,
            owner,
            offset,
            reads: FxHashSet::default(),
            pp_dependent_attributes: FxHashSet::default(),
        }
    }

    pub fn is_maintained(&self) -> bool {
        matches!(
            self.kind,
            DataMemberKind::IdentityAttribute
                | DataMemberKind::DerivedAttribute
                | DataMemberKind::MultilinkAggregateAttribute
        )
    }
}

/// An `Event` symbol's data: its time/implement function pair, the
/// attributes its time function reads (`reads`), and the derived set
/// that must trigger a re-schedule of its time (`dependent_attributes`,
/// populated by `ePopulateDependencies`).
#[derive(Debug, Clone)]
pub struct EventData {
    pub owner: SymbolId,
    pub time_func: SymbolId,
    pub implement_func: SymbolId,
    pub reads: FxHashSet<SymbolId>,
    pub dependent_attributes: FxHashSet<SymbolId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use msim_base::SlotArena;

    #[test]
    fn maintained_kinds_are_recognized() {
        let mut arena: SlotArena<u8> = SlotArena::new();
        let owner = SymbolId::from_slot(arena.insert(0));
        let identity = MemberData::new(DataMemberKind::IdentityAttribute, owner, 0);
        let simple = MemberData::new(DataMemberKind::SimpleAttribute, owner, 1);
        assert!(identity.is_maintained());
        assert!(!simple.is_maintained());
    }
}
