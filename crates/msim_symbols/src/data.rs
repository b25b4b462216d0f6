//! Symbol data: the fields every [`crate::SymbolId`] carries, plus the
//! kind-specific [`Payload`].

use crate::entity::{EntityData, EventData, MemberData};
use crate::enumeration::{EnumerationData, EnumeratorData};
use crate::group::GroupData;
use crate::kind::SymbolKind;
use crate::parameter::ParameterData;
use crate::tables::TableData;
use crate::SymbolId;
use msim_base::{Atom, Location};
use rustc_hash::{FxHashMap, FxHashSet};

/// A language a label/note may be supplied in. Languages are themselves
/// `Language` symbols in the table; we key per-language text by the
/// language's interned name to avoid a dependency cycle back through
/// `SymbolId` during early construction.
pub type LanguageId = Atom;

/// One language's label or note, with the explicit-vs-defaulted discipline
/// `eAssignLabel` requires for warning purposes.
#[derive(Debug, Clone, Default)]
pub struct LangEntry {
    pub text: String,
    /// `true` if supplied via `//LABEL(sym,lang)`/`//NOTE(sym,lang)` in
    /// source; `false` if defaulted from the short name or a fallback stem.
    pub explicit: bool,
}

pub type LangMap = FxHashMap<LanguageId, LangEntry>;

/// Kind-specific data, one variant per symbol-kind family that carries a
/// meaningful payload. Plain marker kinds (`Language`, `Module`, `Import`,
/// `Scenario`, `Version`, `Model`, `ModelType`, …) carry `Payload::None`.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Placeholder symbols, and kinds with no structural payload beyond
    /// `unique_name`/`kind`/`location`.
    None,
    Enumeration(EnumerationData),
    Enumerator(EnumeratorData),
    Parameter(ParameterData),
    Table(TableData),
    Entity(EntityData),
    EntityDataMember(MemberData),
    Event(EventData),
    Group(GroupData),
}

/// The full data behind one [`crate::SymbolId`].
#[derive(Debug, Clone)]
pub struct SymbolData {
    pub unique_name: Atom,
    pub kind: SymbolKind,
    pub location: Location,
    pub labels: LangMap,
    pub notes: LangMap,
    /// Global funcs whose body references this symbol.
    pub referenced_by_funcs: FxHashSet<SymbolId>,
    /// Groups (of any kind) that list this symbol as a member.
    pub member_of_groups: FxHashSet<SymbolId>,
    pub payload: Payload,
}

impl SymbolData {
    pub fn new_base(unique_name: Atom, location: Location) -> Self {
        Self {
            unique_name,
            kind: SymbolKind::Base,
            location,
            labels: LangMap::default(),
            notes: LangMap::default(),
            referenced_by_funcs: FxHashSet::default(),
            member_of_groups: FxHashSet::default(),
            payload: Payload::None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind.is_base()
    }

    pub fn label(&self, lang: LanguageId) -> Option<&str> {
        self.labels.get(&lang).map(|e| e.text.as_str())
    }

    pub fn note(&self, lang: LanguageId) -> Option<&str> {
        self.notes.get(&lang).map(|e| e.text.as_str())
    }

    pub fn as_enumeration(&self) -> Option<&EnumerationData> {
        match &self.payload {
            Payload::Enumeration(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_enumeration_mut(&mut self) -> Option<&mut EnumerationData> {
        match &mut self.payload {
            Payload::Enumeration(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_enumerator(&self) -> Option<&EnumeratorData> {
        match &self.payload {
            Payload::Enumerator(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_parameter(&self) -> Option<&ParameterData> {
        match &self.payload {
            Payload::Parameter(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_parameter_mut(&mut self) -> Option<&mut ParameterData> {
        match &mut self.payload {
            Payload::Parameter(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableData> {
        match &self.payload {
            Payload::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut TableData> {
        match &mut self.payload {
            Payload::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&EntityData> {
        match &self.payload {
            Payload::Entity(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_entity_mut(&mut self) -> Option<&mut EntityData> {
        match &mut self.payload {
            Payload::Entity(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_member(&self) -> Option<&MemberData> {
        match &self.payload {
            Payload::EntityDataMember(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_member_mut(&mut self) -> Option<&mut MemberData> {
        match &mut self.payload {
            Payload::EntityDataMember(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_event(&self) -> Option<&EventData> {
        match &self.payload {
            Payload::Event(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_event_mut(&mut self) -> Option<&mut EventData> {
        match &mut self.payload {
            Payload::Event(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&GroupData> {
        match &self.payload {
            Payload::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut GroupData> {
        match &mut self.payload {
            Payload::Group(g) => Some(g),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_base_is_placeholder() {
        let sym = SymbolData::new_base(Atom::EMPTY, Location::synthetic());
        assert!(sym.is_placeholder());
        assert!(sym.as_enumeration().is_none());
    }

    #[test]
    fn label_lookup_by_language() {
        let mut sym = SymbolData::new_base(Atom::EMPTY, Location::synthetic());
        sym.labels.insert(
            Atom::EMPTY,
            LangEntry {
                text: "Sex".to_string(),
                explicit: true,
            },
        );
        assert_eq!(sym.label(Atom::EMPTY), Some("Sex"));
    }
}
