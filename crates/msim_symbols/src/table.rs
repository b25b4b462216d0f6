//! The symbol table itself.
//!
//! Storage is a [`SlotArena<SymbolData>`] plus a name index. A [`SymbolId`]
//! is a stable index into the arena — the Rust rendering of the "reference
//! to pointer into a stable slot" pattern, so that a
//! reference captured during parsing survives `morph` without needing a
//! `SymbolTable` borrow at the point of capture.

use crate::data::SymbolData;
use crate::enumeration::EnumerationVariant;
use crate::kind::SymbolKind;
use msim_base::{Atom, Diagnostics, Interner, Location, SlotArena, SlotId};
use rustc_hash::FxHashMap;

/// A stable reference to one symbol. Remains valid for the table's whole
/// lifetime, including across `morph`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SymbolId(SlotId<SymbolData>);

impl SymbolId {
    pub(crate) fn from_slot(slot: SlotId<SymbolData>) -> Self {
        SymbolId(slot)
    }
}

/// The closed per-kind post-parse collections populated in
/// `ePopulateCollections`: `pp_all_parameters`,
/// `pp_all_tables`, etc. Stored here rather than recomputed on demand since
/// downstream passes and the emitter iterate them repeatedly.
#[derive(Debug, Default)]
pub struct Collections {
    pub all_languages: Vec<SymbolId>,
    pub all_enumerations: Vec<SymbolId>,
    pub all_parameters: Vec<SymbolId>,
    pub all_parameter_groups: Vec<SymbolId>,
    pub all_tables: Vec<SymbolId>,
    pub all_table_groups: Vec<SymbolId>,
    pub all_entities: Vec<SymbolId>,
    pub all_entity_sets: Vec<SymbolId>,
    pub all_attribute_groups: Vec<SymbolId>,
}

/// The symbol table: C1 of the compiler.
pub struct SymbolTable {
    slots: SlotArena<SymbolData>,
    by_name: FxHashMap<Atom, SymbolId>,
    interner: Interner,
    pub collections: Collections,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            slots: SlotArena::new(),
            by_name: FxHashMap::default(),
            interner: Interner::new(),
            collections: Collections::default(),
        }
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn interner_mut(&mut self) -> &mut Interner {
        &mut self.interner
    }

    /// Idempotent creation of a placeholder symbol on first reference.
    /// Returns the existing id if `name` is already known.
    pub fn get_or_create(&mut self, name: &str, decl_loc: Location) -> SymbolId {
        let atom = self.interner.intern(name);
        if let Some(&id) = self.by_name.get(&atom) {
            log::debug!("get_or_create {name}: existing");
            return id;
        }
        let slot = self.slots.insert(SymbolData::new_base(atom, decl_loc));
        let id = SymbolId::from_slot(slot);
        self.by_name.insert(atom, id);
        log::debug!("get_or_create {name}: new placeholder");
        id
    }

    /// Morphs `sym` from a placeholder to a concrete kind, mutating its
    /// slot in place so its `SymbolId` stays valid.
    ///
    /// Fails (diagnostic, no mutation) if `sym` is already concrete with a
    /// *different* kind; morphing a placeholder, or re-morphing to the same
    /// kind, succeeds.
    pub fn morph(
        &mut self,
        sym: SymbolId,
        kind: SymbolKind,
        diags: &mut Diagnostics,
    ) -> bool {
        let data = self.slots.get_mut(sym.0);
        if !data.kind.is_base() && data.kind != kind {
            let name = self.interner.resolve(data.unique_name).to_string();
            diags.error(
                data.location.clone(),
                format!(
                    "cannot morph symbol '{name}' from {} to {}",
                    data.kind.tag(),
                    kind.tag()
                ),
            );
            log::error!("morph rejected: {name} already {}", data.kind.tag());
            return false;
        }
        data.kind = kind;
        true
    }

    pub fn get(&self, id: SymbolId) -> &SymbolData {
        self.slots.get(id.0)
    }

    pub fn get_mut(&mut self, id: SymbolId) -> &mut SymbolData {
        self.slots.get_mut(id.0)
    }

    pub fn unique_name(&self, id: SymbolId) -> &str {
        self.interner.resolve(self.get(id).unique_name)
    }

    /// `find(name) -> Symbol* | null`.
    pub fn find(&self, name: &str) -> Option<SymbolId> {
        let atom = self.interner.lookup(name)?;
        self.by_name.get(&atom).copied()
    }

    /// `find_a(kind) -> Symbol* | null`, for singleton kinds like `Model`,
    /// `Version`, `ModelType`.
    pub fn find_a(&self, kind: SymbolKind) -> Option<SymbolId> {
        self.slots
            .iter()
            .find(|(_, data)| data.kind == kind)
            .map(|(slot, _)| SymbolId::from_slot(slot))
    }

    pub fn iter(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.slots.iter().map(|(slot, _)| SymbolId::from_slot(slot))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Looks up an enumerator of `enumeration` by its short name, for
    /// `Constant::is_valid_constant`. A `Range` has no materialized
    /// enumerator symbols, so membership is an arithmetic bounds check
    /// against `short_name` parsed as an integer, returning the range's own
    /// id as the "found" marker since there is no narrower symbol to return.
    pub fn find_enumerator(&self, enumeration: SymbolId, short_name: &str) -> Option<SymbolId> {
        let data = self.get(enumeration).as_enumeration()?;
        if let EnumerationVariant::Range { lo, hi, .. } = &data.variant {
            let value: i64 = short_name.parse().ok()?;
            return (*lo..=*hi).contains(&value).then_some(enumeration);
        }
        data.variant.enumerators().iter().copied().find(|&e| {
            self.unique_name(e)
                .rsplit('.')
                .next()
                .unwrap_or("")
                == short_name
        })
    }

    pub fn first_enumerator_name(&self, enumeration: SymbolId) -> Option<String> {
        let data = self.get(enumeration).as_enumeration()?;
        if let EnumerationVariant::Range { lo, hi, .. } = &data.variant {
            return (*hi >= *lo).then(|| lo.to_string());
        }
        let first = *data.variant.enumerators().first()?;
        Some(self.unique_name(first).to_string())
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_create_is_idempotent() {
        let mut table = SymbolTable::new();
        let a = table.get_or_create("Sex", Location::synthetic());
        let b = table.get_or_create("Sex", Location::synthetic());
        assert_eq!(a, b);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn distinct_names_get_distinct_ids() {
        let mut table = SymbolTable::new();
        let a = table.get_or_create("Sex", Location::synthetic());
        let b = table.get_or_create("Age", Location::synthetic());
        assert_ne!(a, b);
    }

    #[test]
    fn morph_from_placeholder_succeeds() {
        let mut table = SymbolTable::new();
        let mut diags = Diagnostics::new();
        let sym = table.get_or_create("mortality", Location::synthetic());
        assert!(table.morph(sym, SymbolKind::Parameter, &mut diags));
        assert_eq!(table.get(sym).kind, SymbolKind::Parameter);
        assert!(!diags.has_errors());
    }

    #[test]
    fn morph_between_concrete_kinds_fails() {
        let mut table = SymbolTable::new();
        let mut diags = Diagnostics::new();
        let sym = table.get_or_create("mortality", Location::synthetic());
        assert!(table.morph(sym, SymbolKind::Parameter, &mut diags));
        assert!(!table.morph(sym, SymbolKind::Entity, &mut diags));
        assert_eq!(table.get(sym).kind, SymbolKind::Parameter);
        assert!(diags.has_errors());
    }

    #[test]
    fn find_locates_existing_symbol() {
        let mut table = SymbolTable::new();
        let sym = table.get_or_create("Sex", Location::synthetic());
        assert_eq!(table.find("Sex"), Some(sym));
        assert_eq!(table.find("Nope"), None);
    }

    #[test]
    fn find_a_locates_singleton_kind() {
        let mut table = SymbolTable::new();
        let mut diags = Diagnostics::new();
        let sym = table.get_or_create("TheModel", Location::synthetic());
        table.morph(sym, SymbolKind::Model, &mut diags);
        assert_eq!(table.find_a(SymbolKind::Model), Some(sym));
        assert_eq!(table.find_a(SymbolKind::Version), None);
    }

    #[test]
    fn identity_survives_morph() {
        let mut table = SymbolTable::new();
        let mut diags = Diagnostics::new();
        let sym = table.get_or_create("mortality", Location::synthetic());
        let before = table.unique_name(sym).to_string();
        table.morph(sym, SymbolKind::Parameter, &mut diags);
        assert_eq!(table.unique_name(sym), before);
        assert_eq!(table.find("mortality"), Some(sym));
    }
}
