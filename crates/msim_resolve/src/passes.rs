//! The six pass bodies, each a full sweep over the table.
//!
//! Each function only writes the fields its own pass declares as
//! outputs; later passes may read them. None of these functions re-enters
//! an earlier pass.

use crate::{dependencies, groups};
use msim_base::{Diagnostics, Location};
use msim_symbols::{
    AnonGroupKind, DataMemberKind, EnumerationVariant, LangEntry, Payload, StorageWidth, SymbolId,
    SymbolKind, SymbolTable,
};

/// Pass 1 — `eCreateMissingSymbols`: generates symbols implicit in
/// declarations. After this pass the symbol population is fixed.
pub fn create_missing_symbols(table: &mut SymbolTable, diags: &mut Diagnostics) {
    let enumerations: Vec<SymbolId> = table
        .iter()
        .filter(|&id| table.get(id).kind.is_enumeration())
        .collect();

    for enum_id in enumerations {
        let enum_name = table.unique_name(enum_id).to_string();
        finalize_range_storage(table, enum_id, &enum_name, diags);
    }
}

/// Picks the storage width for a `Range` enumeration directly from its
/// `(lo, hi)` bound. Range values are never materialized as `Enumerator`
/// symbols — a range can hold well over 100,000 levels, and both
/// [`SymbolTable::find_enumerator`] and the metadata builder already
/// derive membership and row names from `(lo, hi)` arithmetic instead.
fn finalize_range_storage(
    table: &mut SymbolTable,
    enum_id: SymbolId,
    enum_name: &str,
    diags: &mut Diagnostics,
) {
    let (lo, hi) = match table.get(enum_id).as_enumeration().map(|e| &e.variant) {
        Some(EnumerationVariant::Range { lo, hi, .. }) => (*lo, *hi),
        _ => return,
    };

    if lo > hi {
        diags.error(
            Location::synthetic(),
            format!("range '{enum_name}' has lo={lo} > hi={hi}, no enumerators generated"),
        );
        return;
    }

    let storage = StorageWidth::for_range(lo, hi);
    if let Some(e) = table.get_mut(enum_id).as_enumeration_mut() {
        if let EnumerationVariant::Range { storage: s, .. } = &mut e.variant {
            *s = storage;
        }
    }
}

/// Pass 2 — `eAssignMembers`: records parent/child relations discoverable
/// purely from the structural payload (group membership cross-references).
/// Name-reference resolution proper belongs to the out-of-scope parser;
/// by the time symbols reach this resolver their references are already
/// typed `SymbolId`s.
pub fn assign_members(table: &mut SymbolTable, _diags: &mut Diagnostics) {
    let groups: Vec<(SymbolId, Vec<SymbolId>)> = table
        .iter()
        .filter_map(|id| table.get(id).as_group().map(|g| (id, g.members.clone())))
        .collect();

    for (group_id, members) in groups {
        for member in members {
            table.get_mut(member).member_of_groups.insert(group_id);
        }
    }
}

/// Pass 3 — `eAssignLabel`: binds per-language labels/notes, defaulting to
/// the symbol's short name (the segment after the last `.`) when no
/// explicit label was supplied.
pub fn assign_label(table: &mut SymbolTable, _diags: &mut Diagnostics) {
    use msim_base::Atom;

    let ids: Vec<SymbolId> = table.iter().collect();
    for id in ids {
        let name = table.unique_name(id).to_string();
        let short = name.rsplit('.').next().unwrap_or(&name).to_string();
        let data = table.get_mut(id);
        data.labels.entry(Atom::EMPTY).or_insert(LangEntry {
            text: short,
            explicit: false,
        });
    }
}

/// Pass 4 — `eResolveDataTypes`: computes inferred types/widths and
/// validates initializer sizes against declared shape.
pub fn resolve_data_types(table: &mut SymbolTable, diags: &mut Diagnostics) {
    let param_ids: Vec<SymbolId> = table
        .iter()
        .filter(|&id| table.get(id).kind == SymbolKind::Parameter)
        .collect();

    for id in param_ids {
        let dims = table
            .get(id)
            .as_parameter()
            .map(|p| p.dimensions.clone())
            .unwrap_or_default();
        let sizes: Vec<usize> = dims
            .iter()
            .map(|&d| {
                table
                    .get(d)
                    .as_enumeration()
                    .map(|e| e.enumerator_count())
                    .unwrap_or(0)
            })
            .collect();

        let name = table.unique_name(id).to_string();
        let initializer = if let Some(p) = table.get_mut(id).as_parameter_mut() {
            p.dimension_sizes = sizes;
            let expected = p.size();
            let actual = p.initializer.len();
            if actual > expected {
                diags.error(
                    Location::synthetic(),
                    format!(
                        "initializer for parameter '{name}' has size {actual}, exceeds {expected}"
                    ),
                );
            } else if actual > 0 && actual != expected {
                diags.error(
                    Location::synthetic(),
                    format!(
                        "initializer for parameter '{name}' has size {actual}, expected {expected}"
                    ),
                );
            }
            p.initializer.clone()
        } else {
            continue;
        };

        // Each initializer cell must parse against the parameter's declared
        // datatype — a classification value must name one of its
        // enumerators, an integral literal must parse as an integer, etc.
        // One error per offending cell rather than aborting at the first.
        for (cell, constant) in initializer.iter().enumerate() {
            if !constant.is_valid_constant(table) {
                diags.error(
                    Location::synthetic(),
                    format!(
                        "initializer for parameter '{name}' has an invalid value '{}' at cell {cell}",
                        constant.text
                    ),
                );
            }
        }
    }
}

/// Pass 5 — `ePopulateCollections`: builds the per-kind global lists and
/// rejects cyclic group containment.
pub fn populate_collections(table: &mut SymbolTable, diags: &mut Diagnostics) {
    let cyclic = groups::detect_group_cycles(table, diags);

    table.collections = msim_symbols::Collections::default();
    let ids: Vec<SymbolId> = table.iter().collect();
    for id in ids {
        let kind = table.get(id).kind;
        match kind {
            SymbolKind::Language => table.collections.all_languages.push(id),
            SymbolKind::Enumeration(_) => table.collections.all_enumerations.push(id),
            SymbolKind::Parameter => table.collections.all_parameters.push(id),
            SymbolKind::ParameterGroup if !cyclic.contains(&id) => {
                table.collections.all_parameter_groups.push(id)
            }
            SymbolKind::Table(_) => table.collections.all_tables.push(id),
            SymbolKind::TableGroup if !cyclic.contains(&id) => {
                table.collections.all_table_groups.push(id)
            }
            SymbolKind::Entity => table.collections.all_entities.push(id),
            SymbolKind::EntitySet => table.collections.all_entity_sets.push(id),
            SymbolKind::AttributeGroup if !cyclic.contains(&id) => {
                table.collections.all_attribute_groups.push(id)
            }
            _ => {}
        }
    }
}

/// Pass 6 — `ePopulateDependencies`: propagates table dependency groups and
/// applies retain/suppress/hide group semantics. A malformed dependency
/// group (one naming a non-table symbol) is a fatal condition — it is
/// reported through `diags.fatal` and aborts the pass, and the resolver,
/// immediately rather than continuing with an incoherent dependency graph.
pub fn populate_dependencies(table: &mut SymbolTable, diags: &mut Diagnostics) -> msim_base::Result<()> {
    let dependency_groups: Vec<Vec<SymbolId>> = table
        .iter()
        .filter(|&id| table.get(id).kind == SymbolKind::Dependency)
        .filter_map(|id| table.get(id).as_group().map(|g| g.members.clone()))
        .collect();

    for members in dependency_groups {
        dependencies::apply_dependency_group(table, &members, diags)?;
    }

    let anon_groups: Vec<(SymbolId, AnonGroupKind)> = table
        .iter()
        .filter_map(|id| match table.get(id).kind {
            SymbolKind::AnonGroup(k) => Some((id, k)),
            _ => None,
        })
        .collect();

    for (id, kind) in anon_groups {
        groups::apply_anon_group(table, id, kind, diags);
    }

    populate_attribute_dependencies(table, diags);
    Ok(())
}

/// Part of pass 6: derives `pp_dependent_attributes`/`dependent_attributes`
/// from each maintained member's/event's own `reads` set, the attribute
/// references its own formula/time-function carries in from the front end.
/// A read that does not name a data member of the same owning entity is
/// rejected with one diagnostic per offending reference and dropped from
/// the derived set, since cross-entity notification has no emitted target.
fn populate_attribute_dependencies(table: &mut SymbolTable, diags: &mut Diagnostics) {
    let members: Vec<SymbolId> = table
        .iter()
        .filter(|&id| matches!(table.get(id).kind, SymbolKind::EntityDataMember(k) if k != DataMemberKind::Event))
        .collect();

    for id in members {
        let Some(m) = table.get(id).as_member() else {
            continue;
        };
        if !m.is_maintained() {
            continue;
        }
        let owner = m.owner;
        let reads = m.reads.clone();
        let name = table.unique_name(id).to_string();
        let resolved = resolve_reads(table, owner, &reads, &name, diags);
        if let Some(m) = table.get_mut(id).as_member_mut() {
            m.pp_dependent_attributes = resolved;
        }
    }

    let events: Vec<SymbolId> = table
        .iter()
        .filter(|&id| {
            matches!(
                table.get(id).kind,
                SymbolKind::EntityDataMember(DataMemberKind::Event)
            )
        })
        .collect();

    for id in events {
        let Some(e) = table.get(id).as_event() else {
            continue;
        };
        let owner = e.owner;
        let reads = e.reads.clone();
        let name = table.unique_name(id).to_string();
        let resolved = resolve_reads(table, owner, &reads, &name, diags);
        if let Some(e) = table.get_mut(id).as_event_mut() {
            e.dependent_attributes = resolved;
        }
    }
}

fn resolve_reads(
    table: &SymbolTable,
    owner: SymbolId,
    reads: &std::collections::HashSet<SymbolId, rustc_hash::FxBuildHasher>,
    name: &str,
    diags: &mut Diagnostics,
) -> std::collections::HashSet<SymbolId, rustc_hash::FxBuildHasher> {
    let siblings = table
        .get(owner)
        .as_entity()
        .map(|e| e.members.clone())
        .unwrap_or_default();

    let mut resolved = rustc_hash::FxHashSet::default();
    for &dep in reads {
        if siblings.contains(&dep) {
            resolved.insert(dep);
        } else {
            let dep_name = table.unique_name(dep).to_string();
            diags.error(
                Location::synthetic(),
                format!(
                    "'{name}' cannot depend on '{dep_name}': not a data member of the same entity"
                ),
            );
        }
    }
    resolved
}
