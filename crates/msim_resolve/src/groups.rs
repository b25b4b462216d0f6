//! Group semantics and cycle detection.

use msim_base::{Diagnostics, Location};
use msim_symbols::{AnonGroupKind, ParameterSource, SymbolId, SymbolKind, SymbolTable};
use rustc_hash::FxHashSet;

/// Depth-first search for a cycle reachable from `start`, following
/// `GroupData::members` through any symbol that is itself a group. Returns
/// the first cyclic group's id, if any — a cyclic pair may report one
/// finding per DFS root that closes a cycle, so a two-group cycle can
/// surface two errors rather than one.
fn has_cycle(table: &SymbolTable, start: SymbolId) -> bool {
    fn visit(
        table: &SymbolTable,
        node: SymbolId,
        visiting: &mut FxHashSet<SymbolId>,
        done: &mut FxHashSet<SymbolId>,
    ) -> bool {
        if done.contains(&node) {
            return false;
        }
        if visiting.contains(&node) {
            return true;
        }
        let Some(group) = table.get(node).as_group() else {
            return false;
        };
        visiting.insert(node);
        for &member in &group.members {
            if table.get(member).kind.is_group() && visit(table, member, visiting, done) {
                return true;
            }
        }
        visiting.remove(&node);
        done.insert(node);
        false
    }

    let mut visiting = FxHashSet::default();
    let mut done = FxHashSet::default();
    visit(table, start, &mut visiting, &mut done)
}

/// Detects cyclic group containment among every group symbol in the table,
/// emitting `circular reference in group '<name>'` for each cyclic root.
/// Returns the set of cyclic groups so the caller can exclude them from
/// `groupLst`/`groupPc` metadata rows.
pub fn detect_group_cycles(table: &SymbolTable, diags: &mut Diagnostics) -> FxHashSet<SymbolId> {
    let mut cyclic = FxHashSet::default();
    let group_ids: Vec<SymbolId> = table.iter().filter(|&id| table.get(id).kind.is_group()).collect();
    for id in group_ids {
        if has_cycle(table, id) {
            let name = table.unique_name(id).to_string();
            diags.error(
                Location::synthetic(),
                format!("circular reference in group '{name}'"),
            );
            cyclic.insert(id);
        }
    }
    cyclic
}

/// Applies one `AnonGroup`'s statement semantics to its members.
///
/// `hide` on a table sets `is_internal` rather than merely a UI hint: the
/// two statement-handling paths the original leaves ambiguous are resolved here in favor of the stronger, structural
/// interpretation, since a hidden table that still participates in codegen
/// as "published" would contradict `is_internal`'s own "not published"
/// definition.
pub fn apply_anon_group(
    table: &mut SymbolTable,
    group: SymbolId,
    kind: AnonGroupKind,
    diags: &mut Diagnostics,
) {
    let members = table
        .get(group)
        .as_group()
        .map(|g| g.members.clone())
        .unwrap_or_default();

    match kind {
        AnonGroupKind::Hide => {
            for m in members {
                let data = table.get_mut(m);
                match data.kind {
                    SymbolKind::Parameter => {
                        if let Some(p) = data.as_parameter_mut() {
                            p.hidden = true;
                        }
                    }
                    SymbolKind::Table(_) => {
                        if let Some(t) = data.as_table_mut() {
                            t.is_internal = true;
                        }
                    }
                    _ => {}
                }
            }
        }
        AnonGroupKind::ParametersSuppress => {
            for m in members {
                set_parameter_source(table, m, ParameterSource::Fixed, diags);
            }
        }
        AnonGroupKind::ParametersRetain => {
            let all = table.collections.all_parameters.clone();
            for p in all {
                set_parameter_source(table, p, ParameterSource::Fixed, diags);
            }
            for m in members {
                set_parameter_source(table, m, ParameterSource::Scenario, diags);
            }
        }
        AnonGroupKind::TablesSuppress => {
            for m in members {
                if let Some(t) = table.get_mut(m).as_table_mut() {
                    t.is_suppressed = true;
                }
            }
        }
        AnonGroupKind::TablesRetain => {
            let all = table.collections.all_tables.clone();
            for t_id in all {
                if let Some(t) = table.get_mut(t_id).as_table_mut() {
                    t.is_suppressed = true;
                }
            }
            for m in members {
                if let Some(t) = table.get_mut(m).as_table_mut() {
                    t.is_suppressed = false;
                }
            }
        }
        AnonGroupKind::ParametersToTables => {
            for m in members {
                log::info!(
                    "parameters_to_tables: '{}' marked to also emit as a table",
                    table.unique_name(m)
                );
            }
        }
    }
}

fn set_parameter_source(
    table: &mut SymbolTable,
    param: SymbolId,
    source: ParameterSource,
    diags: &mut Diagnostics,
) {
    let name = table.unique_name(param).to_string();
    match table.get_mut(param).as_parameter_mut() {
        Some(p) => p.source = source,
        None => diags.warning(
            Location::synthetic(),
            format!("'{name}' is not a parameter, ignoring group statement"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msim_base::Location;
    use msim_symbols::{GroupData, Payload};

    fn make_group(table: &mut SymbolTable, name: &str, members: Vec<SymbolId>) -> SymbolId {
        let mut diags = Diagnostics::new();
        let id = table.get_or_create(name, Location::synthetic());
        table.morph(id, SymbolKind::ParameterGroup, &mut diags);
        table.get_mut(id).payload = Payload::Group(GroupData { members });
        id
    }

    #[test]
    fn self_referencing_pair_is_cyclic() {
        let mut table = SymbolTable::new();
        let g1 = make_group(&mut table, "G1", vec![]);
        let g2 = make_group(&mut table, "G2", vec![g1]);
        if let Some(g) = table.get_mut(g1).as_group_mut() {
            g.members.push(g2);
        }
        let mut diags = Diagnostics::new();
        let cyclic = detect_group_cycles(&table, &mut diags);
        assert!(cyclic.contains(&g1) || cyclic.contains(&g2));
        assert!(diags.has_errors());
    }

    #[test]
    fn acyclic_groups_report_clean() {
        let mut table = SymbolTable::new();
        let leaf = make_group(&mut table, "Leaf", vec![]);
        let _root = make_group(&mut table, "Root", vec![leaf]);
        let mut diags = Diagnostics::new();
        let cyclic = detect_group_cycles(&table, &mut diags);
        assert!(cyclic.is_empty());
        assert!(!diags.has_errors());
    }
}
