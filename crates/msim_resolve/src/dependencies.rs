//! Dependency-group propagation.

use msim_base::{Diagnostics, Location, Result};
use msim_symbols::{SymbolId, SymbolTable};

/// Applies one `Dependency` group's "table X requires {Y, Z, …}" statement:
/// `members[0]` is the requirer, `members[1..]` the required tables.
/// Populates `X.pp_tables_required` (here: `TableData::requires`) and each
/// required table's `pp_tables_requiring` (`TableData::requiring`).
///
/// A `Dependency` group can only ever name tables — if either side of a
/// statement has morphed to anything else the resolver cannot make
/// sense of the downstream `requires`/`requiring` graph, so this aborts
/// the whole resolver run rather than silently dropping the statement.
pub fn apply_dependency_group(
    table: &mut SymbolTable,
    members: &[SymbolId],
    diags: &mut Diagnostics,
) -> Result<()> {
    let Some((&requirer, required)) = members.split_first() else {
        return Ok(());
    };
    if !table.get(requirer).kind.is_table() {
        let name = table.unique_name(requirer).to_string();
        return Err(diags.fatal(
            Location::synthetic(),
            format!("dependency group names '{name}' as a requirer, but it is not a table"),
        ));
    }
    for &req in required {
        if !table.get(req).kind.is_table() {
            let name = table.unique_name(req).to_string();
            return Err(diags.fatal(
                Location::synthetic(),
                format!("dependency group names '{name}' as required, but it is not a table"),
            ));
        }
        table.get_mut(requirer).as_table_mut().unwrap().requires.insert(req);
        table.get_mut(req).as_table_mut().unwrap().requiring.insert(requirer);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use msim_base::{Diagnostics, Location};
    use msim_symbols::{Payload, SymbolKind, TableData};

    fn make_table(table: &mut SymbolTable, name: &str) -> SymbolId {
        let mut diags = Diagnostics::new();
        let id = table.get_or_create(name, Location::synthetic());
        table.morph(id, SymbolKind::Table(msim_symbols::TableKind::Entity), &mut diags);
        table.get_mut(id).payload = Payload::Table(TableData::new());
        id
    }

    #[test]
    fn requirer_and_required_link_both_directions() {
        let mut table = SymbolTable::new();
        let mut diags = Diagnostics::new();
        let t1 = make_table(&mut table, "T1");
        let t2 = make_table(&mut table, "T2");
        assert!(apply_dependency_group(&mut table, &[t2, t1], &mut diags).is_ok());
        assert!(table.get(t2).as_table().unwrap().requires.contains(&t1));
        assert!(table.get(t1).as_table().unwrap().requiring.contains(&t2));
    }

    #[test]
    fn non_table_requirer_is_fatal() {
        let mut table = SymbolTable::new();
        let mut diags = Diagnostics::new();
        let t1 = make_table(&mut table, "T1");
        let mut d = Diagnostics::new();
        let not_a_table = table.get_or_create("NotATable", Location::synthetic());
        table.morph(not_a_table, SymbolKind::Parameter, &mut d);

        let result = apply_dependency_group(&mut table, &[not_a_table, t1], &mut diags);

        assert!(result.is_err());
        assert_eq!(diags.error_count(), 1);
    }
}
