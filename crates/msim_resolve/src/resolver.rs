//! Driving the fixed pass sequence over a symbol table.

use crate::pass::Pass;
use crate::passes;
use msim_base::Diagnostics;
use msim_symbols::SymbolTable;

/// Runs all six post-parse passes over `table` in their fixed order,
/// accumulating diagnostics as it goes. A pass that calls `diags.fatal(...)`
/// aborts the sequence immediately, skipping every later pass; plain
/// errors/warnings never stop later passes from running.
pub struct Resolver;

impl Resolver {
    pub fn new() -> Self {
        Resolver
    }

    /// Runs every pass, logging entry/exit, and returns the accumulated
    /// diagnostics. Code generation is gated by the caller on
    /// `diags.has_errors()` being false.
    pub fn run(&self, table: &mut SymbolTable) -> Diagnostics {
        let mut diags = Diagnostics::new();
        for pass in Pass::ALL {
            log::debug!("resolver: running {pass}");
            let result = match pass {
                Pass::CreateMissingSymbols => {
                    passes::create_missing_symbols(table, &mut diags);
                    Ok(())
                }
                Pass::AssignMembers => {
                    passes::assign_members(table, &mut diags);
                    Ok(())
                }
                Pass::AssignLabel => {
                    passes::assign_label(table, &mut diags);
                    Ok(())
                }
                Pass::ResolveDataTypes => {
                    passes::resolve_data_types(table, &mut diags);
                    Ok(())
                }
                Pass::PopulateCollections => {
                    passes::populate_collections(table, &mut diags);
                    Ok(())
                }
                Pass::PopulateDependencies => passes::populate_dependencies(table, &mut diags),
            };
            log::debug!(
                "resolver: finished {pass}, {} error(s) so far",
                diags.error_count()
            );
            if let Err(fatal) = result {
                log::error!("resolver: aborting after fatal in {pass}: {fatal}");
                break;
            }
        }
        log::info!("{}", diags.summary_line());
        diags
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msim_base::Location;
    use msim_symbols::{
        Constant, EnumerationData, EnumerationVariant, FundamentalType, ParameterData,
        ParameterSource, Payload, StorageWidth, SymbolKind, TypeRef,
    };

    #[test]
    fn scenario_range_storage_optimization() {
        let mut table = SymbolTable::new();
        let mut d = Diagnostics::new();
        let age = table.get_or_create("AGE", Location::synthetic());
        table.morph(age, SymbolKind::Enumeration(msim_symbols::EnumerationKind::Range), &mut d);
        table.get_mut(age).payload = Payload::Enumeration(EnumerationData {
            type_id: 0,
            dic_id: 0,
            metadata_needed: true,
            variant: EnumerationVariant::Range {
                lo: 0,
                hi: 120,
                storage: StorageWidth::I64,
            },
        });

        let counts = table.get_or_create("counts", Location::synthetic());
        table.morph(counts, SymbolKind::Parameter, &mut d);
        table.get_mut(counts).payload = Payload::Parameter(ParameterData {
            source: ParameterSource::Fixed,
            datatype: TypeRef::Fundamental(FundamentalType::Int),
            dimensions: vec![age],
            dimension_sizes: Vec::new(),
            cumrate_trailing_dims: None,
            haz1rate: false,
            hidden: false,
            initializer: (0..122)
                .map(|i| Constant::new(i.to_string(), TypeRef::Fundamental(FundamentalType::Int)))
                .collect(),
            sub_value_count: 1,
            value_notes: Default::default(),
        });

        let diags = Resolver::new().run(&mut table);

        let age_enum = table.get(age).as_enumeration().unwrap();
        assert_eq!(age_enum.enumerator_count(), 121);
        if let EnumerationVariant::Range { storage, .. } = age_enum.variant {
            assert_eq!(storage, StorageWidth::I8);
        } else {
            panic!("expected range variant");
        }

        assert!(diags
            .records()
            .iter()
            .any(|r| r.message.contains("has size 122, exceeds 121")));
    }

    #[test]
    fn scenario_group_cycle_detection() {
        let mut table = SymbolTable::new();
        let mut d = Diagnostics::new();
        let g1 = table.get_or_create("G1", Location::synthetic());
        table.morph(g1, SymbolKind::ParameterGroup, &mut d);
        let g2 = table.get_or_create("G2", Location::synthetic());
        table.morph(g2, SymbolKind::ParameterGroup, &mut d);
        table.get_mut(g1).payload = Payload::Group(msim_symbols::GroupData { members: vec![g2] });
        table.get_mut(g2).payload = Payload::Group(msim_symbols::GroupData { members: vec![g1] });

        let diags = Resolver::new().run(&mut table);
        assert!(diags
            .records()
            .iter()
            .any(|r| r.message.contains("circular reference in group")));
        assert!(table.collections.all_parameter_groups.is_empty());
    }

    #[test]
    fn fatal_dependency_group_aborts_the_remaining_passes() {
        let mut table = SymbolTable::new();
        let mut d = Diagnostics::new();
        let t1 = table.get_or_create("T1", Location::synthetic());
        table.morph(t1, SymbolKind::Table(msim_symbols::TableKind::Entity), &mut d);
        table.get_mut(t1).payload = Payload::Table(msim_symbols::TableData::new());

        let not_a_table = table.get_or_create("NotATable", Location::synthetic());
        table.morph(not_a_table, SymbolKind::Parameter, &mut d);

        let dep = table.get_or_create("dep_T1_NotATable", Location::synthetic());
        table.morph(dep, SymbolKind::Dependency, &mut d);
        table.get_mut(dep).payload = Payload::Group(msim_symbols::GroupData {
            members: vec![t1, not_a_table],
        });

        let diags = Resolver::new().run(&mut table);

        assert!(diags
            .records()
            .iter()
            .any(|r| r.severity == msim_base::Severity::Fatal));
        // ePopulateCollections never ran after the fatal in ePopulateDependencies
        // would have required it to have already populated `all_tables`.
        assert!(table.collections.all_tables.is_empty());
    }
}
