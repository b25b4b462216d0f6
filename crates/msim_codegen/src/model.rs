//! The five generated C++ artifacts.

use crate::writer::Writer;
use msim_symbols::{ParameterSource, SymbolId, SymbolTable};

/// The five translation units the emitter produces. Every field is
/// deterministic byte-for-byte given an identical, fully resolved
/// `SymbolTable`, excluding the single timestamp
/// line each header carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedModel {
    pub types0: String,
    pub types1: String,
    pub declarations: String,
    pub definitions: String,
    pub fixed_params: String,
}

/// Compile-time configuration surfaced in the tier-0 types header.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmitOptions {
    pub bounds_checking: bool,
    pub censoring: bool,
    pub weighting: bool,
    pub event_tracing: bool,
    pub microdata_output: bool,
    pub local_random_streams: bool,
    pub suppress_line_directives: bool,
}

/// Runs the full emitter over a resolved `table`, producing all five
/// artifacts. Callers are expected to have already checked
/// `diags.has_errors() == false` before calling this.
pub fn generate(table: &SymbolTable, options: EmitOptions) -> GeneratedModel {
    GeneratedModel {
        types0: emit_types0(table, &options),
        types1: emit_types1(table),
        declarations: emit_declarations(table, &options),
        definitions: emit_definitions(table),
        fixed_params: emit_fixed_params(table),
    }
}

fn header_comment(w: &mut Writer, suppress_line_directives: bool, title: &str) {
    w.line(&format!("// {title} -- generated by msimc, do not edit"));
    if !suppress_line_directives {
        w.line("// timestamp: <generated>");
    }
    w.blank();
}

fn emit_types0(table: &SymbolTable, options: &EmitOptions) -> String {
    let mut w = Writer::new();
    header_comment(&mut w, options.suppress_line_directives, "Types (tier 0)");
    w.line("#pragma once").blank();
    w.line(&format!(
        "constexpr bool OM_BOUNDS_CHECKING = {};",
        options.bounds_checking
    ));
    w.line(&format!("constexpr bool OM_CENSORING = {};", options.censoring));
    w.line(&format!("constexpr bool OM_WEIGHTING = {};", options.weighting));
    w.line(&format!(
        "constexpr bool OM_EVENT_TRACING = {};",
        options.event_tracing
    ));
    w.line(&format!(
        "constexpr bool OM_MICRODATA_OUTPUT = {};",
        options.microdata_output
    ));
    w.line(&format!(
        "constexpr bool OM_LOCAL_RANDOM_STREAMS = {};",
        options.local_random_streams
    ));
    if options.local_random_streams {
        w.line("constexpr int OM_STREAM_COUNT = 16;");
    }
    w.blank();
    w.line(&format!(
        "constexpr int OM_PARAMETER_COUNT = {};",
        table.collections.all_parameters.len()
    ));
    w.line(&format!(
        "constexpr int OM_TABLE_COUNT = {};",
        table.collections.all_tables.len()
    ));
    w.finish()
}

fn emit_types1(table: &SymbolTable) -> String {
    let mut w = Writer::new();
    header_comment(&mut w, false, "Types (tier 1)");
    w.line("#pragma once").blank();
    for &enum_id in &table.collections.all_enumerations {
        let name = table.unique_name(enum_id);
        if let Some(e) = table.get(enum_id).as_enumeration() {
            w.line(&format!(
                "// {name}: {} enumerators",
                e.enumerator_count()
            ));
        }
    }
    w.blank();
    for &entity_id in &table.collections.all_entities {
        let name = table.unique_name(entity_id);
        w.line(&format!("class {name};"));
    }
    w.finish()
}

fn emit_declarations(table: &SymbolTable, options: &EmitOptions) -> String {
    let mut w = Writer::new();
    header_comment(&mut w, false, "Declarations");
    w.line("#pragma once").blank();

    for &param_id in &table.collections.all_parameters {
        emit_parameter_declaration(&mut w, table, param_id);
    }
    w.blank();

    for &table_id in &table.collections.all_tables {
        let name = table.unique_name(table_id);
        w.line(&format!("extern ITable* om_table_{name};"));
    }
    w.blank();

    for &entity_id in &table.collections.all_entities {
        let name = table.unique_name(entity_id);
        w.open_brace(&format!("class {name}"));
        if let Some(e) = table.get(entity_id).as_entity() {
            for &member in &e.members {
                let mname = table.unique_name(member);
                w.line(&format!("decltype(auto) {mname};"));
            }
            emit_notify_dispatch(&mut w, table, &e.members);
        }
        if options.local_random_streams {
            emit_local_random_streams(&mut w, &name);
        }
        w.close_brace();
        w.line(&format!("; // end {name}"));
    }
    w.finish()
}

/// Per-entity RNG state for `option local_random_streams`: a stream
/// array, a `RandUniform` override seeded via [`crate::seed_hash`], and a
/// Box-Muller cache for Normal draws.
fn emit_local_random_streams(w: &mut Writer, entity_name: &str) {
    w.line("uint64_t om_streams[OM_STREAM_COUNT];");
    w.line("bool om_normal_cache_valid[OM_STREAM_COUNT] = {};");
    w.line("double om_normal_cache[OM_STREAM_COUNT] = {};");
    w.open_brace("double RandUniform(int strm)");
    w.line(&format!(
        "// seeded by seed_hash(entity_key, master_seed, simulation_member, strm) for {entity_name}"
    ));
    w.line("return om_rng_draw(om_streams[strm]);");
    w.close_brace();
}

/// Registers each maintained attribute's and event's recompute triggers
/// with the runtime, derived from `pp_dependent_attributes`/
/// `dependent_attributes`. Emits nothing if no member of this
/// entity has any dependents.
fn emit_notify_dispatch(w: &mut Writer, table: &SymbolTable, members: &[SymbolId]) {
    let mut lines: Vec<(String, Vec<String>)> = Vec::new();
    for &member in members {
        let name = table.unique_name(member).to_string();
        let deps: Vec<SymbolId> = if let Some(m) = table.get(member).as_member() {
            if !m.is_maintained() {
                continue;
            }
            m.pp_dependent_attributes.iter().copied().collect()
        } else if let Some(e) = table.get(member).as_event() {
            e.dependent_attributes.iter().copied().collect()
        } else {
            continue;
        };
        if deps.is_empty() {
            continue;
        }
        let mut dep_names: Vec<String> = deps.iter().map(|&d| table.unique_name(d).to_string()).collect();
        dep_names.sort();
        lines.push((name, dep_names));
    }

    if lines.is_empty() {
        return;
    }

    lines.sort_by(|a, b| a.0.cmp(&b.0));
    w.open_brace("void om_initialize_notify()");
    for (name, deps) in lines {
        let refs: Vec<String> = deps.iter().map(|d| format!("&{d}")).collect();
        w.line(&format!("{name}.initialize_notify({{ {} }});", refs.join(", ")));
    }
    w.close_brace();
}

fn emit_parameter_declaration(w: &mut Writer, table: &SymbolTable, param_id: SymbolId) {
    let name = table.unique_name(param_id);
    let source = table.get(param_id).as_parameter().map(|p| p.source);
    match source {
        Some(ParameterSource::Scenario) => {
            w.line(&format!("thread_local ParamAccessor om_param_{name};"));
        }
        Some(ParameterSource::Fixed) => {
            w.line(&format!("extern const ParamCell om_param_{name}[];"));
        }
        Some(ParameterSource::Derived) => {
            w.line(&format!("extern ParamCell om_param_{name}[];"));
        }
        _ => {}
    }
}

/// Emits the cumulative-distribution table preparation call for a
/// `cumrate` parameter: one row per conditioning combination,
/// each holding `distribution_size()` running sums ready for inverse-CDF
/// lookup at draw time. Does nothing for a parameter with no
/// `cumrate_trailing_dims`.
fn emit_cumrate_preparation(w: &mut Writer, table: &SymbolTable, param_id: SymbolId, name: &str) {
    let Some(p) = table.get(param_id).as_parameter() else {
        return;
    };
    let (Some(conditioning), Some(distribution)) = (p.conditioning_size(), p.distribution_size())
    else {
        return;
    };
    w.line(&format!(
        "om_param_{name}.prepare_cumulative_distribution({conditioning}, {distribution});"
    ));
}

fn emit_definitions(table: &SymbolTable) -> String {
    let mut w = Writer::new();
    header_comment(&mut w, false, "Definitions");

    w.open_brace("void ModelStartup(IRunBase* runBase)");
    for &param_id in &table.collections.all_parameters {
        let name = table.unique_name(param_id);
        if matches!(
            table.get(param_id).as_parameter().map(|p| p.source),
            Some(ParameterSource::Scenario)
        ) {
            w.line(&format!(
                "om_param_{name}.bind(runBase->getParameter(\"{name}\"));"
            ));
        }
        emit_cumrate_preparation(&mut w, table, param_id, &name);
    }
    for &table_id in sorted_tables_for_startup(table).iter() {
        let name = table.unique_name(table_id);
        let suppressed = table
            .get(table_id)
            .as_table()
            .map(|t| t.is_suppressed)
            .unwrap_or(false);
        let requiring_active = table
            .get(table_id)
            .as_table()
            .map(|t| !t.requiring.is_empty())
            .unwrap_or(false);
        if !suppressed || requiring_active {
            w.line(&format!("om_table_{name} = new Table_{name}();"));
        }
    }
    w.close_brace();
    w.blank();

    w.open_brace("void RunModel(IModel* model)");
    w.line("for (int j = 0; j < model->subValueCount(); ++j) RunSimulation(j, model);");
    w.close_brace();
    w.blank();

    w.open_brace("void ModelShutdown(IModel* model)");
    let shutdown_order = sorted_tables_for_startup(table);
    for &table_id in shutdown_order.iter() {
        let name = table.unique_name(table_id);
        w.line(&format!("om_table_{name}->extract_accumulators();"));
        w.line(&format!("om_table_{name}->compute_measures();"));
    }
    for &table_id in shutdown_order.iter() {
        let name = table.unique_name(table_id);
        let suppressed = table
            .get(table_id)
            .as_table()
            .map(|t| t.is_suppressed)
            .unwrap_or(false);
        if !suppressed {
            w.line(&format!(
                "if (!model->isSuppressed(\"{name}\")) model->writeOutputTable(\"{name}\", om_table_{name}->cell_count(), om_table_{name}->data());"
            ));
        }
    }
    w.close_brace();

    w.finish()
}

/// Tables in an order where every table a given table `requires` comes
/// before it: a table's own accumulator extraction and
/// output write must follow that of every table it depends on. Ties
/// (tables with no ordering constraint between them) break by declaration
/// order, the same index `table.collections.all_tables` already carries,
/// so output stays deterministic. A dependency
/// cycle (which `ePopulateDependencies` does not itself reject) falls
/// back to appending any unresolved tables in declaration order rather
/// than panicking.
fn sorted_tables_for_startup(table: &SymbolTable) -> Vec<SymbolId> {
    use std::cmp::Reverse;
    use std::collections::{BinaryHeap, HashMap};

    let ids = &table.collections.all_tables;
    let index_of: HashMap<SymbolId, usize> =
        ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();

    let mut indegree: Vec<usize> = vec![0; ids.len()];
    for (i, &id) in ids.iter().enumerate() {
        if let Some(t) = table.get(id).as_table() {
            indegree[i] = t
                .requires
                .iter()
                .filter(|r| index_of.contains_key(r))
                .count();
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = indegree
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d == 0)
        .map(|(i, _)| Reverse(i))
        .collect();

    let mut order = Vec::with_capacity(ids.len());
    let mut seen = vec![false; ids.len()];
    while let Some(Reverse(i)) = ready.pop() {
        seen[i] = true;
        order.push(ids[i]);
        if let Some(t) = table.get(ids[i]).as_table() {
            for requiring in &t.requiring {
                if let Some(&j) = index_of.get(requiring) {
                    indegree[j] -= 1;
                    if indegree[j] == 0 {
                        ready.push(Reverse(j));
                    }
                }
            }
        }
    }

    if order.len() != ids.len() {
        for (i, &id) in ids.iter().enumerate() {
            if !seen[i] {
                order.push(id);
            }
        }
    }
    order
}

fn emit_fixed_params(table: &SymbolTable) -> String {
    let mut w = Writer::new();
    header_comment(&mut w, false, "Fixed parameters");
    for &param_id in &table.collections.all_parameters {
        let Some(p) = table.get(param_id).as_parameter() else {
            continue;
        };
        if p.source != ParameterSource::Fixed {
            continue;
        }
        let name = table.unique_name(param_id);
        let cells: Vec<String> = p
            .initializer
            .iter()
            .map(|c| c.format_for_storage().to_string())
            .collect();
        w.line(&format!(
            "const ParamCell om_param_{name}[] = {{ {} }};",
            cells.join(", ")
        ));
    }
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use msim_base::{Diagnostics, Location};
    use msim_symbols::{
        Constant, FundamentalType, ParameterData, SymbolKind, TypeRef, ValueNotes,
    };

    fn fixed_param(table: &mut SymbolTable, name: &str, values: &[&str]) -> SymbolId {
        let mut d = Diagnostics::new();
        let id = table.get_or_create(name, Location::synthetic());
        table.morph(id, SymbolKind::Parameter, &mut d);
        table.get_mut(id).payload = msim_symbols::Payload::Parameter(ParameterData {
            source: ParameterSource::Fixed,
            datatype: TypeRef::Fundamental(FundamentalType::Int),
            dimensions: Vec::new(),
            dimension_sizes: Vec::new(),
            cumrate_trailing_dims: None,
            haz1rate: false,
            hidden: false,
            initializer: values
                .iter()
                .map(|v| Constant::new(*v, TypeRef::Fundamental(FundamentalType::Int)))
                .collect(),
            sub_value_count: 1,
            value_notes: ValueNotes::default(),
        });
        id
    }

    #[test]
    fn generation_is_deterministic_for_identical_input() {
        let mut table = SymbolTable::new();
        let p = fixed_param(&mut table, "k", &["1", "2", "3"]);
        table.collections.all_parameters.push(p);

        let a = generate(&table, EmitOptions::default());
        let b = generate(&table, EmitOptions::default());
        assert_eq!(a, b);
    }

    #[test]
    fn fixed_params_emits_initializer_values() {
        let mut table = SymbolTable::new();
        let p = fixed_param(&mut table, "k", &["1", "2", "3"]);
        table.collections.all_parameters.push(p);

        let out = emit_fixed_params(&table);
        assert!(out.contains("om_param_k[] = { 1, 2, 3 };"));
    }

    #[test]
    fn scenario_parameter_is_thread_local_accessor() {
        let mut table = SymbolTable::new();
        let mut d = Diagnostics::new();
        let id = table.get_or_create("mortality", Location::synthetic());
        table.morph(id, SymbolKind::Parameter, &mut d);
        table.get_mut(id).payload = msim_symbols::Payload::Parameter(ParameterData {
            source: ParameterSource::Scenario,
            datatype: TypeRef::Fundamental(FundamentalType::Double),
            dimensions: Vec::new(),
            dimension_sizes: Vec::new(),
            cumrate_trailing_dims: None,
            haz1rate: false,
            hidden: false,
            initializer: Vec::new(),
            sub_value_count: 1,
            value_notes: ValueNotes::default(),
        });
        table.collections.all_parameters.push(id);

        let out = emit_declarations(&table, &EmitOptions::default());
        assert!(out.contains("thread_local ParamAccessor om_param_mortality;"));
    }

    #[test]
    fn local_random_streams_option_emits_rng_state() {
        let mut table = SymbolTable::new();
        let mut d = Diagnostics::new();
        let person = table.get_or_create("Person", Location::synthetic());
        table.morph(person, SymbolKind::Entity, &mut d);
        table.get_mut(person).payload =
            msim_symbols::Payload::Entity(msim_symbols::EntityData { members: Vec::new() });
        table.collections.all_entities.push(person);

        let mut options = EmitOptions::default();
        options.local_random_streams = true;
        let out = emit_declarations(&table, &options);
        assert!(out.contains("om_streams[OM_STREAM_COUNT]"));
        assert!(out.contains("RandUniform(int strm)"));
    }

    #[test]
    fn shutdown_extracts_required_tables_before_their_requirers() {
        use msim_symbols::{Payload, TableData, TableKind};

        let mut table = SymbolTable::new();
        let mut d = Diagnostics::new();
        let t2 = table.get_or_create("T2", Location::synthetic());
        table.morph(t2, SymbolKind::Table(TableKind::Entity), &mut d);
        table.get_mut(t2).payload = Payload::Table(TableData::new());
        table.collections.all_tables.push(t2);

        let t1 = table.get_or_create("T1", Location::synthetic());
        table.morph(t1, SymbolKind::Table(TableKind::Entity), &mut d);
        table.get_mut(t1).payload = Payload::Table(TableData::new());
        table.collections.all_tables.push(t1);

        // Declared T2 before T1, but T2 requires T1: T1 must still sort first.
        if let Some(t) = table.get_mut(t2).as_table_mut() {
            t.requires.insert(t1);
        }
        if let Some(t) = table.get_mut(t1).as_table_mut() {
            t.requiring.insert(t2);
        }

        let out = emit_definitions(&table);
        let pos_t1 = out.find("om_table_T1->extract_accumulators();").unwrap();
        let pos_t2 = out.find("om_table_T2->extract_accumulators();").unwrap();
        assert!(pos_t1 < pos_t2);
    }

    #[test]
    fn cumrate_parameter_emits_distribution_preparation() {
        let mut table = SymbolTable::new();
        let mut d = Diagnostics::new();
        let id = table.get_or_create("mortality_rate", Location::synthetic());
        table.morph(id, SymbolKind::Parameter, &mut d);
        table.get_mut(id).payload = msim_symbols::Payload::Parameter(ParameterData {
            source: ParameterSource::Scenario,
            datatype: TypeRef::Fundamental(FundamentalType::Double),
            dimensions: Vec::new(),
            dimension_sizes: vec![2, 5, 10],
            cumrate_trailing_dims: Some(2),
            haz1rate: false,
            hidden: false,
            initializer: Vec::new(),
            sub_value_count: 1,
            value_notes: ValueNotes::default(),
        });
        table.collections.all_parameters.push(id);

        let out = emit_definitions(&table);
        assert!(out.contains("om_param_mortality_rate.prepare_cumulative_distribution(2, 50);"));
    }

    #[test]
    fn notify_dispatch_lists_sorted_dependents() {
        use msim_symbols::{DataMemberKind, MemberData};

        let mut table = SymbolTable::new();
        let mut d = Diagnostics::new();
        let person = table.get_or_create("Person", Location::synthetic());
        table.morph(person, SymbolKind::Entity, &mut d);

        let age = table.get_or_create("age", Location::synthetic());
        table.morph(age, SymbolKind::EntityDataMember(DataMemberKind::SimpleAttribute), &mut d);
        table.get_mut(age).payload =
            msim_symbols::Payload::EntityDataMember(MemberData::new(
                DataMemberKind::SimpleAttribute,
                person,
                0,
            ));

        let sex = table.get_or_create("sex", Location::synthetic());
        table.morph(sex, SymbolKind::EntityDataMember(DataMemberKind::SimpleAttribute), &mut d);
        table.get_mut(sex).payload =
            msim_symbols::Payload::EntityDataMember(MemberData::new(
                DataMemberKind::SimpleAttribute,
                person,
                1,
            ));

        let mortality = table.get_or_create("mortality", Location::synthetic());
        table.morph(
            mortality,
            SymbolKind::EntityDataMember(DataMemberKind::DerivedAttribute),
            &mut d,
        );
        let mut mortality_data = MemberData::new(DataMemberKind::DerivedAttribute, person, 2);
        mortality_data.pp_dependent_attributes.insert(sex);
        mortality_data.pp_dependent_attributes.insert(age);
        table.get_mut(mortality).payload = msim_symbols::Payload::EntityDataMember(mortality_data);

        table.get_mut(person).payload = msim_symbols::Payload::Entity(msim_symbols::EntityData {
            members: vec![age, sex, mortality],
        });
        table.collections.all_entities.push(person);

        let out = emit_declarations(&table, &EmitOptions::default());
        assert!(out.contains("mortality.initialize_notify({ &age, &sex });"));
    }
}
